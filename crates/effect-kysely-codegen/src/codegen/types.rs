//! `types.ts` generation: model schemas and the Kysely `DB` interface.

use crate::dmmf::{Datamodel, Model};
use crate::mapper::{field_type, EnumRegistry};

/// Generates the types file.
pub fn generate_types_file(header: &str, datamodel: &Datamodel) -> String {
    let enums = EnumRegistry::from_datamodel(datamodel);
    let models = datamodel.schema_models();

    let schemas: Vec<String> = models
        .iter()
        .map(|model| generate_model_schema(model, &enums))
        .collect();

    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        header,
        generate_imports(datamodel),
        schemas.join("\n\n"),
        generate_db_interface(&models)
    )
}

fn generate_imports(datamodel: &Datamodel) -> String {
    let mut imports = vec![
        "import { Schema } from \"effect\";".to_string(),
        "import { columnType, generated, getSchemas } from \"prisma-effect-kysely\";".to_string(),
    ];

    if !datamodel.enums.is_empty() {
        let names: Vec<&str> = datamodel.enums.iter().map(|e| e.name.as_str()).collect();
        imports.push(format!("import {{ {} }} from \"./enums\";", names.join(", ")));
    }

    imports.join("\n")
}

/// Generates `_Model` (base struct), `Model` (its views) and the
/// Select/Insert/Update type aliases.
fn generate_model_schema(model: &Model, enums: &EnumRegistry) -> String {
    let name = &model.name;
    let fields: Vec<String> = model
        .schema_fields()
        .into_iter()
        .map(|field| format!("  {}: {}", field.name, field_type(field, enums)))
        .collect();

    let mut output = format!("// {name} Base Schema\n");
    output.push_str(&format!("export const _{name} = Schema.Struct({{\n"));
    output.push_str(&fields.join(",\n"));
    output.push_str("\n});\n\n");

    output.push_str(&format!("export const {name} = getSchemas(_{name});\n\n"));

    output.push_str(&format!(
        "export type {name}Select = Schema.Schema.Type<typeof {name}.Selectable>;\n"
    ));
    output.push_str(&format!(
        "export type {name}Insert = Schema.Schema.Type<typeof {name}.Insertable>;\n"
    ));
    output.push_str(&format!(
        "export type {name}Update = Schema.Schema.Type<typeof {name}.Updateable>;"
    ));

    output
}

/// One entry per table, keyed by its database name.
fn generate_db_interface(models: &[&Model]) -> String {
    let entries: Vec<String> = models
        .iter()
        .map(|model| {
            format!(
                "  {}: Schema.Schema.Encoded<typeof _{}>;",
                model.table_name(),
                model.name
            )
        })
        .collect();

    format!(
        "// Kysely Database Interface\nexport interface DB {{\n{}\n}}",
        entries.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn datamodel() -> Datamodel {
        serde_json::from_value(json!({
            "enums": [{ "name": "Role", "values": [{ "name": "ADMIN" }, { "name": "USER" }] }],
            "models": [
                {
                    "name": "Post",
                    "dbName": "posts",
                    "fields": [
                        { "name": "title", "kind": "scalar", "type": "String", "isRequired": true },
                        { "name": "author", "kind": "object", "type": "User", "isRequired": true }
                    ]
                },
                {
                    "name": "User",
                    "fields": [
                        { "name": "role", "kind": "enum", "type": "Role", "isRequired": true },
                        {
                            "name": "id", "kind": "scalar", "type": "String", "isRequired": true,
                            "isId": true, "hasDefaultValue": true,
                            "default": { "name": "dbgenerated", "args": ["gen_random_uuid()"] }
                        }
                    ]
                },
                { "name": "_PostToUser", "fields": [] }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn imports_enums_when_present() {
        let imports = generate_imports(&datamodel());
        assert!(imports.ends_with("import { Role } from \"./enums\";"));

        let imports = generate_imports(&Datamodel::default());
        assert!(!imports.contains("./enums"));
    }

    #[test]
    fn model_schema_layout() {
        let datamodel = datamodel();
        let enums = EnumRegistry::from_datamodel(&datamodel);
        let user = &datamodel.models[1];

        assert_eq!(
            generate_model_schema(user, &enums),
            r#"// User Base Schema
export const _User = Schema.Struct({
  id: columnType(Schema.UUID, Schema.Never, Schema.Never),
  role: Role
});

export const User = getSchemas(_User);

export type UserSelect = Schema.Schema.Type<typeof User.Selectable>;
export type UserInsert = Schema.Schema.Type<typeof User.Insertable>;
export type UserUpdate = Schema.Schema.Type<typeof User.Updateable>;"#
        );
    }

    #[test]
    fn db_interface_uses_table_names_and_skips_join_tables() {
        let file = generate_types_file("/** header */", &datamodel());

        assert!(file.ends_with(
            r#"// Kysely Database Interface
export interface DB {
  posts: Schema.Schema.Encoded<typeof _Post>;
  User: Schema.Schema.Encoded<typeof _User>;
}"#
        ));
        assert!(!file.contains("_PostToUser"));
        assert!(!file.contains("author"));
    }
}
