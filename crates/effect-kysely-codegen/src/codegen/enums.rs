//! `enums.ts` generation.

use crate::dmmf::{Datamodel, DatamodelEnum};

/// Generates the enums file. Enums keep their declaration order.
pub fn generate_enums_file(header: &str, datamodel: &Datamodel) -> String {
    let schemas: Vec<String> = datamodel.enums.iter().map(generate_enum_schema).collect();

    format!(
        "{}\n\nimport {{ Schema }} from \"effect\";\n\n{}",
        header,
        schemas.join("\n\n")
    )
}

/// Generates one enum as a literal schema plus its type alias.
///
/// Values use their `@map` name when present. The enum name is emitted as
/// declared.
fn generate_enum_schema(enum_def: &DatamodelEnum) -> String {
    let values: Vec<String> = enum_def
        .values
        .iter()
        .map(|v| format!("\"{}\"", v.stored_value()))
        .collect();
    let name = &enum_def.name;

    format!(
        "export const {name} = Schema.Literal({});\n\nexport type {name} = Schema.Schema.Type<typeof {name}>;",
        values.join(", ")
    )
}
