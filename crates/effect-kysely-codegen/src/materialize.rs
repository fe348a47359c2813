//! Runtime schemas for DMMF models.
//!
//! Builds the same struct the generated `_Model` declares, as an
//! [`effect_kysely::Schema`], together with its operation views.

use effect_kysely::{get_schemas, Schema, Schemas};

use crate::dmmf::{Datamodel, Model};
use crate::mapper::{field_type, EnumRegistry};

#[derive(Debug, Clone)]
pub struct ModelSchema {
    pub name: String,
    /// Database table name.
    pub table: String,
    /// The base struct, column markers included.
    pub base: Schema,
    pub views: Schemas,
}

pub fn model_schema(model: &Model, enums: &EnumRegistry) -> ModelSchema {
    let properties = model
        .schema_fields()
        .into_iter()
        .map(|field| field_type(field, enums).to_property(&field.name, enums))
        .collect();
    let base = Schema::structure(properties);
    let views = get_schemas(&base);

    ModelSchema {
        name: model.name.clone(),
        table: model.table_name().to_string(),
        base,
        views,
    }
}

/// Schemas for every generated model, in output order.
pub fn model_schemas(datamodel: &Datamodel) -> Vec<ModelSchema> {
    let enums = EnumRegistry::from_datamodel(datamodel);
    datamodel
        .schema_models()
        .into_iter()
        .map(|model| model_schema(model, &enums))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn enum_fields_become_literals() {
        let datamodel: Datamodel = serde_json::from_value(json!({
            "enums": [{ "name": "Role", "values": [{ "name": "ADMIN", "dbName": "admin" }, { "name": "USER" }] }],
            "models": [{
                "name": "Member",
                "dbName": "members",
                "fields": [
                    { "name": "role", "kind": "enum", "type": "Role", "isRequired": true },
                    { "name": "nickname", "kind": "scalar", "type": "String" }
                ]
            }]
        }))
        .unwrap();

        let schemas = model_schemas(&datamodel);
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].table, "members");
        assert_eq!(
            schemas[0].views.selectable.to_string(),
            r#"{ readonly nickname: string | undefined; readonly role: "admin" | "USER" }"#
        );
    }
}
