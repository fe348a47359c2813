//! Prisma DMMF datamodel, as handed to generators by the Prisma CLI.
//!
//! Only the `datamodel` half of the document is read. Keys are camelCase on the
//! wire; anything not listed here is ignored.

mod options;

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::Value;

use crate::diagnostic::GeneratorError;

pub use options::{EnvValue, GeneratorBlock, GeneratorOptions};

/// The DMMF document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    pub datamodel: Datamodel,
}

/// A DMMF file on disk: the bare document, or the options envelope around it.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentFile {
    Bare(Document),
    Wrapped { dmmf: Document },
}

impl Document {
    /// Parses a DMMF JSON file. Accepts `{ "datamodel": ... }` and
    /// `{ "dmmf": { "datamodel": ... } }`.
    pub fn from_json(json: &str) -> Result<Self, GeneratorError> {
        let file: DocumentFile =
            serde_json::from_str(json).map_err(|e| GeneratorError::invalid_document(e.to_string()))?;
        Ok(match file {
            DocumentFile::Bare(document) => document,
            DocumentFile::Wrapped { dmmf } => dmmf,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Datamodel {
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
    #[serde(default)]
    pub models: Vec<Model>,
}

impl Datamodel {
    /// Models that get a schema, in output order.
    ///
    /// Implicit many-to-many join tables (`_` prefix) are skipped.
    pub fn schema_models(&self) -> Vec<&Model> {
        let mut models: Vec<&Model> = self.models.iter().filter(|m| !m.is_internal()).collect();
        models.sort_by(|a, b| compare_names(&a.name, &b.name));
        models
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    pub fields: Vec<Field>,
}

impl Model {
    /// Table name on the database side (`@@map`).
    pub fn table_name(&self) -> &str {
        non_empty(self.db_name.as_deref()).unwrap_or(&self.name)
    }

    pub fn is_internal(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Scalar and enum fields, in output order. Relation fields are skipped.
    pub fn schema_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self
            .fields
            .iter()
            .filter(|f| matches!(f.kind, FieldKind::Scalar | FieldKind::Enum))
            .collect();
        fields.sort_by(|a, b| compare_names(&a.name, &b.name));
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Scalar,
    Object,
    Enum,
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    pub kind: FieldKind,
    #[serde(default)]
    pub is_list: bool,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub is_id: bool,
    #[serde(default)]
    pub has_default_value: bool,
    /// Scalar name (`String`, `Int`, ...), enum name, or related model name.
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub native_type: Option<NativeType>,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub documentation: Option<String>,
}

impl Field {
    /// The column name when `@map` renames this field.
    pub fn storage_name(&self) -> Option<&str> {
        non_empty(self.db_name.as_deref()).filter(|db_name| *db_name != self.name)
    }
}

/// `@db.*` native type: `[name, args]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NativeType(pub String, #[serde(default)] pub Vec<String>);

impl NativeType {
    pub fn name(&self) -> &str {
        &self.0
    }
}

/// A field's `@default(...)`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// `now()`, `uuid(4)`, `dbgenerated("gen_random_uuid()")`, ...
    Function(FunctionCall),
    List(Vec<Value>),
    Scalar(Value),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    pub name: String,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
}

impl EnumValue {
    /// The value as stored in the database (`@map`), else the declared name.
    pub fn stored_value(&self) -> &str {
        non_empty(self.db_name.as_deref()).unwrap_or(&self.name)
    }
}

/// Case-insensitive name order with a case-sensitive tiebreak.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_bare_and_wrapped_documents() {
        let bare = Document::from_json(r#"{ "datamodel": { "models": [{ "name": "A", "fields": [] }] } }"#).unwrap();
        assert_eq!(bare.datamodel.models.len(), 1);

        let wrapped =
            Document::from_json(r#"{ "dmmf": { "datamodel": { "enums": [{ "name": "E", "values": [] }] } } }"#).unwrap();
        assert_eq!(wrapped.datamodel.enums.len(), 1);

        let err = Document::from_json(r#"{ "models": [] }"#).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidDocument { .. }));
    }

    #[test]
    fn ignores_engine_keys_the_generator_does_not_read() {
        let document = Document::from_json(
            &json!({
                "datamodel": {
                    "enums": [{
                        "name": "Role",
                        "values": [{ "name": "ADMIN", "dbName": null }],
                        "dbName": "role",
                        "documentation": "Access level"
                    }],
                    "models": [{
                        "name": "Post",
                        "dbName": null,
                        "documentation": "A blog post",
                        "fields": [{
                            "name": "author",
                            "kind": "object",
                            "isList": false,
                            "isRequired": true,
                            "type": "User",
                            "relationName": "PostToUser",
                            "relationFromFields": ["authorId"],
                            "isUpdatedAt": false
                        }]
                    }],
                    "types": [{ "name": "Address", "fields": [] }],
                    "indexes": []
                }
            })
            .to_string(),
        )
        .unwrap();

        assert_eq!(document.datamodel.enums[0].name, "Role");
        assert_eq!(document.datamodel.models[0].fields[0].name, "author");
        assert!(document.datamodel.models[0].schema_fields().is_empty());
    }

    #[test]
    fn deserializes_engine_field_shape() {
        let field: Field = serde_json::from_value(json!({
            "name": "id",
            "kind": "scalar",
            "isList": false,
            "isRequired": true,
            "isUnique": false,
            "isId": true,
            "isReadOnly": false,
            "hasDefaultValue": true,
            "type": "String",
            "nativeType": ["Uuid", []],
            "default": { "name": "dbgenerated", "args": ["gen_random_uuid()"] },
            "isGenerated": false,
            "isUpdatedAt": false
        }))
        .unwrap();

        assert!(field.is_id);
        assert_eq!(field.native_type.as_ref().map(NativeType::name), Some("Uuid"));
        assert_eq!(
            field.default,
            Some(DefaultValue::Function(FunctionCall {
                name: "dbgenerated".to_string(),
                args: vec![json!("gen_random_uuid()")],
            }))
        );
    }

    #[test]
    fn scalar_and_list_defaults() {
        let scalar: DefaultValue = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(scalar, DefaultValue::Scalar(json!(42)));

        let list: DefaultValue = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(list, DefaultValue::List(vec![json!("a"), json!("b")]));
    }

    #[test]
    fn null_native_type_is_none() {
        let field: Field = serde_json::from_value(json!({
            "name": "title",
            "kind": "scalar",
            "type": "String",
            "nativeType": null
        }))
        .unwrap();
        assert!(field.native_type.is_none());
        assert!(!field.is_required);
    }

    #[test]
    fn storage_name_requires_a_different_name() {
        let mut field: Field = serde_json::from_value(json!({
            "name": "createdAt",
            "kind": "scalar",
            "type": "DateTime",
            "dbName": "created_at"
        }))
        .unwrap();
        assert_eq!(field.storage_name(), Some("created_at"));

        field.db_name = Some("createdAt".to_string());
        assert_eq!(field.storage_name(), None);
    }

    #[test]
    fn schema_fields_skip_relations_and_sort() {
        let model: Model = serde_json::from_value(json!({
            "name": "Post",
            "fields": [
                { "name": "title", "kind": "scalar", "type": "String" },
                { "name": "author", "kind": "object", "type": "User" },
                { "name": "Status", "kind": "enum", "type": "PostStatus" },
                { "name": "authorId", "kind": "scalar", "type": "String" }
            ]
        }))
        .unwrap();

        let names: Vec<&str> = model.schema_fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["authorId", "Status", "title"]);
    }

    #[test]
    fn schema_models_skip_join_tables() {
        let datamodel: Datamodel = serde_json::from_value(json!({
            "enums": [],
            "models": [
                { "name": "User", "dbName": "users", "fields": [] },
                { "name": "_PostToTag", "fields": [] },
                { "name": "Account", "fields": [] }
            ]
        }))
        .unwrap();

        let names: Vec<&str> = datamodel.schema_models().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Account", "User"]);
        assert_eq!(datamodel.models[0].table_name(), "users");
    }
}
