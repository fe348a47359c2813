use chrono::{TimeZone, Utc};
use serde_json::json;

use effect_kysely::{PropertySignature, View};
use effect_kysely_codegen::codegen::{generate_at, INDEX_FILE, TYPES_FILE};
use effect_kysely_codegen::dmmf::{Document, GeneratorOptions};
use effect_kysely_codegen::{model_schemas, Generator, GeneratorConfig, GeneratorError};

fn user_document() -> Document {
    serde_json::from_value(json!({
        "datamodel": {
            "enums": [
                { "name": "Role", "values": [{ "name": "ADMIN", "dbName": "admin" }, { "name": "MEMBER", "dbName": "member" }] }
            ],
            "models": [{
                "name": "User",
                "dbName": "users",
                "fields": [
                    {
                        "name": "id", "kind": "scalar", "type": "String",
                        "isRequired": true, "isId": true, "hasDefaultValue": true,
                        "default": { "name": "dbgenerated", "args": ["gen_random_uuid()"] }
                    },
                    { "name": "email", "kind": "scalar", "type": "String", "isRequired": true, "isUnique": true },
                    {
                        "name": "createdAt", "dbName": "created_at", "kind": "scalar", "type": "DateTime",
                        "isRequired": true, "hasDefaultValue": true,
                        "default": { "name": "now", "args": [] }
                    },
                    { "name": "role", "kind": "enum", "type": "Role", "isRequired": true, "hasDefaultValue": true, "default": "MEMBER" },
                    { "name": "posts", "kind": "object", "type": "Post", "isList": true, "isRequired": true, "relationName": "PostToUser" }
                ]
            }]
        }
    }))
    .unwrap()
}

fn property<'a>(schema: &'a effect_kysely::Schema, name: &str) -> Option<&'a PropertySignature> {
    schema.as_struct().and_then(|s| s.property(name))
}

#[test]
fn user_model_types_file() {
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let code = generate_at(&user_document(), at);
    let types = code.file(TYPES_FILE).unwrap();

    let expected = r#"/**
 * Generated: 2025-01-02T03:04:05.000Z
 * DO NOT EDIT MANUALLY
 */

import { Schema } from "effect";
import { columnType, generated, getSchemas } from "prisma-effect-kysely";
import { Role } from "./enums";

// User Base Schema
export const _User = Schema.Struct({
  createdAt: Schema.propertySignature(generated(Schema.Date)).pipe(Schema.fromKey("created_at")),
  email: Schema.String,
  id: columnType(Schema.UUID, Schema.Never, Schema.Never),
  role: generated(Role)
});

export const User = getSchemas(_User);

export type UserSelect = Schema.Schema.Type<typeof User.Selectable>;
export type UserInsert = Schema.Schema.Type<typeof User.Insertable>;
export type UserUpdate = Schema.Schema.Type<typeof User.Updateable>;

// Kysely Database Interface
export interface DB {
  users: Schema.Schema.Encoded<typeof _User>;
}"#;
    assert_eq!(types, expected);
    assert_eq!(code.file(INDEX_FILE), Some("export * from \"./enums\";\nexport * from \"./types\";"));
}

#[test]
fn user_model_views() {
    let schemas = model_schemas(&user_document().datamodel);
    let user = &schemas[0];
    assert_eq!(user.table, "users");

    let select = &user.views.selectable;
    let insert = &user.views.insertable;
    let update = &user.views.updatable;

    // id: read-only
    assert!(property(select, "id").is_some());
    assert!(property(insert, "id").is_none());
    assert!(property(update, "id").is_none());

    // email: plain and required on select/insert
    assert!(!property(select, "email").unwrap().optional);
    assert!(!property(insert, "email").unwrap().optional);
    assert!(property(update, "email").unwrap().optional);

    // createdAt: generated, keeps its storage key everywhere
    let created_insert = property(insert, "createdAt").unwrap();
    assert!(created_insert.optional);
    assert_eq!(created_insert.encoded_key(), "created_at");
    let created_update = property(update, "createdAt").unwrap();
    assert!(!created_update.schema.is_never());
    assert_eq!(created_update.encoded_key(), "created_at");

    for view in [View::Select, View::Insert, View::Update] {
        assert!(property(user.views.view(view), "posts").is_none());
    }
}

#[test]
fn selectable_decodes_storage_rows() {
    let schemas = model_schemas(&user_document().datamodel);
    let row = json!({
        "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
        "email": "ada@example.com",
        "created_at": "2025-01-02T03:04:05Z",
        "role": "admin"
    });

    let decoded = schemas[0].views.selectable.decode(&row).unwrap();
    assert_eq!(decoded["createdAt"], json!("2025-01-02T03:04:05Z"));

    let bad_role = json!({
        "id": "3f2504e0-4f89-11d3-9a0c-0305e82c3301",
        "email": "ada@example.com",
        "created_at": "2025-01-02T03:04:05Z",
        "role": "ADMIN"
    });
    assert!(schemas[0].views.selectable.decode(&bad_role).is_err());
}

#[tokio::test]
async fn generate_writes_three_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("nested").join("generated");

    let generator = Generator::new(GeneratorConfig::new(&out)).unwrap();
    let result = generator.generate(&user_document()).await.unwrap();

    assert_eq!(result.models, 1);
    assert_eq!(result.enums, 1);
    assert_eq!(result.files, ["enums.ts", "types.ts", "index.ts"]);

    let enums = std::fs::read_to_string(out.join("enums.ts")).unwrap();
    assert!(enums.contains("export const Role = Schema.Literal(\"admin\", \"member\");"));
    let types = std::fs::read_to_string(out.join("types.ts")).unwrap();
    assert!(types.contains("export const User = getSchemas(_User);"));
    assert!(out.join("index.ts").exists());
}

#[tokio::test]
async fn missing_output_fails_before_touching_the_filesystem() {
    let options: GeneratorOptions = serde_json::from_value(json!({
        "generator": { "name": "effect", "output": null, "config": {} },
        "dmmf": { "datamodel": { "enums": [], "models": [] } }
    }))
    .unwrap();

    let err = Generator::from_options(&options).unwrap_err();
    assert!(matches!(err, GeneratorError::MissingOutput));
}

#[tokio::test]
async fn output_under_a_file_reports_io_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();

    let generator = Generator::new(GeneratorConfig::new(blocker.join("generated"))).unwrap();
    match generator.generate(&user_document()).await {
        Err(GeneratorError::IoError { path, .. }) => assert_eq!(path, blocker.join("generated")),
        other => panic!("expected IoError, got {:?}", other),
    }
}
