//! UUID detection for `String` fields.

use serde_json::Value;

use crate::dmmf::{DefaultValue, Field};

/// Decides whether a `String` field holds UUIDs.
///
/// Checked in order, first hit wins:
/// 1. `@db.Uuid` native type
/// 2. `@db.Uuid` in the field documentation
/// 3. an `@id` with a `dbgenerated(...)` default that mentions uuid
/// 4. the field name (`id`, `*_id`, `*_uuid`, `uuid`)
pub fn is_uuid_field(field: &Field) -> bool {
    if field.native_type.as_ref().is_some_and(|t| t.name() == "Uuid") {
        return true;
    }

    if field
        .documentation
        .as_deref()
        .is_some_and(|doc| doc.contains("@db.Uuid"))
    {
        return true;
    }

    if field.is_id && field.has_default_value && field.default.as_ref().is_some_and(is_uuid_default) {
        return true;
    }

    has_uuid_name(&field.name)
}

fn is_uuid_default(default: &DefaultValue) -> bool {
    let DefaultValue::Function(call) = default else {
        return false;
    };
    if call.name != "dbgenerated" {
        return false;
    }

    let args: Option<Vec<&str>> = call.args.iter().map(Value::as_str).collect();
    match args {
        Some(args) => {
            let joined = args.join(" ");
            joined.contains("uuid") || joined.contains("gen_random_uuid")
        }
        None => false,
    }
}

fn has_uuid_name(name: &str) -> bool {
    name == "id" || name == "uuid" || name.ends_with("_id") || name.ends_with("_uuid")
}
