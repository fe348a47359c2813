//! Field type resolution.
//!
//! Prisma field metadata goes in, a [`TypeExpr`] comes out. Wrapping order is
//! fixed: base type, list, undefined-or, column visibility, storage key.
//! Resolution never fails; anything unrecognized becomes `Schema.Unknown`.

mod type_expr;
mod uuid;

use crate::dmmf::{Field, FieldKind};

pub use type_expr::{EnumRegistry, ScalarSchema, TypeExpr};
pub use uuid::is_uuid_field;

/// What a field needs beyond its base type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypeMetadata {
    /// Base type with list and undefined-or wrapping applied.
    pub base_type: TypeExpr,
    /// Store fills it in; optional on insert.
    pub needs_generated: bool,
    /// Store fills it in and it is an id; never inserted or updated.
    pub needs_column_type: bool,
}

/// Maps a Prisma scalar name to its schema.
pub fn scalar_schema(type_name: &str) -> Option<ScalarSchema> {
    let scalar = match type_name {
        "String" => ScalarSchema::String,
        "Int" | "Float" => ScalarSchema::Number,
        "BigInt" => ScalarSchema::BigInt,
        // String keeps precision
        "Decimal" => ScalarSchema::String,
        "Boolean" => ScalarSchema::Boolean,
        "DateTime" => ScalarSchema::Date,
        "Json" => ScalarSchema::Unknown,
        "Bytes" => ScalarSchema::Uint8Array,
        _ => return None,
    };
    Some(scalar)
}

fn base_type(field: &Field, enums: &EnumRegistry) -> TypeExpr {
    if field.kind == FieldKind::Unsupported {
        return ScalarSchema::Unknown.into();
    }
    if field.type_name == "String" && is_uuid_field(field) {
        return ScalarSchema::Uuid.into();
    }
    if let Some(scalar) = scalar_schema(&field.type_name) {
        return scalar.into();
    }
    if enums.contains(&field.type_name) {
        return TypeExpr::Enum(field.type_name.clone());
    }
    ScalarSchema::Unknown.into()
}

/// Resolves a field's base type and visibility flags.
pub fn resolve(field: &Field, enums: &EnumRegistry) -> FieldTypeMetadata {
    let mut base = base_type(field, enums);

    if field.is_list {
        base = TypeExpr::array(base);
    }
    if !field.is_required && !field.has_default_value {
        base = TypeExpr::undefined_or(base);
    }

    let needs_column_type = field.has_default_value && field.is_id;
    let needs_generated = field.has_default_value && !field.is_id;

    FieldTypeMetadata {
        base_type: base,
        needs_generated,
        needs_column_type,
    }
}

/// Applies the visibility wrapper and storage-key rename to resolved metadata.
pub fn build_field_type(field: &Field, metadata: FieldTypeMetadata) -> TypeExpr {
    let mut expr = metadata.base_type;

    if metadata.needs_column_type {
        expr = TypeExpr::read_only(expr);
    } else if metadata.needs_generated {
        expr = TypeExpr::generated(expr);
    }

    match field.storage_name() {
        Some(key) => TypeExpr::from_key(expr, key),
        None => expr,
    }
}

/// The complete type expression for a field.
pub fn field_type(field: &Field, enums: &EnumRegistry) -> TypeExpr {
    build_field_type(field, resolve(field, enums))
}
