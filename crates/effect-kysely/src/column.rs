//! Column-visibility wrappers.

use crate::schema::{Ast, ColumnSchemas, Schema};

/// Marks a column with distinct select, insert and update shapes.
///
/// Passing [`Schema::never`] for `insert` or `update` removes the column from
/// that operation view entirely.
pub fn column_type(select: Schema, insert: Schema, update: Schema) -> Schema {
    Schema::new(Ast::Column(ColumnSchemas {
        select,
        insert,
        update,
    }))
}

/// A column the store can fill in: optional on insert, otherwise unchanged.
pub fn generated(schema: Schema) -> Schema {
    column_type(schema.clone(), Schema::undefined_or(schema.clone()), schema)
}
