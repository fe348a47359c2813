//! # Operation Views
//!
//! Derives the `Selectable`, `Insertable` and `Updatable` shapes of a struct
//! schema whose properties may carry [`column_type`](crate::column_type)
//! markers.
//!
//! ```text
//!                     ┌─ select sub-schema ─────────────────────────▶ Selectable
//! Struct { p: Column ─┼─ insert sub-schema, optional if it admits ∅ ─▶ Insertable
//!                     └─ update sub-schema | undefined, optional ───▶ Updatable
//! ```
//!
//! Substitution runs before the `Never` filter: a column whose insert shape is
//! `Never` disappears from `Insertable` but keeps its select shape in
//! `Selectable`. Non-struct schemas pass through unchanged.

use crate::schema::{ColumnSchemas, PropertySignature, Schema, TypeLiteral};

/// Which sub-schema of a column a view reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Select,
    Insert,
    Update,
}

impl ColumnSchemas {
    pub fn for_view(&self, view: View) -> &Schema {
        match view {
            View::Select => &self.select,
            View::Insert => &self.insert,
            View::Update => &self.update,
        }
    }
}

/// The three operation views of one base schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Schemas {
    pub selectable: Schema,
    pub insertable: Schema,
    pub updatable: Schema,
}

impl Schemas {
    pub fn view(&self, view: View) -> &Schema {
        match view {
            View::Select => &self.selectable,
            View::Insert => &self.insertable,
            View::Update => &self.updatable,
        }
    }
}

/// Derives all three operation views.
pub fn get_schemas(base: &Schema) -> Schemas {
    Schemas {
        selectable: selectable(base),
        insertable: insertable(base),
        updatable: updatable(base),
    }
}

/// Every column as it reads back from the store.
pub fn selectable(schema: &Schema) -> Schema {
    let Some(literal) = schema.as_struct() else {
        return schema.clone();
    };
    Schema::structure(extract_properties(literal, View::Select))
}

/// The columns a client may supply on insert.
///
/// A property becomes optional once its insert shape admits `undefined` or
/// `null`.
pub fn insertable(schema: &Schema) -> Schema {
    let Some(literal) = schema.as_struct() else {
        return schema.clone();
    };

    let properties = extract_properties(literal, View::Insert)
        .into_iter()
        .map(|prop| {
            let optional = prop.optional || prop.schema.admits_absence();
            prop.with_schema(prop.schema.clone(), optional)
        })
        .collect();

    Schema::structure(properties)
}

/// The columns a client may change; every one of them can be left out.
pub fn updatable(schema: &Schema) -> Schema {
    let Some(literal) = schema.as_struct() else {
        return schema.clone();
    };

    let properties = extract_properties(literal, View::Update)
        .into_iter()
        .map(|prop| prop.with_schema(Schema::undefined_or(prop.schema.clone()), true))
        .collect();

    Schema::structure(properties)
}

fn extract_properties(literal: &TypeLiteral, view: View) -> Vec<PropertySignature> {
    literal
        .properties
        .iter()
        .map(|prop| match prop.schema.as_column() {
            Some(columns) => prop.with_schema(columns.for_view(view).clone(), prop.optional),
            None => prop.clone(),
        })
        .filter(|prop| !prop.schema.is_never())
        .collect()
}
