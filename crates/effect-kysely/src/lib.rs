//! # effect-kysely
//!
//! Runtime support for schemas produced by `effect-kysely-codegen`.
//!
//! A generated model is a struct [`Schema`] whose columns may be wrapped in a
//! column-visibility marker:
//!
//! - [`column_type`] gives a column separate select, insert and update shapes
//!   (`Never` removes it from that operation).
//! - [`generated`] marks a column the store can fill in, so it becomes
//!   optional on insert.
//!
//! [`get_schemas`] turns the base schema into its three operation views, and
//! [`with_encoder`], [`with_decoder`] and [`with_codec`] run a database query
//! between an encode and/or decode step, reporting failures as a closed
//! [`DatabaseError`] set.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use effect_kysely::{column_type, generated, get_schemas, with_codec, PropertySignature, Schema};
//!
//! let user = Schema::structure(vec![
//!     PropertySignature::required("id", column_type(Schema::uuid(), Schema::never(), Schema::never())),
//!     PropertySignature::required("email", Schema::string()),
//!     PropertySignature::required("createdAt", generated(Schema::date())).from_key("created_at"),
//! ]);
//! let views = get_schemas(&user);
//!
//! let insert_user = with_codec(views.insertable.clone(), views.selectable.clone(), |row| async move {
//!     driver.insert_returning("users", row).await
//! });
//! let created = insert_user(serde_json::json!({ "email": "a@example.com" })).await?;
//! ```

mod column;
mod error;
mod query;
pub mod schema;
pub mod views;

pub use column::{column_type, generated};
pub use error::{BoxError, DatabaseError, NoResultError};
pub use query::{with_codec, with_decoder, with_encoder, QueryFuture};
pub use schema::{Ast, ColumnSchemas, ParseError, ParseIssue, PathSegment, PropertySignature, Schema, TypeLiteral};
pub use views::{get_schemas, insertable, selectable, updatable, Schemas, View};
