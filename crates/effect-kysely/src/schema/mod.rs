//! # Schema Trees
//!
//! A [`Schema`] is an immutable, reference-counted tree. Every transformation
//! (view derivation, union building, renames) allocates new nodes and shares
//! the untouched subtrees, so derived schemas can be handed to other tasks
//! without copying.
//!
//! ## Node kinds
//!
//! ```text
//! Never | Unknown | Undefined | Null
//! String | Number | BigInt | Boolean | Date | Uuid | Uint8Array
//! Literal("A", "B", ...)
//! Array(item)
//! Union(members...)
//! Struct { name[<- key]: schema, name?: schema, ... }
//! Column { select, insert, update }
//! ```
//!
//! `Column` is the column-visibility marker produced by
//! [`column_type`](crate::column_type) and [`generated`](crate::generated).
//! It only has meaning as the type of a struct property; the view deriver in
//! [`views`](crate::views) replaces it with one of its three sub-schemas.

use std::fmt;
use std::sync::Arc;

mod parse;

pub use parse::{ParseError, ParseIssue, PathSegment};

/// An immutable schema node.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    ast: Arc<Ast>,
}

/// The node payload of a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// Uninhabited. No value is ever accepted.
    Never,
    /// Any value is accepted unchanged.
    Unknown,
    /// Absent value. A JSON `null` stands in for it on input; encoded structs omit the key.
    Undefined,
    /// The `null` literal.
    Null,
    String,
    Number,
    BigInt,
    Boolean,
    /// RFC 3339 timestamp.
    Date,
    /// Hyphenated UUID string.
    Uuid,
    /// Byte array, encoded as an array of integers.
    Uint8Array,
    /// One of a fixed set of string literals (enum values).
    Literal(Vec<String>),
    Array(Schema),
    /// Flattened, deduplicated alternatives. Never has fewer than two members.
    Union(Vec<Schema>),
    Struct(TypeLiteral),
    Column(ColumnSchemas),
}

/// The ordered properties of a struct schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypeLiteral {
    pub properties: Vec<PropertySignature>,
}

impl TypeLiteral {
    /// Looks up a property by its in-memory name.
    pub fn property(&self, name: &str) -> Option<&PropertySignature> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A named property of a struct schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySignature {
    /// In-memory (decoded) property name.
    pub name: String,
    /// Storage (encoded) key, when it differs from `name`.
    pub from_key: Option<String>,
    pub schema: Schema,
    pub optional: bool,
}

impl PropertySignature {
    /// A property that must be present.
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            from_key: None,
            schema,
            optional: false,
        }
    }

    /// A property that may be left out.
    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            optional: true,
            ..Self::required(name, schema)
        }
    }

    /// Reads/writes this property under `key` on the encoded side.
    ///
    /// A key equal to the property name is not recorded.
    pub fn from_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.from_key = (key != self.name).then_some(key);
        self
    }

    /// The key this property uses in encoded (storage) records.
    pub fn encoded_key(&self) -> &str {
        self.from_key.as_deref().unwrap_or(&self.name)
    }

    /// Builds a new property with the same name and key but a different type.
    pub fn with_schema(&self, schema: Schema, optional: bool) -> Self {
        Self {
            name: self.name.clone(),
            from_key: self.from_key.clone(),
            schema,
            optional,
        }
    }
}

/// The three per-operation sub-schemas of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSchemas {
    pub select: Schema,
    pub insert: Schema,
    pub update: Schema,
}

impl Schema {
    pub fn new(ast: Ast) -> Self {
        Self { ast: Arc::new(ast) }
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn never() -> Self {
        Self::new(Ast::Never)
    }

    pub fn unknown() -> Self {
        Self::new(Ast::Unknown)
    }

    pub fn undefined() -> Self {
        Self::new(Ast::Undefined)
    }

    pub fn null() -> Self {
        Self::new(Ast::Null)
    }

    pub fn string() -> Self {
        Self::new(Ast::String)
    }

    pub fn number() -> Self {
        Self::new(Ast::Number)
    }

    pub fn bigint() -> Self {
        Self::new(Ast::BigInt)
    }

    pub fn boolean() -> Self {
        Self::new(Ast::Boolean)
    }

    pub fn date() -> Self {
        Self::new(Ast::Date)
    }

    pub fn uuid() -> Self {
        Self::new(Ast::Uuid)
    }

    pub fn uint8_array() -> Self {
        Self::new(Ast::Uint8Array)
    }

    pub fn literal<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Ast::Literal(values.into_iter().map(Into::into).collect()))
    }

    pub fn array(item: Schema) -> Self {
        Self::new(Ast::Array(item))
    }

    /// Builds a union, flattening nested unions and dropping duplicates and
    /// `Never` members. Zero members collapse to `Never`, one member to itself.
    pub fn union(members: impl IntoIterator<Item = Schema>) -> Self {
        let mut flat: Vec<Schema> = Vec::new();
        let mut push = |schema: &Schema| {
            if !schema.is_never() && !flat.contains(schema) {
                flat.push(schema.clone());
            }
        };

        for member in members {
            match member.ast() {
                Ast::Union(inner) => inner.iter().for_each(&mut push),
                _ => push(&member),
            }
        }

        match flat.len() {
            0 => Self::never(),
            1 => flat.remove(0),
            _ => Self::new(Ast::Union(flat)),
        }
    }

    /// `schema | undefined`
    pub fn undefined_or(schema: Schema) -> Self {
        Self::union([schema, Self::undefined()])
    }

    pub fn structure(properties: Vec<PropertySignature>) -> Self {
        Self::new(Ast::Struct(TypeLiteral { properties }))
    }

    pub fn is_never(&self) -> bool {
        matches!(self.ast(), Ast::Never)
    }

    pub fn as_struct(&self) -> Option<&TypeLiteral> {
        match self.ast() {
            Ast::Struct(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnSchemas> {
        match self.ast() {
            Ast::Column(columns) => Some(columns),
            _ => None,
        }
    }

    /// True for a union with an `undefined` or `null` alternative.
    pub fn admits_absence(&self) -> bool {
        match self.ast() {
            Ast::Union(members) => members
                .iter()
                .any(|m| matches!(m.ast(), Ast::Undefined | Ast::Null)),
            _ => false,
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ast() {
            Ast::Never => f.write_str("never"),
            Ast::Unknown => f.write_str("unknown"),
            Ast::Undefined => f.write_str("undefined"),
            Ast::Null => f.write_str("null"),
            Ast::String => f.write_str("string"),
            Ast::Number => f.write_str("number"),
            Ast::BigInt => f.write_str("bigint"),
            Ast::Boolean => f.write_str("boolean"),
            Ast::Date => f.write_str("Date"),
            Ast::Uuid => f.write_str("UUID"),
            Ast::Uint8Array => f.write_str("Uint8Array"),
            Ast::Literal(values) => {
                let quoted: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
                f.write_str(&quoted.join(" | "))
            }
            Ast::Array(item) => write!(f, "ReadonlyArray<{}>", item),
            Ast::Union(members) => {
                let rendered: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                f.write_str(&rendered.join(" | "))
            }
            Ast::Struct(literal) => {
                if literal.properties.is_empty() {
                    return f.write_str("{}");
                }
                let fields: Vec<String> = literal
                    .properties
                    .iter()
                    .map(|p| {
                        let marker = if p.optional { "?" } else { "" };
                        format!("readonly {}{}: {}", p.name, marker, p.schema)
                    })
                    .collect();
                write!(f, "{{ {} }}", fields.join("; "))
            }
            Ast::Column(columns) => write!(
                f,
                "ColumnType<{}, {}, {}>",
                columns.select, columns.insert, columns.update
            ),
        }
    }
}
