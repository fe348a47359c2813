//! Field type expressions.
//!
//! A [`TypeExpr`] is built once per field and then either rendered as Effect
//! Schema source text or materialized into an [`effect_kysely::Schema`].

use std::collections::BTreeMap;
use std::fmt;

use effect_kysely::{column_type, generated, PropertySignature, Schema};

/// Leaf schemas a field can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarSchema {
    String,
    Number,
    BigInt,
    Boolean,
    Date,
    Unknown,
    Uint8Array,
    Uuid,
    Never,
}

impl ScalarSchema {
    pub fn ts_name(self) -> &'static str {
        match self {
            ScalarSchema::String => "Schema.String",
            ScalarSchema::Number => "Schema.Number",
            ScalarSchema::BigInt => "Schema.BigInt",
            ScalarSchema::Boolean => "Schema.Boolean",
            ScalarSchema::Date => "Schema.Date",
            ScalarSchema::Unknown => "Schema.Unknown",
            ScalarSchema::Uint8Array => "Schema.Uint8Array",
            ScalarSchema::Uuid => "Schema.UUID",
            ScalarSchema::Never => "Schema.Never",
        }
    }

    pub fn to_schema(self) -> Schema {
        match self {
            ScalarSchema::String => Schema::string(),
            ScalarSchema::Number => Schema::number(),
            ScalarSchema::BigInt => Schema::bigint(),
            ScalarSchema::Boolean => Schema::boolean(),
            ScalarSchema::Date => Schema::date(),
            ScalarSchema::Unknown => Schema::unknown(),
            ScalarSchema::Uint8Array => Schema::uint8_array(),
            ScalarSchema::Uuid => Schema::uuid(),
            ScalarSchema::Never => Schema::never(),
        }
    }
}

/// Enum name to its literal values, as stored in the database.
#[derive(Debug, Clone, Default)]
pub struct EnumRegistry {
    enums: BTreeMap<String, Vec<String>>,
}

impl EnumRegistry {
    pub fn from_datamodel(datamodel: &crate::dmmf::Datamodel) -> Self {
        let enums = datamodel
            .enums
            .iter()
            .map(|e| {
                let values = e.values.iter().map(|v| v.stored_value().to_string()).collect();
                (e.name.clone(), values)
            })
            .collect();
        Self { enums }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.enums.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

/// The schema of one model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Scalar(ScalarSchema),
    /// Reference to a generated enum schema.
    Enum(String),
    Array(Box<TypeExpr>),
    UndefinedOr(Box<TypeExpr>),
    ColumnType {
        select: Box<TypeExpr>,
        insert: Box<TypeExpr>,
        update: Box<TypeExpr>,
    },
    Generated(Box<TypeExpr>),
    /// Property read from a different key on the encoded side (`@map`).
    FromKey { inner: Box<TypeExpr>, key: String },
}

impl TypeExpr {
    pub fn array(item: TypeExpr) -> Self {
        TypeExpr::Array(Box::new(item))
    }

    pub fn undefined_or(inner: TypeExpr) -> Self {
        TypeExpr::UndefinedOr(Box::new(inner))
    }

    /// Selectable only: never inserted, never updated.
    pub fn read_only(select: TypeExpr) -> Self {
        TypeExpr::ColumnType {
            select: Box::new(select),
            insert: Box::new(TypeExpr::Scalar(ScalarSchema::Never)),
            update: Box::new(TypeExpr::Scalar(ScalarSchema::Never)),
        }
    }

    pub fn generated(inner: TypeExpr) -> Self {
        TypeExpr::Generated(Box::new(inner))
    }

    pub fn from_key(inner: TypeExpr, key: impl Into<String>) -> Self {
        TypeExpr::FromKey {
            inner: Box::new(inner),
            key: key.into(),
        }
    }

    /// Materializes the expression. Unknown enum references become `Unknown`.
    pub fn to_schema(&self, enums: &EnumRegistry) -> Schema {
        match self {
            TypeExpr::Scalar(scalar) => scalar.to_schema(),
            TypeExpr::Enum(name) => match enums.values(name) {
                Some(values) => Schema::literal(values.iter().cloned()),
                None => Schema::unknown(),
            },
            TypeExpr::Array(item) => Schema::array(item.to_schema(enums)),
            TypeExpr::UndefinedOr(inner) => Schema::undefined_or(inner.to_schema(enums)),
            TypeExpr::ColumnType {
                select,
                insert,
                update,
            } => column_type(
                select.to_schema(enums),
                insert.to_schema(enums),
                update.to_schema(enums),
            ),
            TypeExpr::Generated(inner) => generated(inner.to_schema(enums)),
            TypeExpr::FromKey { inner, .. } => inner.to_schema(enums),
        }
    }

    /// Materializes the expression as the property `name` of a struct.
    pub fn to_property(&self, name: &str, enums: &EnumRegistry) -> PropertySignature {
        match self {
            TypeExpr::FromKey { inner, key } => inner.to_property(name, enums).from_key(key.as_str()),
            other => PropertySignature::required(name, other.to_schema(enums)),
        }
    }
}

impl From<ScalarSchema> for TypeExpr {
    fn from(scalar: ScalarSchema) -> Self {
        TypeExpr::Scalar(scalar)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Scalar(scalar) => f.write_str(scalar.ts_name()),
            TypeExpr::Enum(name) => f.write_str(name),
            TypeExpr::Array(item) => write!(f, "Schema.Array({})", item),
            TypeExpr::UndefinedOr(inner) => write!(f, "Schema.UndefinedOr({})", inner),
            TypeExpr::ColumnType {
                select,
                insert,
                update,
            } => write!(f, "columnType({}, {}, {})", select, insert, update),
            TypeExpr::Generated(inner) => write!(f, "generated({})", inner),
            TypeExpr::FromKey { inner, key } => write!(
                f,
                "Schema.propertySignature({}).pipe(Schema.fromKey(\"{}\"))",
                inner, key
            ),
        }
    }
}
