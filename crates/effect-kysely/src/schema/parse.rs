//! Structural decode/encode of JSON values against a [`Schema`].
//!
//! Decoding turns a storage record (keys from `from_key`) into an in-memory
//! record (keys from property names); encoding goes the other way. Both
//! directions apply the same shape checks.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use super::{Ast, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Decode,
    Encode,
}

/// Why a value was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseIssue {
    /// The value does not have the expected shape.
    #[error("Expected {expected}, actual {actual}")]
    Type { expected: String, actual: Value },
    /// A required property is absent.
    #[error("is missing")]
    Missing,
}

/// One step into a nested value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "[{:?}]", key),
            Self::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// A rejected value, with the location of the offending part.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}{}", path_prefix(.path), .issue)]
pub struct ParseError {
    pub path: Vec<PathSegment>,
    pub issue: ParseIssue,
}

impl ParseError {
    fn type_mismatch(expected: &Schema, actual: &Value) -> Self {
        Self {
            path: Vec::new(),
            issue: ParseIssue::Type {
                expected: expected.to_string(),
                actual: actual.clone(),
            },
        }
    }

    fn missing() -> Self {
        Self {
            path: Vec::new(),
            issue: ParseIssue::Missing,
        }
    }

    fn within(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }
}

/// `["posts"][0]: ` for a nested failure, nothing at the root.
fn path_prefix(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let mut prefix: String = path.iter().map(ToString::to_string).collect();
    prefix.push_str(": ");
    prefix
}

impl Schema {
    /// Decodes a storage-side value into its in-memory shape.
    pub fn decode(&self, input: &Value) -> Result<Value, ParseError> {
        parse(self, input, Direction::Decode)
    }

    /// Encodes an in-memory value into its storage-side shape.
    pub fn encode(&self, input: &Value) -> Result<Value, ParseError> {
        parse(self, input, Direction::Encode)
    }
}

fn parse(schema: &Schema, input: &Value, direction: Direction) -> Result<Value, ParseError> {
    let accepted = match schema.ast() {
        Ast::Never => false,
        Ast::Unknown => true,
        Ast::Undefined | Ast::Null => input.is_null(),
        Ast::String => input.is_string(),
        Ast::Number => input.is_number(),
        Ast::Boolean => input.is_boolean(),
        Ast::BigInt => is_bigint(input),
        Ast::Date => input
            .as_str()
            .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok()),
        Ast::Uuid => input
            .as_str()
            .is_some_and(|s| s.len() == 36 && uuid::Uuid::parse_str(s).is_ok()),
        Ast::Uint8Array => input.as_array().is_some_and(|bytes| {
            bytes
                .iter()
                .all(|b| b.as_u64().is_some_and(|n| n <= u64::from(u8::MAX)))
        }),
        Ast::Literal(values) => input
            .as_str()
            .is_some_and(|s| values.iter().any(|v| v == s)),
        Ast::Array(item) => return parse_array(schema, item, input, direction),
        Ast::Union(members) => {
            return members
                .iter()
                .find_map(|member| parse(member, input, direction).ok())
                .ok_or_else(|| ParseError::type_mismatch(schema, input));
        }
        Ast::Struct(_) => return parse_struct(schema, input, direction),
        Ast::Column(columns) => return parse(&columns.select, input, direction),
    };

    if accepted {
        Ok(input.clone())
    } else {
        Err(ParseError::type_mismatch(schema, input))
    }
}

fn is_bigint(input: &Value) -> bool {
    match input {
        Value::Number(n) => n.is_i64() || n.is_u64(),
        Value::String(s) => {
            let digits = s.strip_prefix('-').unwrap_or(s);
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        }
        _ => false,
    }
}

fn parse_array(
    schema: &Schema,
    item: &Schema,
    input: &Value,
    direction: Direction,
) -> Result<Value, ParseError> {
    let Some(elements) = input.as_array() else {
        return Err(ParseError::type_mismatch(schema, input));
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            parse(item, element, direction).map_err(|e| e.within(PathSegment::Index(index)))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn parse_struct(schema: &Schema, input: &Value, direction: Direction) -> Result<Value, ParseError> {
    let (Some(literal), Some(record)) = (schema.as_struct(), input.as_object()) else {
        return Err(ParseError::type_mismatch(schema, input));
    };

    let mut output = Map::new();
    for property in &literal.properties {
        let (read_key, write_key) = match direction {
            Direction::Decode => (property.encoded_key(), property.name.as_str()),
            Direction::Encode => (property.name.as_str(), property.encoded_key()),
        };

        match record.get(read_key) {
            // JSON has no `undefined`; a null for a property that only admits
            // undefined means the property is absent.
            Some(value) if value.is_null() && omits_null(&property.schema) => {}
            Some(value) => {
                let parsed = parse(&property.schema, value, direction)
                    .map_err(|e| e.within(PathSegment::Key(property.name.clone())))?;
                output.insert(write_key.to_string(), parsed);
            }
            None if property.optional => {}
            None => {
                return Err(ParseError::missing().within(PathSegment::Key(property.name.clone())));
            }
        }
    }

    Ok(Value::Object(output))
}

fn omits_null(schema: &Schema) -> bool {
    admits(schema, &|ast| matches!(ast, Ast::Undefined))
        && !admits(schema, &|ast| matches!(ast, Ast::Null | Ast::Unknown))
}

/// Whether `schema`, or any union member or column select side of it, matches `leaf`.
fn admits(schema: &Schema, leaf: &dyn Fn(&Ast) -> bool) -> bool {
    match schema.ast() {
        Ast::Union(members) => members.iter().any(|member| admits(member, leaf)),
        Ast::Column(columns) => admits(&columns.select, leaf),
        ast => leaf(ast),
    }
}
