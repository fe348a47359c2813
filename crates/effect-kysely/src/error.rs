//! Error types for query pipelines.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::schema::ParseError;

/// Error type returned by query functions.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Raised by a query function when its statement matched no row.
///
/// Query pipelines translate it into [`DatabaseError::NotFound`].
#[derive(Debug, Clone, Copy, Default, Error)]
#[error("no result")]
pub struct NoResultError;

/// Errors produced by [`with_encoder`](crate::with_encoder),
/// [`with_decoder`](crate::with_decoder) and [`with_codec`](crate::with_codec).
#[derive(Debug, Clone, Error)]
pub enum DatabaseError {
    #[error("no matching row")]
    NotFound,

    #[error("query failed: {message}")]
    Query {
        message: String,
        #[source]
        cause: Arc<dyn StdError + Send + Sync + 'static>,
    },

    #[error("schema mismatch: {0}")]
    Parse(#[from] ParseError),
}

impl DatabaseError {
    /// Classifies a failure reported by a query function.
    pub fn from_query_failure(error: BoxError) -> Self {
        if error.is::<NoResultError>() {
            return Self::NotFound;
        }

        Self::Query {
            message: error.to_string(),
            cause: Arc::from(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_result_maps_to_not_found() {
        let err = DatabaseError::from_query_failure(Box::new(NoResultError));
        assert!(matches!(err, DatabaseError::NotFound));
    }

    #[test]
    fn other_failures_keep_message_and_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset");
        let err = DatabaseError::from_query_failure(Box::new(io));

        match &err {
            DatabaseError::Query { message, cause } => {
                assert_eq!(message, "connection reset");
                assert!(cause.downcast_ref::<std::io::Error>().is_some());
            }
            other => panic!("expected Query, got {:?}", other),
        }
        assert_eq!(err.to_string(), "query failed: connection reset");
        assert!(err.source().is_some());
    }
}
