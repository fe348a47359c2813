//! # Query Pipelines
//!
//! Wraps a caller-supplied async query function with schema encoding of its
//! input and/or decoding of its output:
//!
//! ```text
//! with_encoder:  input ─encode─▶ query ─────────▶ raw output
//! with_decoder:           query ─decode─▶ output
//! with_codec:    input ─encode─▶ query ─decode─▶ output
//! ```
//!
//! Each stage short-circuits: a failed encode never calls the query, and a
//! failed query never reaches decode. Failures come back as
//! [`DatabaseError`] values.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use crate::error::{BoxError, DatabaseError};
use crate::schema::Schema;

/// The future returned by a prepared pipeline.
pub type QueryFuture<T> = BoxFuture<'static, Result<T, DatabaseError>>;

/// Encodes the input with `encoder`, then runs `query` on the encoded value.
pub fn with_encoder<Q, Fut, O>(encoder: Schema, query: Q) -> impl Fn(Value) -> QueryFuture<O> + Send + Sync
where
    Q: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, BoxError>> + Send + 'static,
    O: Send + 'static,
{
    let query = Arc::new(query);
    move |input| encode_then_query(encoder.clone(), Arc::clone(&query), input).boxed()
}

/// Runs `query`, then decodes its result with `decoder`.
pub fn with_decoder<Q, Fut>(decoder: Schema, query: Q) -> impl Fn() -> QueryFuture<Value> + Send + Sync
where
    Q: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    let query = Arc::new(query);
    move || {
        let decoder = decoder.clone();
        let query = Arc::clone(&query);
        async move {
            let raw = call((*query)()).await?;
            decode(&decoder, &raw)
        }
        .boxed()
    }
}

/// Encodes the input, runs `query`, and decodes its result.
pub fn with_codec<Q, Fut>(
    encoder: Schema,
    decoder: Schema,
    query: Q,
) -> impl Fn(Value) -> QueryFuture<Value> + Send + Sync
where
    Q: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
{
    let query = Arc::new(query);
    move |input| {
        let encoder = encoder.clone();
        let decoder = decoder.clone();
        let query = Arc::clone(&query);
        async move {
            let raw = encode_then_query(encoder, query, input).await?;
            decode(&decoder, &raw)
        }
        .boxed()
    }
}

async fn encode_then_query<Q, Fut, O>(encoder: Schema, query: Arc<Q>, input: Value) -> Result<O, DatabaseError>
where
    Q: Fn(Value) -> Fut,
    Fut: Future<Output = Result<O, BoxError>>,
{
    let encoded = encoder.encode(&input)?;
    call((*query)(encoded)).await
}

async fn call<O>(query: impl Future<Output = Result<O, BoxError>>) -> Result<O, DatabaseError> {
    query.await.map_err(|error| {
        tracing::debug!(%error, "query function failed");
        DatabaseError::from_query_failure(error)
    })
}

fn decode(decoder: &Schema, raw: &Value) -> Result<Value, DatabaseError> {
    decoder.decode(raw).map_err(DatabaseError::Parse)
}
