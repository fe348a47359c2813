//! Prisma generator protocol.
//!
//! Prisma spawns the generator and talks JSON-RPC 2.0 to it: one request per
//! line on stdin, one response per line on stderr.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use effect_kysely_codegen::dmmf::GeneratorOptions;
use effect_kysely_codegen::Generator;

pub const DEFAULT_OUTPUT: &str = "../generated";
pub const PRETTY_NAME: &str = "Prisma Effect Kysely Schema Generator";

/// Generic failure while handling a request.
pub const SERVER_ERROR: i64 = -32000;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const PARSE_ERROR: i64 = -32700;

#[derive(Debug, Deserialize)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default)]
    pub id: Value,
}

#[derive(Debug, Serialize)]
pub struct Response {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl Response {
    fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn err(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub version: &'static str,
    pub default_output: &'static str,
    pub pretty_name: &'static str,
    pub requires_generators: Vec<&'static str>,
}

pub fn manifest() -> Manifest {
    Manifest {
        version: env!("CARGO_PKG_VERSION"),
        default_output: DEFAULT_OUTPUT,
        pretty_name: PRETTY_NAME,
        requires_generators: vec!["prisma-client-js"],
    }
}

/// Handles one request.
pub async fn handle(request: Request) -> Response {
    debug!(method = %request.method, "generator request");

    match request.method.as_str() {
        "getManifest" => Response::ok(request.id, serde_json::json!({ "manifest": manifest() })),
        "generate" => match generate(request.params).await {
            Ok(()) => Response::ok(request.id, Value::Null),
            Err(message) => {
                warn!(%message, "generation failed");
                Response::err(request.id, SERVER_ERROR, message)
            }
        },
        other => Response::err(request.id, METHOD_NOT_FOUND, format!("Method not found: {}", other)),
    }
}

async fn generate(params: Value) -> Result<(), String> {
    let options: GeneratorOptions = serde_json::from_value(params).map_err(|e| e.to_string())?;
    let generator = Generator::from_options(&options).map_err(|e| e.to_string())?;
    generator
        .generate(&options.dmmf)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Serves requests until `input` reaches EOF.
pub async fn serve<R, W>(input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => handle(request).await,
            Err(e) => Response::err(Value::Null, PARSE_ERROR, e.to_string()),
        };

        let mut encoded = serde_json::to_vec(&response).map_err(std::io::Error::other)?;
        encoded.push(b'\n');
        output.write_all(&encoded).await?;
        output.flush().await?;
    }

    Ok(())
}
