//! TypeScript code generation from the DMMF datamodel.
//!
//! Three files are produced:
//! - `enums.ts`: one `Schema.Literal` per Prisma enum
//! - `types.ts`: one `Schema.Struct` per model plus the Kysely `DB` interface
//! - `index.ts`: re-exports

mod enums;
mod index;
mod types;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::dmmf::Document;

pub const ENUMS_FILE: &str = "enums.ts";
pub const TYPES_FILE: &str = "types.ts";
pub const INDEX_FILE: &str = "index.ts";

/// Generated TypeScript code.
#[derive(Debug, Clone)]
pub struct GeneratedCode {
    /// Map of filename to content.
    pub files: Vec<(String, String)>,
}

impl GeneratedCode {
    pub fn file(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(filename, _)| filename == name)
            .map(|(_, content)| content.as_str())
    }
}

/// Generates all output files, stamped with the current time.
pub fn generate(document: &Document) -> GeneratedCode {
    generate_at(document, Utc::now())
}

/// Generates all output files with a fixed header timestamp.
pub fn generate_at(document: &Document, generated_at: DateTime<Utc>) -> GeneratedCode {
    let header = file_header(generated_at);
    let datamodel = &document.datamodel;

    GeneratedCode {
        files: vec![
            (ENUMS_FILE.to_string(), enums::generate_enums_file(&header, datamodel)),
            (TYPES_FILE.to_string(), types::generate_types_file(&header, datamodel)),
            (INDEX_FILE.to_string(), index::generate_index_file()),
        ],
    }
}

fn file_header(generated_at: DateTime<Utc>) -> String {
    format!(
        "/**\n * Generated: {}\n * DO NOT EDIT MANUALLY\n */",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
