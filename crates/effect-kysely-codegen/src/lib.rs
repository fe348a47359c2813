//! # effect-kysely-codegen
//!
//! Generates Effect Schema + Kysely TypeScript from a Prisma DMMF document.
//!
//! ## Architecture
//!
//! ```text
//! DMMF JSON
//!        │
//!        ▼
//! ┌──────────────┐
//! │     DMMF     │  serde model of models, fields, enums
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Mapper    │  field → TypeExpr (UUID heuristic, wrappers)
//! └──────┬───────┘
//!        │
//!        ├─────────────────────┐
//!        ▼                     ▼
//! ┌──────────────┐      ┌──────────────┐
//! │   Codegen    │      │ Materialize  │
//! │ (TypeExpr →  │      │ (TypeExpr →  │
//! │  TypeScript) │      │  Schema)     │
//! └──────────────┘      └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use effect_kysely_codegen::{dmmf::Document, Generator, GeneratorConfig};
//!
//! let document = Document::from_json(&std::fs::read_to_string("dmmf.json")?)?;
//! let generator = Generator::new(GeneratorConfig::new("src/generated"))?;
//! generator.generate(&document).await?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod dmmf;
pub mod mapper;
pub mod materialize;

use std::path::{Path, PathBuf};

use tracing::info;

pub use codegen::GeneratedCode;
pub use config::GeneratorConfig;
pub use diagnostic::GeneratorError;
pub use materialize::{model_schema, model_schemas, ModelSchema};

/// Writes the generated TypeScript for a DMMF document.
#[derive(Debug)]
pub struct Generator {
    output_dir: PathBuf,
}

impl Generator {
    /// Creates a generator. Fails if no output directory is configured.
    pub fn new(config: GeneratorConfig) -> Result<Self, GeneratorError> {
        let output_dir = config
            .output_dir
            .filter(|dir| !dir.as_os_str().is_empty())
            .ok_or(GeneratorError::MissingOutput)?;
        Ok(Self { output_dir })
    }

    pub fn from_options(options: &dmmf::GeneratorOptions) -> Result<Self, GeneratorError> {
        Self::new(GeneratorConfig::from_options(options))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Generates `enums.ts`, `types.ts` and `index.ts` into the output
    /// directory, creating it if needed.
    pub async fn generate(&self, document: &dmmf::Document) -> Result<GenerateResult, GeneratorError> {
        let models = document.datamodel.schema_models().len();
        let enums = document.datamodel.enums.len();

        info!("Starting generation...");
        info!(models, enums, "Processing {} models, {} enums", models, enums);

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| GeneratorError::io(&self.output_dir, e.to_string()))?;

        let generated = generate_files(document);
        let [enums_file, types_file, index_file] = [
            codegen::ENUMS_FILE,
            codegen::TYPES_FILE,
            codegen::INDEX_FILE,
        ]
        .map(|name| generated.file(name).unwrap_or_default());

        tokio::try_join!(
            self.write_file(codegen::ENUMS_FILE, enums_file),
            self.write_file(codegen::TYPES_FILE, types_file),
            self.write_file(codegen::INDEX_FILE, index_file),
        )?;

        info!(output = %self.output_dir.display(), "Generated to {}", self.output_dir.display());
        info!("Files: enums.ts, types.ts, index.ts");

        Ok(GenerateResult {
            models,
            enums,
            files: generated.files.into_iter().map(|(name, _)| name).collect(),
        })
    }

    async fn write_file(&self, filename: &str, content: &str) -> Result<(), GeneratorError> {
        let path = self.output_dir.join(filename);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| GeneratorError::io(path, e.to_string()))
    }
}

/// Renders the output files without touching the filesystem.
pub fn generate_files(document: &dmmf::Document) -> GeneratedCode {
    codegen::generate(document)
}

/// Result of a successful generation.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of model schemas generated.
    pub models: usize,
    /// Number of enum schemas generated.
    pub enums: usize,
    /// Names of the files written.
    pub files: Vec<String>,
}
