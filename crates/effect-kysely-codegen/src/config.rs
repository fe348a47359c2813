//! Generator configuration.

use std::path::PathBuf;

use crate::dmmf::GeneratorOptions;

/// Configuration for the Effect Schema generator.
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Directory to write `enums.ts`, `types.ts` and `index.ts` into.
    ///
    /// Comes from `output` in the `generator` block; required.
    pub output_dir: Option<PathBuf>,
}

impl GeneratorConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
        }
    }

    /// Reads the configuration Prisma sends with a `generate` request.
    pub fn from_options(options: &GeneratorOptions) -> Self {
        Self {
            output_dir: options.generator.output_path().map(PathBuf::from),
        }
    }
}
