//! `GeneratorOptions` sent with the `generate` request.

use serde::Deserialize;

use super::Document;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub generator: GeneratorBlock,
    pub dmmf: Document,
}

/// The `generator` block of `schema.prisma`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorBlock {
    #[serde(default)]
    pub output: Option<EnvValue>,
}

/// A value that may come from an environment variable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvValue {
    #[serde(default)]
    pub value: Option<String>,
}

impl GeneratorBlock {
    /// The resolved `output` path, if one is configured.
    pub fn output_path(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|o| o.value.as_deref())
            .filter(|v| !v.is_empty())
    }
}
