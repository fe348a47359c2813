//! `index.ts` generation.

/// Re-exports the enums and types modules.
pub fn generate_index_file() -> String {
    "export * from \"./enums\";\nexport * from \"./types\";".to_string()
}
