//! Debug script to see what the mapper resolves for a DMMF file.
//!
//! Usage: `debug_dmmf <dmmf.json>`

use effect_kysely_codegen::dmmf::Document;
use effect_kysely_codegen::mapper::{field_type, resolve, EnumRegistry};
use effect_kysely_codegen::model_schemas;

fn main() {
    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: debug_dmmf <dmmf.json>");
        std::process::exit(2);
    };

    let document = match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Document::from_json(&json).map_err(|e| e.to_string()))
    {
        Ok(document) => document,
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let enums = EnumRegistry::from_datamodel(&document.datamodel);
    println!("Enums: {}", enums.len());

    for model in document.datamodel.schema_models() {
        println!("\n{} ({})", model.name, model.table_name());
        for field in model.schema_fields() {
            let meta = resolve(field, &enums);
            println!(
                "  {}: {}  [generated: {}, column_type: {}]",
                field.name,
                field_type(field, &enums),
                meta.needs_generated,
                meta.needs_column_type
            );
        }
    }

    println!("\nViews:");
    for schema in model_schemas(&document.datamodel) {
        println!("  {}", schema.name);
        println!("    Selectable: {}", schema.views.selectable);
        println!("    Insertable: {}", schema.views.insertable);
        println!("    Updatable:  {}", schema.views.updatable);
    }
}
