//! prisma-effect-kysely CLI.
//!
//! Run by Prisma as a generator (no arguments), or standalone against a DMMF
//! JSON file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use effect_kysely_codegen::dmmf::Document;
use effect_kysely_codegen::{Generator, GeneratorConfig};

mod rpc;
mod ui;

#[derive(Parser)]
#[command(name = "prisma-effect-kysely")]
#[command(about = "Generates Effect Schema + Kysely types from a Prisma schema")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate from a DMMF JSON file
    Generate {
        /// DMMF JSON (`{ "datamodel": ... }` or `{ "dmmf": { "datamodel": ... } }`)
        #[arg(short, long)]
        dmmf: PathBuf,

        /// Output directory for enums.ts, types.ts and index.ts
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the generator manifest
    Manifest,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        // No command = Prisma generator protocol
        None => {
            // stderr carries protocol responses; logs go to stdout, which Prisma shows
            init_logging(false);
            rpc::serve(BufReader::new(tokio::io::stdin()), tokio::io::stderr())
                .await
                .map_err(|e| miette::miette!("Generator protocol failed: {}", e))?;
        }

        Some(Commands::Generate { dmmf, output }) => {
            init_logging(true);
            generate_from_file(&dmmf, output).await?;
        }

        Some(Commands::Manifest) => {
            let manifest = serde_json::to_string_pretty(&rpc::manifest())
                .map_err(|e| miette::miette!("{}", e))?;
            println!("{}", manifest);
        }
    }

    Ok(())
}

/// `RUST_LOG` filtering, `info` by default.
fn init_logging(to_stderr: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    if to_stderr {
        builder.with_writer(std::io::stderr).init();
    } else {
        builder.with_writer(std::io::stdout).init();
    }
}

async fn generate_from_file(dmmf: &Path, output: PathBuf) -> miette::Result<()> {
    let started = Instant::now();
    let spinner = ui::spinner("Reading DMMF...");

    let json = match tokio::fs::read_to_string(dmmf).await {
        Ok(json) => json,
        Err(e) => {
            spinner.finish_and_clear();
            ui::error_header();
            return Err(miette::miette!("Failed to read '{}': {}", dmmf.display(), e));
        }
    };

    spinner.set_message("Generating schemas...");
    let result = async {
        let document = Document::from_json(&json)?;
        let generator = Generator::new(GeneratorConfig::new(output))?;
        let result = generator.generate(&document).await?;
        Ok::<_, effect_kysely_codegen::GeneratorError>((generator, result))
    }
    .await;
    spinner.finish_and_clear();

    let (generator, result) = match result {
        Ok(done) => done,
        Err(e) => {
            ui::error_header();
            return Err(e.into());
        }
    };

    ui::success(&format!("Generated to {}", generator.output_dir().display()));
    ui::dim(&ui::summary_line(result.models, result.enums));
    println!();
    let last = result.files.len().saturating_sub(1);
    for (i, file) in result.files.iter().enumerate() {
        let description = match file.as_str() {
            "enums.ts" => "enum literal schemas",
            "types.ts" => "model schemas + DB interface",
            _ => "re-exports",
        };
        ui::tree_item(file, description, i == last);
    }
    println!();
    ui::info(&format!("Done in {}ms", started.elapsed().as_millis()));

    Ok(())
}
