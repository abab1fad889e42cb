//! Discogen Code Generator
//!
//! Generates strongly-typed Rust data types from a discovery document.

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use discogen_gen::context::GenerationContext;
use discogen_gen::errors::GeneratorError;
use discogen_gen::naming::library_name;
use discogen_gen::output::{generate_and_write, load_document};
use tracing::{debug, info};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Discogen code generator - transforms discovery documents into typed Rust data types
#[derive(Parser, Debug)]
#[command(name = "discogen-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Discovery document (JSON) to generate code for
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for generated code
    #[arg(short, long, default_value = "src")]
    output: PathBuf,

    /// Module (file) name; defaults to the API name plus its version number
    #[arg(short, long)]
    module: Option<String>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize tracing based on verbosity; `RUST_LOG` takes precedence.
fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            1 => "warn,discogen_gen=info".to_string(),
            2 => "info,discogen_gen=debug".to_string(),
            _ => "debug,discogen_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_file(verbose >= 3)
                .with_line_number(verbose >= 3)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(?cli, "parsed arguments");

    let doc = load_document(&cli.input)?;
    let module = match cli.module {
        Some(module) => module,
        None => library_name(&doc.name, &doc.version)?,
    };

    let ctx = GenerationContext::new(&doc)?;
    info!(
        module = %module,
        schemas = doc.schemas.len(),
        activities = ctx.methods.len(),
        "generating schema module"
    );

    generate_and_write(&doc, &ctx, &cli.output, &module, cli.dry_run)?;

    if !cli.dry_run {
        eprintln!(
            "{} {} ({} schemas) -> {}",
            "Generated".green().bold(),
            module,
            doc.schemas.len(),
            cli.output.join(format!("{}.rs", module)).display()
        );
    }

    Ok(())
}
