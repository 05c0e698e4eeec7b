use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use struct2interface::{default_formatter, generate_interface, GenerateOptions, DEFAULT_TEMPLATE};

/// Extract an interface from the exported methods of a Golang struct
#[derive(Parser)]
#[command(name = "struct2interface")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory containing the Go package to scan
    #[arg(short, long)]
    folder: PathBuf,

    /// File the generated interface is written to
    #[arg(short, long)]
    output: PathBuf,

    /// Name of the package to scan
    #[arg(short, long)]
    package: String,

    /// Name of the struct whose methods form the interface
    #[arg(short = 's', long = "struct")]
    struct_name: String,

    /// Name of the generated interface
    #[arg(short, long)]
    interface: String,

    /// Template file overriding the built-in output layout
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("struct2interface=debug")
    } else {
        EnvFilter::new("struct2interface=info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let template = match &cli.template {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?,
        None => DEFAULT_TEMPLATE.to_string(),
    };

    let opts = GenerateOptions {
        source_dir: cli.folder,
        output_file: cli.output,
        package: cli.package,
        struct_name: cli.struct_name,
        interface_name: cli.interface,
        template,
    };
    let formatter = default_formatter();
    generate_interface(&opts, formatter.as_ref())?;
    Ok(())
}
