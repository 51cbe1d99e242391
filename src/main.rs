use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chatmark::{Config, Error, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chatmark")]
#[command(about = "Render chat markdown to HTML or JSON content nodes")]
struct Cli {
    /// Input Markdown file (reads stdin when absent or `-`)
    input: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Config file (defaults to chatmark.toml in the current directory, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Html,
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let markdown = read_input(cli.input.as_deref())?;

    let rendered = match cli.format {
        Format::Html => {
            let config = match &cli.config {
                Some(path) => Config::from_path(path)?,
                None => Config::load(Path::new("chatmark.toml")),
            };
            chatmark::markdown_to_html_with_config(&markdown, &config)
        }
        Format::Json => {
            let nodes = chatmark::render(&markdown);
            let mut json = serde_json::to_string_pretty(&nodes)?;
            json.push('\n');
            json
        }
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => {
            io::stdout()
                .write_all(rendered.as_bytes())
                .map_err(|source| Error::Write {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }

    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => io::read_to_string(io::stdin()).map_err(|source| Error::Read {
            path: PathBuf::from("<stdin>"),
            source,
        }),
    }
}
