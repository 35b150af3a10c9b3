use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use transname::config::{self, DEFAULT_SEGMENT_BYTES};
use transname::models::{Format, ReleaseInfo};
use transname::path;

#[derive(Parser)]
#[command(name = "transname", about = "Name directories for transcoded music releases")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the directory a transcode of SOURCE_DIR should be written to
    Dir {
        /// Directory holding the source FLAC release
        source_dir: PathBuf,

        /// Target format: FLAC, 320, V0 or V2
        #[arg(long, short)]
        format: Format,

        /// Release metadata as a .json or .toml file
        #[arg(long)]
        info: PathBuf,

        /// Directory the transcode is created in
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Keep the full name even if files inside would exceed the path limit
        #[arg(long)]
        no_smart: bool,
    },
    /// Print NAME with characters that are illegal in file names removed
    Sanitize {
        name: String,

        #[arg(long, default_value_t = DEFAULT_SEGMENT_BYTES)]
        max_bytes: usize,
    },
    /// Print the bracketed suffix for a format tag
    Suffix { tag: String },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Dir {
            source_dir,
            format,
            info,
            output,
            no_smart,
        } => {
            let cfg = config::load_config()?;
            let release = load_release_info(&info)?;
            let dir = path::transcode_dir_with(
                &source_dir,
                &output.unwrap_or_default(),
                format,
                !no_smart,
                &release,
                &cfg.limits,
            )?;
            println!("{}", dir.display());
        }
        Command::Sanitize { name, max_bytes } => {
            println!("{}", path::suitable_basename_with(&name, max_bytes));
        }
        Command::Suffix { tag } => {
            println!("{}", path::suffix(&tag));
        }
    }
    Ok(())
}

fn load_release_info(file: &Path) -> Result<ReleaseInfo> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let is_json = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse release info {}", file.display()))
    } else {
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse release info {}", file.display()))
    }
}
