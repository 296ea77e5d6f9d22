use std::io::{Read, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dotweave::{RankDir, RenderOptions};

#[derive(Parser)]
#[command(name = "dotweave", about = "Turn PlantUML-style class diagrams into Graphviz DOT")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<PathBuf>,

    /// Builtin theme (default, dark, pastel, blueprint, forest, ocean, minimal)
    #[arg(long, short = 't')]
    theme: Option<String>,

    /// Rank direction: TB, BT, LR or RL
    #[arg(long, short = 'd', value_parser = parse_direction)]
    direction: Option<RankDir>,

    /// Graph name
    #[arg(long, short = 'n', default_value = "classes")]
    name: String,

    /// Render through the layout program in this format (svg, png, ...) instead of printing DOT
    #[arg(long, short = 'f')]
    format: Option<String>,

    /// Output file (stdout if not provided)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Layout program
    #[arg(long, default_value = dotweave::backend::DEFAULT_ENGINE)]
    engine: String,
}

fn parse_direction(s: &str) -> Result<RankDir, String> {
    RankDir::parse(s).ok_or_else(|| format!("unknown direction `{s}` (expected TB, BT, LR or RL)"))
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}

fn main() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    let input = match &cli.file {
        Some(path) => std::fs::read_to_string(path)
            .unwrap_or_else(|e| fail(format!("failed to read {}: {e}", path.display()))),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .unwrap_or_else(|e| fail(format!("failed to read stdin: {e}")));
            buf
        }
    };

    let options = RenderOptions {
        name: cli.name,
        theme: cli.theme,
        rankdir: cli.direction,
    };
    let dot = dotweave::render_with_options(&input, &options).unwrap_or_else(|e| fail(e));

    let bytes = match &cli.format {
        Some(format) => {
            dotweave::backend::render(&dot, format, &cli.engine).unwrap_or_else(|e| fail(e))
        }
        None => dot.into_bytes(),
    };

    let written = match &cli.output {
        Some(path) => std::fs::write(path, &bytes),
        None => std::io::stdout().write_all(&bytes),
    };
    if let Err(e) = written {
        fail(format!("failed to write output: {e}"));
    }
}
