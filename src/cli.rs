use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use rand::Rng;
use tracing::{debug, info};

use crate::config::load_config;
use crate::emit::{emit_dot, write_output};
use crate::layout::{compute_layout, Notation};
use crate::model::Graph;

#[derive(Parser, Debug)]
#[command(
    name = "ontograph",
    version,
    about = "Cognitive ontology graph layouts, emitted as Graphviz scenes"
)]
pub struct Args {
    /// Input graph document (JSON with nodes and edges)
    pub input: Option<PathBuf>,

    /// Notation: hierarchical, context, bias or sequential
    pub notation: Option<String>,

    /// Seed for the sequential notation's randomized placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Config JSON file overriding theme and layout geometry
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Output directory for the emitted scenes
    #[arg(long = "out-dir", default_value = "visualisations")]
    pub out_dir: PathBuf,
}

pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let Some(input) = args.input else {
        eprintln!("Usage: ontograph <input_file> [notation_type]");
        std::process::exit(1);
    };

    let notation = match args.notation.as_deref() {
        Some(token) => token.parse::<Notation>()?,
        None => Notation::Hierarchical,
    };

    let config = load_config(args.config.as_deref())?;
    let graph = Graph::from_path(&input)?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    debug!(seed, "layout seed");

    let layout = compute_layout(&graph, notation, &config.theme, &config.layout, seed)?;
    let dot = emit_dot(&layout, &config.theme);

    std::fs::create_dir_all(&args.out_dir)?;
    let output = output_path(&args.out_dir, &input, notation);
    write_output(&dot, &output)?;
    info!(path = %output.display(), notation = %notation, "scene written");
    println!("Graph written to {}", output.display());

    Ok(())
}

fn output_path(out_dir: &Path, input: &Path, notation: Notation) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("graph");
    out_dir.join(format!("{stem}_{notation}.dot"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_combines_stem_and_notation() {
        let path = output_path(
            Path::new("visualisations"),
            Path::new("data/ontology.json"),
            Notation::Bias,
        );
        assert_eq!(path, Path::new("visualisations/ontology_bias.dot"));
    }

    #[test]
    fn default_notation_is_hierarchical() {
        let args = Args::parse_from(["ontograph", "input.json"]);
        assert!(args.notation.is_none());
        assert_eq!(args.out_dir, Path::new("visualisations"));
    }

    #[test]
    fn notation_argument_is_validated() {
        assert!("bias".parse::<Notation>().is_ok());
        assert!("circular".parse::<Notation>().is_err());
    }
}
