use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde_json::json;

use blockwise::{Block, NaturalDateResolver};

/// Evaluate a block file: is it active at the given instant?
#[derive(Debug, Parser)]
#[command(name = "blockwise", version, about = "Parse a block file and evaluate its schedule")]
struct Cli {
    /// Path to the block file
    file: PathBuf,

    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Base instant relative date expressions resolve against (RFC 3339);
    /// defaults to the evaluation instant
    #[arg(long)]
    base: Option<DateTime<Utc>>,

    /// Variable binding as NAME=VALUE; repeatable
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let variables = parse_variables(&cli.vars)?;

    let block = Block::parse(&text, &variables)
        .with_context(|| format!("failed to parse {}", cli.file.display()))?;

    let at = cli.at.unwrap_or_else(Utc::now);
    let base = cli.base.unwrap_or(at);
    let state = block
        .is_active_at(&NaturalDateResolver, base, at)
        .context("failed to evaluate schedule")?;

    let output = json!({
        "title": block.title.trim(),
        "active": state.active,
        "last_effective": state.last_effective.map(|t| t.to_rfc3339()),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn parse_variables(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut variables = HashMap::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("invalid --var '{pair}': expected NAME=VALUE");
        };
        variables.insert(name.to_string(), value.to_string());
    }
    Ok(variables)
}
