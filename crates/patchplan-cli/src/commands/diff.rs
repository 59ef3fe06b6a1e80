//! Diff command

use clap::{Args, ValueEnum};
use patchplan_core::diff::DiffOptions;
use patchplan_core::registry::ResourceKind;
use patchplan_core::translate::schemas::{beta, v3};
use patchplan_core::translate::translate;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Wire schema the patch's array payloads are encoded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Schema {
    /// Plain JSON values
    Value,
    V3,
    Beta,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Resource kind (see `patchplan kinds`)
    #[arg(long)]
    pub kind: String,

    /// JSON file with the desired state
    #[arg(long)]
    pub desired: PathBuf,

    /// JSON file with the current remote state
    #[arg(long)]
    pub current: PathBuf,

    #[arg(long, value_enum, default_value_t = Schema::Value)]
    pub schema: Schema,

    /// Treat "", 0 and 0.0 as real values rather than "not set"
    #[arg(long)]
    pub strict_zero: bool,

    #[arg(long)]
    pub pretty: bool,
}

pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kind: ResourceKind = args.kind.parse()?;
    let desired = read_snapshot(&args.desired)?;
    let current = read_snapshot(&args.current)?;

    let options = if args.strict_zero {
        DiffOptions::strict()
    } else {
        DiffOptions::default()
    };

    let patch = kind.diff_json(&desired, &current, &options)?;

    let rendered = match args.schema {
        Schema::Value => render(&patch, args.pretty)?,
        Schema::V3 => render(&translate::<_, v3::ArrayInner>(patch)?, args.pretty)?,
        Schema::Beta => render(&translate::<_, beta::ArrayInner>(patch)?, args.pretty)?,
    };
    println!("{}", rendered);

    Ok(())
}

fn read_snapshot(path: &Path) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let value = serde_json::from_str(&text)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;
    Ok(value)
}

fn render<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
