//! Kinds command

use clap::Args;
use patchplan_core::registry::ResourceKind;

#[derive(Debug, Args)]
pub struct KindsArgs {
    /// Only show this kind
    pub kind: Option<String>,
}

pub fn execute(args: KindsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let kinds = match args.kind {
        Some(name) => vec![name.parse::<ResourceKind>()?],
        None => ResourceKind::ALL.to_vec(),
    };

    for kind in kinds {
        println!("{}", kind);
        for (path, mode) in kind.field_table() {
            println!("  {:<28} {}", path, mode.as_str());
        }
    }

    Ok(())
}
