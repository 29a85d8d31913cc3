//! Categorize command implementation

use anyhow::{bail, Result};
use finsight_core::categorize;

pub fn cmd_categorize(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        bail!("Description cannot be empty");
    }

    let category = categorize(description);
    println!("🏷️  {} → {}", description, category);
    Ok(())
}
