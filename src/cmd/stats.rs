//! Stats command implementation

use anyhow::Result;
use console::style;
use std::env;

use crate::fmt::CHART;
use crate::history::StatsStore;

/// Print the total number of compiles in this project
pub fn cmd_stats(json: bool) -> Result<()> {
    let stats = StatsStore::new(&env::current_dir()?).load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{} Total compiled: {}", CHART, style(stats.total).bold());
    }
    Ok(())
}
