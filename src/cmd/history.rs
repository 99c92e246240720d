//! History command implementation

use anyhow::Result;
use chrono::Utc;
use console::style;
use std::env;
use std::path::Path;

use crate::cmd::input::write_file;
use crate::error::LuaCloakError;
use crate::fmt::{format_bytes, format_relative_time, preview, CHECKMARK, INFO};
use crate::history::{HistoryLedger, HistoryStore};

/// `history` subcommand actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// List records, newest first
    List,
    /// Print one record
    Show {
        /// Record id
        id: u64,
        /// Print only the artifact
        output_only: bool,
    },
    /// Delete one record
    Remove {
        /// Record id
        id: u64,
    },
    /// Delete every record
    Clear,
    /// Dump the ledger as pretty JSON
    Export {
        /// File to write instead of stdout
        output: Option<std::path::PathBuf>,
    },
}

/// Render the ledger as list lines
pub fn render_list(ledger: &HistoryLedger) -> Vec<String> {
    let now = Utc::now();
    ledger
        .records
        .iter()
        .map(|record| {
            format!(
                "{:>13}  {:<13}  {:<8}  {:>9}  {}",
                record.id,
                format_relative_time(record.timestamp, now),
                record.method.name(),
                format_bytes(record.output_size()),
                preview(&record.input, 40)
            )
        })
        .collect()
}

/// Remove `id`, failing if nothing was removed
pub fn remove_record(ledger: HistoryLedger, id: u64) -> Result<HistoryLedger, LuaCloakError> {
    if ledger.find(id).is_none() {
        return Err(LuaCloakError::RecordNotFound { id });
    }
    Ok(ledger.remove(id))
}

/// Run a history action against the project in the current directory
pub fn cmd_history(action: &HistoryAction) -> Result<()> {
    run(&env::current_dir()?, action)
}

fn run(project_root: &Path, action: &HistoryAction) -> Result<()> {
    let store = HistoryStore::new(project_root);

    match action {
        HistoryAction::List => {
            let ledger = store.load()?;
            if ledger.is_empty() {
                println!("{} No compilation history yet", INFO);
                return Ok(());
            }
            for line in render_list(&ledger) {
                println!("{line}");
            }
        }
        HistoryAction::Show { id, output_only } => {
            let ledger = store.load()?;
            let record = ledger
                .find(*id)
                .ok_or(LuaCloakError::RecordNotFound { id: *id })?;
            if *output_only {
                println!("{}", record.output);
            } else {
                println!("{} {}", style("id:").bold(), record.id);
                println!("{} {}", style("time:").bold(), record.timestamp.to_rfc3339());
                println!("{} {}", style("method:").bold(), record.method);
                println!("{} {}", style("size:").bold(), format_bytes(record.output_size()));
                println!("{}\n{}", style("-- input").dim(), record.input);
                println!("{}\n{}", style("-- output").dim(), record.output);
            }
        }
        HistoryAction::Remove { id } => {
            let ledger = remove_record(store.load()?, *id)?;
            store.save(&ledger)?;
            println!("{} History item removed", CHECKMARK);
        }
        HistoryAction::Clear => {
            store.clear()?;
            println!("{} History cleared", CHECKMARK);
        }
        HistoryAction::Export { output } => {
            let json = serde_json::to_string_pretty(&store.load()?)?;
            match output {
                Some(path) => {
                    write_file(path, &json)?;
                    println!("{} History exported to {}", CHECKMARK, path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}
