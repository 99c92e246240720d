//! Config command implementation
//!
//! Handles `luacloak config init|show|export|reset` against
//! `.luacloak.toml` in the current directory.

use anyhow::Result;
use console::style;
use std::env;
use std::path::{Path, PathBuf};

use crate::cmd::input::write_file;
use crate::config::{self, ConfigLoader, Settings};
use crate::fmt::{CHECKMARK, INFO, SPARKLES, WARNING};
use crate::transform::EncodingMethod;

/// `config` subcommand actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Write a default `.luacloak.toml`
    Init {
        /// Overwrite an existing file
        force: bool,
    },
    /// Print the effective settings as TOML
    Show,
    /// Print (or write) the settings as pretty JSON
    Export {
        /// File to write instead of stdout
        output: Option<PathBuf>,
    },
    /// Delete `.luacloak.toml` so defaults apply
    Reset,
}

/// Run a config action in the current directory
pub fn cmd_config(action: &ConfigAction) -> Result<()> {
    run(&env::current_dir()?, action)
}

fn run(project_root: &Path, action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init { force } => init(project_root, *force),
        ConfigAction::Show => {
            let settings = ConfigLoader::load(project_root)?;
            print!("{}", toml_edit::ser::to_string_pretty(&settings)?);
            Ok(())
        }
        ConfigAction::Export { output } => {
            let settings = ConfigLoader::load(project_root)?;
            let json = serde_json::to_string_pretty(&settings)?;
            match output {
                Some(path) => {
                    write_file(path, &json)?;
                    println!("{} Settings exported to {}", CHECKMARK, path.display());
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        ConfigAction::Reset => {
            ConfigLoader::reset(project_root)?;
            println!("{} Settings reset to defaults", CHECKMARK);
            Ok(())
        }
    }
}

fn init(project_root: &Path, force: bool) -> Result<()> {
    if ConfigLoader::exists(project_root) && !force {
        println!(
            "{} Config file already exists: {}",
            WARNING,
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Use --force to overwrite it or edit it manually.");
        return Ok(());
    }

    let settings = Settings::default();
    ConfigLoader::save(&settings, project_root)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(config::CONFIG_FILE_NAME).cyan().bold()
    );
    println!();
    println!("{}  Encoding methods:", INFO);
    for method in EncodingMethod::ALL {
        let indicator = if method == settings.obfuscation_method {
            "→"
        } else {
            " "
        };
        println!(
            "   {} {} - {}",
            style(indicator).cyan().bold(),
            style(method.name()).bold(),
            style(method.description()).dim()
        );
    }
    println!();
    println!(
        "{} Run {} to compile a script",
        SPARKLES,
        style("luacloak compile <FILE>").cyan()
    );

    Ok(())
}
