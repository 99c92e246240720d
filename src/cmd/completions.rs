//! Completions command implementation
//!
//! Handles the `luacloak completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Writes the completion script for `cmd` to `out`. Users can redirect
/// stdout to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// luacloak completions bash > /etc/bash_completion.d/luacloak
///
/// # Zsh
/// luacloak completions zsh > ~/.zfunc/_luacloak
///
/// # Fish
/// luacloak completions fish > ~/.config/fish/completions/luacloak.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let bin_name = cmd.get_name().to_string();
    generate(shell, cmd, bin_name, out);
}
