use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

use luacloak::cmd::{self, CompileArgs, ConfigAction, HistoryAction};
use luacloak::transform::{EncodingMethod, LoaderRequestStyle};

/// Lua script obfuscator and loader generator
///
/// luacloak wraps Lua source in self-decoding artifacts, builds one-line
/// loaders for hosted scripts, and keeps a local compile history.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Obfuscate Lua files (or stdin) into self-decoding artifacts
    Compile {
        /// Lua files to compile; reads stdin when omitted
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Write artifacts into this directory instead of stdout
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Encoding method: base64, charcode, hex, advanced
        #[arg(short, long, value_parser = EncodingMethod::from_str)]
        method: Option<EncodingMethod>,

        /// Minify before encoding
        #[arg(long)]
        minify: bool,

        /// Do not record this compile in history
        #[arg(long)]
        no_history: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Skip the progress animation
        #[arg(long)]
        no_progress: bool,
    },

    /// Generate a loadstring snippet for a hosted script
    Loader {
        /// Script URL
        url: String,

        /// Request style: httpget, httpgetasync, synrequest, request, auto
        #[arg(short, long, value_parser = LoaderRequestStyle::from_str)]
        style: Option<LoaderRequestStyle>,

        /// Do not append the `()` call
        #[arg(long)]
        no_wrap: bool,
    },

    /// Strip comments, blank lines and extra whitespace
    Minify {
        /// Lua file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-indent Lua source by block keywords
    Beautify {
        /// Lua file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count lines, characters and bytes
    Analyze {
        /// Lua file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode an artifact and check it against its source
    Verify {
        /// Artifact to check
        file: PathBuf,

        /// Original source to compare against
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Also run the artifact with a Lua interpreter from PATH
        #[arg(long)]
        run: bool,
    },

    /// Inspect or edit the compile history
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Show usage statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage .luacloak.toml
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List compiles, newest first
    List,
    /// Print one compile
    Show {
        /// Record id
        id: u64,
        /// Print only the artifact
        #[arg(long)]
        output_only: bool,
    },
    /// Remove one compile
    Remove {
        /// Record id
        id: u64,
    },
    /// Remove every compile
    Clear,
    /// Export history as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Create .luacloak.toml with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print effective settings
    Show,
    /// Export settings as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete .luacloak.toml and fall back to defaults
    Reset,
}

impl From<&HistoryCommand> for HistoryAction {
    fn from(command: &HistoryCommand) -> Self {
        match command {
            HistoryCommand::List => HistoryAction::List,
            HistoryCommand::Show { id, output_only } => HistoryAction::Show {
                id: *id,
                output_only: *output_only,
            },
            HistoryCommand::Remove { id } => HistoryAction::Remove { id: *id },
            HistoryCommand::Clear => HistoryAction::Clear,
            HistoryCommand::Export { output } => HistoryAction::Export {
                output: output.clone(),
            },
        }
    }
}

impl From<&ConfigCommand> for ConfigAction {
    fn from(command: &ConfigCommand) -> Self {
        match command {
            ConfigCommand::Init { force } => ConfigAction::Init { force: *force },
            ConfigCommand::Show => ConfigAction::Show,
            ConfigCommand::Export { output } => ConfigAction::Export {
                output: output.clone(),
            },
            ConfigCommand::Reset => ConfigAction::Reset,
        }
    }
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Compile {
            files,
            out_dir,
            method,
            minify,
            no_history,
            json,
            no_progress,
        }) => cmd::cmd_compile(&CompileArgs {
            files: files.clone(),
            out_dir: out_dir.clone(),
            method: *method,
            minify: *minify,
            no_history: *no_history,
            json: *json,
            no_progress: *no_progress,
        }),
        Some(Commands::Loader {
            url,
            style,
            no_wrap,
        }) => cmd::cmd_loader(url, *style, *no_wrap),
        Some(Commands::Minify { file, output }) => {
            cmd::cmd_minify(file.as_deref(), output.as_ref())
        }
        Some(Commands::Beautify { file, output }) => {
            cmd::cmd_beautify(file.as_deref(), output.as_ref())
        }
        Some(Commands::Analyze { file, json }) => cmd::cmd_analyze(file.as_deref(), *json),
        Some(Commands::Verify { file, source, run }) => {
            cmd::cmd_verify(file, source.as_deref(), *run)
        }
        Some(Commands::History { action }) => cmd::cmd_history(&action.into()),
        Some(Commands::Stats { json }) => cmd::cmd_stats(*json),
        Some(Commands::Config { action }) => cmd::cmd_config(&action.into()),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell, &mut Cli::command(), &mut std::io::stdout());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("luacloak v{}", env!("CARGO_PKG_VERSION"));
            println!("Lua script obfuscator and loader generator\n");
            println!("Usage: luacloak <COMMAND>\n");
            println!("Commands:");
            println!("  compile  Obfuscate Lua files into self-decoding artifacts");
            println!("  loader   Generate a loadstring snippet for a hosted script");
            println!("  minify   Strip comments and whitespace");
            println!("  history  Inspect or edit the compile history");
            println!("  config   Manage .luacloak.toml");
            println!("\nRun 'luacloak <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use luacloak::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
