use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use devcloak_core::types::{CallTarget, ProfileQuery, ReturnType};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "devcloak",
    version,
    about = "Interception decisions for developer-mode concealment"
)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default preference file.
    Init {
        #[arg(long)]
        path: Option<PathBuf>,
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration.
    Config,
    /// Set one preference key.
    Set { key: String, value: bool },
    /// Evaluate a single intercepted call and print the verdict.
    Decide {
        #[arg(long)]
        json: bool,
        #[command(subcommand)]
        call: DecideCommand,
    },
    /// Evaluate a JSON log of intercepted calls and emit a session report.
    Replay {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum DecideCommand {
    /// Settings lookup by key.
    Settings { key: String },
    /// System property read through a typed accessor.
    Prop {
        key: String,
        #[arg(long, default_value = "string")]
        returns: ReturnType,
    },
    /// Process spawn with a command array.
    Exec {
        #[arg(required = true)]
        argv: Vec<String>,
    },
    /// Work-profile query (profile-owner or admin-mode).
    Profile { query: ProfileQuery },
}

impl DecideCommand {
    fn into_target(self) -> CallTarget {
        match self {
            DecideCommand::Settings { key } => CallTarget::Settings { key },
            DecideCommand::Prop { key, returns } => CallTarget::SystemProperty {
                key,
                return_type: returns,
            },
            DecideCommand::Exec { argv } => CallTarget::ProcessStart { command: argv },
            DecideCommand::Profile { query } => CallTarget::WorkProfile(query),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Init { path, force } => commands::config::init(path, force),
        Commands::Config => commands::config::print_effective(cli.config),
        Commands::Set { key, value } => commands::config::set_key(cli.config, &key, value),
        Commands::Decide { json, call } => {
            commands::decide::run(cli.config, call.into_target(), json)
        }
        Commands::Replay { input, json } => commands::replay::run(cli.config, &input, json),
    }
}
