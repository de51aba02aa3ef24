//! netpolicyctl: manage allow rules on a policy server.
//!
//! Usage:
//!   netpolicyctl net-allow SRC DST
//!   netpolicyctl net-disallow SRC DST
//!   netpolicyctl net-list

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use netpolicy_client::cli::{
    Command, GroupDirectory, IdentityDirectory, Runner, StaticDirectory, DEFAULT_SERVER,
};
use netpolicy_client::OuterClient;

#[derive(Parser)]
#[command(name = "netpolicyctl")]
#[command(about = "Allow direct network traffic between apps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Policy server base URL
    #[arg(long, global = true, default_value = DEFAULT_SERVER)]
    server: String,

    /// YAML file mapping app names to group ids (names are ids when omitted)
    #[arg(long, global = true)]
    directory: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Allow direct network traffic between two apps
    #[command(name = "net-allow")]
    Allow { app_one: String, app_two: String },
    /// Remove an existing net-allow rule
    #[command(name = "net-disallow")]
    Disallow { app_one: String, app_two: String },
    /// List all network allow rules
    #[command(name = "net-list")]
    List,
}

impl From<Commands> for Command {
    fn from(c: Commands) -> Self {
        match c {
            Commands::Allow { app_one, app_two } => Command::Allow {
                source: app_one,
                destination: app_two,
            },
            Commands::Disallow { app_one, app_two } => Command::Disallow {
                source: app_one,
                destination: app_two,
            },
            Commands::List => Command::List,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let command = Command::from(cli.command);
    let prefix = match command {
        Command::Allow { .. } => "allow",
        Command::Disallow { .. } => "disallow",
        Command::List => "list",
    };

    let directory: Box<dyn GroupDirectory> = match cli.directory.as_deref() {
        Some(path) => match StaticDirectory::load(path) {
            Ok(d) => Box::new(d),
            Err(e) => {
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(IdentityDirectory),
    };

    let client = OuterClient::new(cli.server);
    let runner = Runner::new(&client, directory.as_ref());

    match runner.run(&command).await {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(command = command.name(), code = e.client_code().as_str(), "failed");
            eprintln!("{prefix}: {e}");
            ExitCode::FAILURE
        }
    }
}
