use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fleetdesk::connector::api::{
    DEFAULT_COMPANY_ID, DEFAULT_MAX_VACATION_DAYS, DEFAULT_PAYABLE_DUE_DAYS,
};
use fleetdesk::connector::http;
use fleetdesk::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "fleetdesk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, default_value = "~/.fleetdesk")]
    data_dir: String,

    /// Keep all records in memory for the lifetime of the process
    #[arg(long, global = true)]
    memory_storage: bool,

    /// Company that owns the branches
    #[arg(long, global = true, env = "DEFAULT_COMPANY_ID", default_value = DEFAULT_COMPANY_ID)]
    company_id: String,

    /// Days until a maintenance bill falls due
    #[arg(long, global = true, default_value_t = DEFAULT_PAYABLE_DUE_DAYS)]
    payable_due_days: i64,

    /// Longest vacation that can be requested, in days
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_VACATION_DAYS)]
    max_vacation_days: i64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `--format json` output stays parseable.
    let default_filter = if cli.verbose { "fleetdesk=debug,info" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let data_dir = expand_tilde(&cli.data_dir);
    if !cli.memory_storage {
        std::fs::create_dir_all(&data_dir)?;
    }

    let container = Container::new(ContainerConfig {
        data_dir,
        memory_storage: cli.memory_storage,
        company_id: cli.company_id,
        payable_due_days: cli.payable_due_days,
        max_vacation_days: cli.max_vacation_days,
    })
    .await?;

    if let Commands::Serve { port, public } = cli.command {
        return http::serve(Arc::new(container), port, public).await;
    }

    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}

fn expand_tilde(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            if path == "~" {
                return home.to_string_lossy().to_string();
            }
            return path.replacen("~", &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
