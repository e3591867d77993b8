use clap::{Arg, ArgAction, Command};
use solana_sdk::commitment_config::CommitmentConfig;
use spl_mint_repro::global::wallet::RandomKeySource;
use spl_mint_repro::pipeline::repro::entry::run;
use spl_mint_repro::sdk::rpc::client::RpcLedgerClient;
use spl_mint_repro::util::env::env_config::ReproConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() -> anyhow::Result<String> {
    let logs_dir = Path::new("logs");
    if !logs_dir.exists() {
        fs::create_dir(logs_dir)?;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_file_path = format!("logs/repro_{}.log", timestamp);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Arc::new(file))
        .with_ansi(false)
        .with_line_number(true)
        .with_file(true);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
    );

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(filter)
        .init();

    Ok(log_file_path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("spl-mint-repro")
        .version("0.1.0")
        .about("Mints a token and submits the repro instruction in a single transaction")
        .arg(
            Arg::new("rpc-url")
                .long("rpc-url")
                .value_name("URL")
                .help("Overrides SOLANA_RPC_URL"),
        )
        .arg(
            Arg::new("no-confirm")
                .long("no-confirm")
                .help("Return after submission without awaiting confirmation")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("preflight")
                .long("preflight")
                .help("Let the node simulate the transaction before accepting it")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let log_file_path = init_logging()?;
    info!("Logs are being written to: {}", log_file_path);

    let mut config = ReproConfig::load_from_env()?;
    if let Some(url) = matches.get_one::<String>("rpc-url") {
        config.solana_rpc_url = url.clone();
    }
    if matches.get_flag("no-confirm") {
        config.submission.await_confirmation = false;
    }
    if matches.get_flag("preflight") {
        config.submission.skip_preflight = false;
    }

    let client = RpcLedgerClient::new(config.solana_rpc_url.clone(), CommitmentConfig::confirmed());
    info!("Using cluster {}", client.url());

    match run(&config, &client, &RandomKeySource).await {
        Ok(report) => {
            info!("Tx succeeded. {}", report.signature);
            Ok(())
        }
        Err(e) => {
            error!("Repro failed: {}", e);
            Err(e.into())
        }
    }
}
