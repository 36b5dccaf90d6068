//! ChainWallet: command-line entry point for a local demo wallet.
//!
//! Every invocation opens the encrypted state in `--data-dir`, performs one
//! operation, re-syncs and persists, then exits.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use chainwallet_ledger::Block;
use chainwallet_store_lmdb::LmdbKvStore;
use chainwallet_transactions::Transaction;
use chainwallet_types::{SystemClock, TxId};
use chainwallet_utils::{format_elapsed, init_logging, LogFormat};
use chainwallet_wallet_core::{TransferMode, WalletConfig, WalletService};
use chainwallet_work::Difficulty;
use clap::Parser;

#[derive(Parser)]
#[command(name = "chainwallet", about = "Local proof-of-work ledger and demo wallet")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "CHAINWALLET_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory for the encrypted state store.
    #[arg(long, env = "CHAINWALLET_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Leading zero hex characters required of each block hash.
    #[arg(long, env = "CHAINWALLET_DIFFICULTY")]
    difficulty: Option<u8>,

    /// Secret the state encryption key is derived from.
    #[arg(long, env = "CHAINWALLET_STATE_SECRET", hide_env_values = true)]
    state_secret: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CHAINWALLET_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CHAINWALLET_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print this wallet's address.
    Address,
    /// Print the balance derived from sealed blocks.
    Balance,
    /// List every sealed transaction touching this wallet.
    History,
    /// Send funds to another wallet.
    Send {
        /// Recipient address (`0x` + 16 hex characters).
        #[arg(long)]
        to: String,
        /// Amount in whole units.
        #[arg(long)]
        amount: u64,
        /// Defer settlement; confirm or invalidate later with `resolve`.
        #[arg(long)]
        offline: bool,
    },
    /// Settle a deferred transfer.
    Resolve {
        /// Transaction id.
        #[arg(long)]
        tx: TxId,
        /// Confirm and mine it; without this flag it is marked double-spent.
        #[arg(long)]
        success: bool,
    },
    /// Seal the pending pool into a block, rewarding this wallet.
    Mine,
    /// Print the sealed chain.
    Chain {
        /// Emit the full chain as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Recompute every block hash and link.
    Validate,
    /// List the pending pool.
    Pending,
    /// Delete stored state and start over with a new address and chain.
    Reset,
}

/// Merge the optional config file with CLI flags and env vars.
fn resolve_config(cli: &Cli) -> anyhow::Result<WalletConfig> {
    let mut config = match &cli.config {
        Some(path) => WalletConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => WalletConfig::default(),
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(zeros) = cli.difficulty {
        config.ledger.difficulty = Difficulty::new(zeros)?;
    }
    if let Some(secret) = &cli.state_secret {
        config.state_secret = secret.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.log_format = format.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let log_format: LogFormat = config.log_format.parse()?;
    init_logging(log_format, &config.log_level)?;

    let store = LmdbKvStore::open(&config.data_dir)
        .with_context(|| format!("failed to open data dir {}", config.data_dir.display()))?;
    let mut wallet = WalletService::open(config, store, Arc::new(SystemClock)).await?;

    // Ctrl-C abandons an in-flight seal instead of killing the process
    // mid-write.
    let cancel = wallet.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling seal");
            cancel.cancel();
        }
    });

    run(cli.command, &mut wallet).await
}

async fn run(command: Command, wallet: &mut WalletService<LmdbKvStore>) -> anyhow::Result<()> {
    match command {
        Command::Address => println!("{}", wallet.address()),
        Command::Balance => println!("{}", wallet.balance()),
        Command::History => {
            for tx in &wallet.snapshot().transactions {
                println!("{}", format_transaction(tx));
            }
        }
        Command::Send { to, amount, offline } => {
            let mode = if offline {
                TransferMode::Offline
            } else {
                TransferMode::Online
            };
            let started = Instant::now();
            let tx = wallet.send(&to, amount, mode).await?;
            println!("{}", format_transaction(&tx));
            tracing::info!(elapsed = %format_elapsed(started.elapsed()), "send finished");
        }
        Command::Resolve { tx, success } => {
            wallet.resolve_offline(tx, success).await?;
            match wallet.with_ledger(|l| l.find_transaction(&tx).cloned())? {
                Some(tx) => println!("{}", format_transaction(&tx)),
                None => println!("{tx} resolved"),
            }
        }
        Command::Mine => {
            let started = Instant::now();
            match wallet.mine().await? {
                Some(block) => println!(
                    "{} in {}",
                    format_block(&block),
                    format_elapsed(started.elapsed())
                ),
                None => println!("no transactions to mine"),
            }
        }
        Command::Chain { json } => {
            let chain = wallet.with_ledger(|l| l.chain())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&chain)?);
            } else {
                for block in &chain {
                    println!("{}", format_block(block));
                }
            }
        }
        Command::Validate => {
            if wallet.with_ledger(|l| l.is_chain_valid())? {
                println!("chain is valid");
            } else {
                bail!("chain is INVALID");
            }
        }
        Command::Pending => {
            for tx in wallet.with_ledger(|l| l.pending_transactions().to_vec())? {
                println!("{}", format_transaction(&tx));
            }
        }
        Command::Reset => {
            wallet.reset().await?;
            println!("wallet reset; new address {}", wallet.address());
        }
    }
    Ok(())
}

fn format_transaction(tx: &Transaction) -> String {
    format!(
        "{}  {:<15} {} -> {}  {}",
        tx.id, tx.status, tx.from, tx.to, tx.amount
    )
}

fn format_block(block: &Block) -> String {
    format!(
        "#{:<4} {}  prev {}  nonce {:<6} txs {}",
        block.index(),
        block.hash(),
        block.previous_hash(),
        block.nonce(),
        block.transactions().len()
    )
}
