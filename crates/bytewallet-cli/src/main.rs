/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Gateway call results on stdout, or a running callback server
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, subcommands, startup flow, or shutdown handling
*/

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use bytewallet_adapter::{
    CallbackProcessor, GatewayClient, GatewayResponse, WithdrawParams, callback_router,
};
use bytewallet_cli::{GatewayConfig, LoggingCallbackHandler, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "bytewallet-cli", version, about = "ByteWallet merchant gateway client")]
struct Cli {
    #[arg(long = "config", value_name = "PATH")]
    config_path: PathBuf,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: String,
    /// Validate configuration and exit
    #[arg(long = "dry-run")]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported coins
    SupportCoins {
        #[arg(long)]
        show_balance: bool,
    },
    /// Create a deposit address
    CreateAddress {
        #[arg(long)]
        main_coin_type: String,
        #[arg(long)]
        wallet_id: Option<String>,
        #[arg(long)]
        alias: Option<String>,
    },
    /// Validate an address
    CheckAddress {
        #[arg(long)]
        main_coin_type: String,
        #[arg(long)]
        address: String,
    },
    /// Check whether an address belongs to this merchant
    ExistAddress {
        #[arg(long)]
        main_coin_type: String,
        #[arg(long)]
        address: String,
    },
    /// Submit a withdrawal
    Withdraw {
        #[arg(long)]
        business_id: String,
        #[arg(long)]
        main_coin_type: String,
        #[arg(long)]
        coin_type: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long)]
        memo: Option<String>,
    },
    /// Send a raw JSON body to a gateway path, e.g. `--path /mch/withdraw`
    Call {
        #[arg(long)]
        path: String,
        /// Business body as JSON; the merchant id is not filled in
        #[arg(long)]
        body: String,
    },
    /// Serve the callback endpoint until SIGINT/SIGTERM
    ServeCallbacks {
        /// Overrides callback.bind from the config file
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = GatewayConfig::from_file(&args.config_path).context("load config")?;
    config.apply_env_overrides();
    config.validate().context("validate config")?;

    let _guard = init_tracing(&args.log_level, &config.log)?;

    info!(
        config_path = %args.config_path.display(),
        merchant_id = %config.merchant_id,
        dry_run = args.dry_run,
        "starting bytewallet-cli"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let Some(command) = args.command else {
        warn!("no subcommand given; nothing to do");
        return Ok(());
    };

    let client = GatewayClient::with_config(config.credentials(), config.client_config())
        .context("build gateway client")?;

    let response = match command {
        Command::SupportCoins { show_balance } => client.support_coins(show_balance).await?,
        Command::CreateAddress {
            main_coin_type,
            wallet_id,
            alias,
        } => {
            client
                .create_address(&main_coin_type, wallet_id.as_deref(), alias.as_deref())
                .await?
        }
        Command::CheckAddress {
            main_coin_type,
            address,
        } => client.check_address(&main_coin_type, &address).await?,
        Command::ExistAddress {
            main_coin_type,
            address,
        } => client.exist_address(&main_coin_type, &address).await?,
        Command::Withdraw {
            business_id,
            main_coin_type,
            coin_type,
            address,
            amount,
            memo,
        } => {
            let params = WithdrawParams {
                business_id,
                main_coin_type,
                coin_type,
                address,
                amount,
                memo,
            };
            client.withdraw(params).await?
        }
        Command::Call { path, body } => {
            let body: serde_json::Value =
                serde_json::from_str(&body).context("--body must be valid JSON")?;
            client.request_path(&path, &body).await?
        }
        Command::ServeCallbacks { bind } => {
            let bind = bind.unwrap_or_else(|| config.callback.bind.clone());
            return serve_callbacks(&client, &bind, &config.callback.path).await;
        }
    };

    print_response(&response)
}

fn print_response(response: &GatewayResponse) -> Result<()> {
    let pretty = serde_json::to_string_pretty(response).context("format response")?;
    println!("{pretty}");
    Ok(())
}

async fn serve_callbacks(client: &GatewayClient, bind: &str, path: &str) -> Result<()> {
    let addr: SocketAddr = bind
        .parse()
        .with_context(|| format!("invalid bind address {bind}"))?;

    let processor = Arc::new(CallbackProcessor::new(
        client.callback_verifier(),
        Arc::new(LoggingCallbackHandler),
    ));
    let app = callback_router(processor, path);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, path, "callback server listening");

    let shutdown = CancellationToken::new();
    setup_signal_handlers(shutdown.clone());

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("callback server")?;

    info!("callback server stopped");
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let on_sigint = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        on_sigint.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
