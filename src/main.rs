use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use chatgate::cli::Commands;
use chatgate::connector::tui;
use chatgate::{build_router, ChatSession, Container, ContainerConfig, HttpChatTransport, CHAT_ROUTE};

#[derive(Parser)]
#[command(name = "chatgate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, mock } => {
            init_tracing(cli.verbose, LogTarget::Stderr)?;
            serve(&host, port, mock).await?;
        }

        Commands::Chat { endpoint, log_file } => {
            let target = match log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Discard,
            };
            init_tracing(cli.verbose, target)?;
            tui::run(Arc::new(HttpChatTransport::new(endpoint))).await?;
        }

        Commands::Ask { message, endpoint } => {
            init_tracing(cli.verbose, LogTarget::Stderr)?;
            let transport = HttpChatTransport::new(endpoint);
            let mut session = ChatSession::new();
            session.set_input(message);

            match session.send(&transport).await {
                Some(reply) => println!("{}", reply.text()),
                None => anyhow::bail!("Nothing to send: the message is blank"),
            }
        }
    }

    Ok(())
}

enum LogTarget {
    Stderr,
    File(String),
    /// The terminal client owns the screen; logging to it would corrupt the view.
    Discard,
}

fn init_tracing(verbose: bool, target: LogTarget) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false);

    match target {
        LogTarget::Stderr => {
            let subscriber = builder.with_writer(std::io::stderr).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        LogTarget::Discard => {
            let subscriber = builder.with_writer(std::io::sink).finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    Ok(())
}

async fn serve(host: &str, port: u16, mock: bool) -> Result<()> {
    let container = Arc::new(Container::new(ContainerConfig {
        mock_generator: mock,
    }));
    let app = build_router(container);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(
        "Chat endpoint listening on http://{}{}",
        listener.local_addr()?,
        CHAT_ROUTE
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Chat endpoint stopped");
    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => warn!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
}
