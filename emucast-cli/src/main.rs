use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use emucast_client::peer::RtcPeerConnector;
use emucast_client::transport::{Authenticator, BearerToken, NopAuthenticator};
use emucast_client::{
    DriverConfig, DriverEvent, EventKind, GrpcConfig, GrpcTransport, SignalingDriver,
    StatusMonitor, TransportMode,
};
use emucast_core::StatusReport;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "emucast")]
#[command(about = "Stream and control a remote Android emulator over WebRTC")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct EndpointArgs {
    /// gRPC endpoint of the emulator.
    #[arg(long, env = "EMUCAST_ENDPOINT", default_value = "localhost:8554")]
    endpoint: String,

    /// Bearer token sent with every call.
    #[arg(long, env = "EMUCAST_TOKEN")]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the emulator status.
    Status {
        #[command(flatten)]
        endpoint: EndpointArgs,
    },
    /// Negotiate a WebRTC session and stay connected until Ctrl-C.
    Connect {
        #[command(flatten)]
        endpoint: EndpointArgs,

        /// Long-poll for signals instead of streaming them.
        #[arg(long)]
        poll: bool,

        /// Send input over RPC only.
        #[arg(long)]
        no_data_channel: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match Cli::parse().command {
        Commands::Status { endpoint } => status(endpoint).await,
        Commands::Connect {
            endpoint,
            poll,
            no_data_channel,
        } => {
            let config = DriverConfig {
                mode: if poll {
                    TransportMode::Polling
                } else {
                    TransportMode::Streaming
                },
                data_channels: !no_data_channel,
            };
            connect(endpoint, config).await
        }
    }
}

async fn open_transport(args: EndpointArgs) -> Result<GrpcTransport> {
    let auth: Arc<dyn Authenticator> = match args.token {
        Some(token) => Arc::new(BearerToken::new(token).on_unauthorized(|| {
            eprintln!("{}", "The emulator rejected the token.".red().bold());
        })),
        None => Arc::new(NopAuthenticator),
    };

    let config = GrpcConfig::new(args.endpoint);
    let uri = config.uri();
    GrpcTransport::connect(config, auth)
        .await
        .with_context(|| format!("Failed to reach the emulator at {}", uri))
}

async fn status(args: EndpointArgs) -> Result<()> {
    let transport = Arc::new(open_transport(args).await?);
    let monitor = StatusMonitor::new(transport);

    let report = monitor
        .update()
        .await
        .context("Failed to fetch emulator status")?;
    print_status(&report);
    Ok(())
}

fn print_status(report: &StatusReport) {
    let booted = if report.booted {
        "yes".green()
    } else {
        "no".yellow()
    };

    println!("{}", "📱 Emulator status".cyan().bold());
    println!("   Version:    {}", report.version);
    println!("   Uptime:     {}s", report.uptime_ms / 1000);
    println!("   Booted:     {}", booted);
    println!(
        "   VM:         {} ({} cores, {} MiB)",
        report.vm_config.hypervisor_type,
        report.vm_config.number_of_cpu_cores,
        report.vm_config.ram_size_bytes / (1024 * 1024)
    );
    for key in ["hw.lcd.width", "hw.lcd.height", "hw.lcd.density"] {
        if let Some(value) = report.hardware_config.get(key) {
            println!("   {:<11} {}", format!("{}:", key), value);
        }
    }
}

async fn connect(args: EndpointArgs, config: DriverConfig) -> Result<()> {
    tracing::debug!("Driver config: {:?}", config);
    let transport = Arc::new(open_transport(args).await?);
    let driver = SignalingDriver::new(transport, Arc::new(RtcPeerConnector::new()), config);

    driver.on(EventKind::Connected, |event| {
        if let DriverEvent::Connected(track) = event {
            println!(
                "{} {:?} track {}",
                "🎬 Receiving".green().bold(),
                track.kind(),
                track.id()
            );
        }
    });

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    driver.on(EventKind::Disconnected, move |_| {
        let _ = done_tx.send(());
    });

    println!("{}", "🚀 Requesting a WebRTC session...".cyan());
    let session = driver
        .start_stream()
        .await
        .context("Failed to start the session")?;
    println!("   Session: {}", session);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("{}", "Interrupted, closing the session".yellow());
            driver.disconnect().await;
        }
        _ = done_rx.recv() => {
            println!("{}", "Session ended".yellow());
        }
    }

    Ok(())
}
