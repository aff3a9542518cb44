/// Agora Gateway - static-file and reverse-proxy server
use agora_core::ClientDefaults;
use agora_gateway::{
    config::GatewayConfig, defaults_js::render_defaults_module, routes::create_router,
    state::AppState,
};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "agora-gateway")]
#[command(about = "Static-file and reverse-proxy gateway for the Agora front-end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Print the generated client configuration module
    Defaults,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agora_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config.as_deref().map(Path::new)).await?;
        }
        Commands::Defaults => {
            let module = render_defaults_module(&ClientDefaults::from_env())?;
            print!("{module}");
        }
    }

    Ok(())
}

async fn serve(config_path: Option<&Path>) -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::load(config_path)?;
    config.validate()?;

    tracing::info!("Starting Agora gateway");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Resolve and render the client configuration once; it cannot change
    // without a restart.
    let defaults = ClientDefaults::from_env();
    let defaults_module = render_defaults_module(&defaults)?;
    tracing::info!(
        app_name = %defaults.app_name,
        api_base = %defaults.api_base,
        timeout_ms = defaults.timeout_ms,
        "Client defaults resolved"
    );
    tracing::info!(
        prefix = %config.proxy.prefix,
        target = %config.proxy.target,
        "Proxy configured"
    );

    let http = reqwest::Client::builder().build()?;
    let state = Arc::new(AppState::new(http, config.clone(), defaults_module));
    let app = create_router(state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Gateway listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
