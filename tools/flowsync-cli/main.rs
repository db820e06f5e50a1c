use clap::Parser;
use flowsync::config::{DEFAULT_OUTPUT_ROOT, DEFAULT_REQUEST_DELAY};
use flowsync::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Generates trigger flows for every integration collection and syncs them to the flow store
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Workspace key, used as the token issuer
    #[arg(long, env = "INTEGRATION_APP_WORKSPACE_KEY", hide_env_values = true)]
    workspace_key: String,

    /// Workspace secret, used to sign the token
    #[arg(long, env = "INTEGRATION_APP_WORKSPACE_SECRET", hide_env_values = true)]
    workspace_secret: String,

    /// Base URI of the integration service API
    #[arg(long, env = "INTEGRATION_APP_API_URI", default_value = DEFAULT_API_URI)]
    api_uri: String,

    /// Directory that receives `flows/<integration>/<flow>.yaml`
    #[arg(long, env = "FLOWSYNC_OUTPUT_ROOT", default_value = DEFAULT_OUTPUT_ROOT)]
    output_root: PathBuf,

    /// Pause before each collection detail request, in milliseconds
    #[arg(
        long,
        env = "FLOWSYNC_REQUEST_DELAY_MS",
        default_value_t = DEFAULT_REQUEST_DELAY.as_millis() as u64
    )]
    request_delay_ms: u64,

    /// Optional per-request timeout, in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    if let Err(e) = run(cli).await {
        error!("Flow generation failed: {}", e);
        std::process::exit(1);
    }

    info!("Total execution: {:?}", start.elapsed());
}

async fn run(cli: Cli) -> Result<()> {
    let sync_config = SyncConfig {
        output_root: cli.output_root,
        request_delay: Duration::from_millis(cli.request_delay_ms),
    };

    info!("Generating workspace token...");
    let credentials = WorkspaceCredentials::new(cli.workspace_key, cli.workspace_secret)?;
    let token = credentials.issue_token()?;

    info!("Initializing integration service client for {}", cli.api_uri);
    let mut client_config = ClientConfig::new(&cli.api_uri, token)?;
    if let Some(secs) = cli.timeout_secs {
        client_config = client_config.with_timeout(Duration::from_secs(secs));
    }
    let catalog = HttpCatalog::new(client_config)?;
    let store = FsFlowStore::from_config(&sync_config);

    Traversal::builder(&catalog, &store)
        .with_config(&sync_config)
        .build()
        .run()
        .await?;

    Ok(())
}
