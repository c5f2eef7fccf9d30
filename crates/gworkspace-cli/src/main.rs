mod call;

use clap::Parser;
use gworkspace::{ApiClient, ClientOptions, JsonConfigSource};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use call::{Service, Verb};

#[derive(Parser, Debug)]
#[command(name = "gws", version, about = "Call a Google Workspace REST API")]
struct Args {
    /// Configuration file (defaults to $GOOGLE_WORKSPACE_CONFIG_PATH or ~/.gworkspace/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Named connection (defaults to default.connection)
    #[arg(long)]
    connection: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Maximum pages followed on GET; 0 for no limit
    #[arg(long, default_value_t = gworkspace::google::DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Exit with an error instead of printing a failed response
    #[arg(long)]
    raise: bool,

    #[arg(value_enum)]
    service: Service,

    #[arg(value_enum)]
    verb: Verb,

    /// Path relative to the service base URL (a full URL for `rest`)
    path: String,

    /// Request parameter as key=value; repeatable
    #[arg(long = "param", short = 'p')]
    params: Vec<String>,

    /// JSON object merged into the request parameters
    #[arg(long)]
    data: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let params = call::build_params(args.data.as_deref(), &args.params)?;

    let mut builder = ApiClient::builder().options(ClientOptions {
        timeout: Duration::from_secs(args.timeout),
        max_pages: (args.max_pages > 0).then_some(args.max_pages),
        raise_on_failure: args.raise,
    });
    if let Some(path) = &args.config {
        builder = builder.config_source(Arc::new(JsonConfigSource::from_file(path)?));
    }
    if let Some(key) = &args.connection {
        builder = builder.connection(key.as_str());
    }
    let client = builder.build()?;

    tracing::debug!(service = ?args.service, verb = ?args.verb, path = %args.path, "Dispatching request");
    let envelope = call::run(&client, args.service, args.verb, &args.path, params).await?;

    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if envelope.status.failed {
        std::process::exit(1);
    }
    Ok(())
}
