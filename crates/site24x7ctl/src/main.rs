// # site24x7ctl - Site24x7 resource host
//
// A THIN integration layer: all mapping logic lives in site24x7-core and
// all HTTP handling in site24x7-client. This binary is responsible for:
// 1. Reading configuration from environment variables
// 2. Loading the resource state file
// 3. Running one lifecycle operation
// 4. Writing the resulting state back
//
// ## Usage
//
// ```bash
// site24x7ctl <type_name> <create|read|update|delete|exists> <state.json>
// ```
//
// The state file holds `{"id": "...", "attributes": {...}}`. `create` may
// omit the ID; every other operation needs it.
//
// ## Configuration
//
// ### Authentication
// - `SITE24X7_AUTHTOKEN`: Static API token (wins over OAuth when set)
// - `SITE24X7_OAUTH2_CLIENT_ID`: OAuth2 client ID
// - `SITE24X7_OAUTH2_CLIENT_SECRET`: OAuth2 client secret
// - `SITE24X7_OAUTH2_REFRESH_TOKEN`: OAuth2 refresh token
// - `SITE24X7_ACCOUNTS_URL`: Accounts server (default https://accounts.zoho.com)
//
// ### Transport
// - `SITE24X7_API_BASE_URL`: API base URL
// - `SITE24X7_RETRY_MIN_WAIT` / `SITE24X7_RETRY_MAX_WAIT`: Backoff bounds in seconds
// - `SITE24X7_MAX_RETRIES`: Retry attempts for 429, 5xx and transport failures
// - `SITE24X7_HTTP_TIMEOUT`: Per-request timeout in seconds
//
// ### Logging
// - `SITE24X7_LOG_LEVEL` or `--log-level`: trace, debug, info, warn, error (default info)
//
// ## Example
//
// ```bash
// export SITE24X7_AUTHTOKEN=your_token
// echo '{"attributes": {"display_name": "web", "description": "frontends"}}' > group.json
//
// site24x7ctl site24x7_monitor_group create group.json
// site24x7ctl site24x7_monitor_group exists group.json
// ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use site24x7_client::Site24x7HttpClient;
use site24x7_core::{ClientConfig, ResourceData, ResourceKind};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Operation succeeded
/// - 1: Usage, configuration or state file error
/// - 2: Operation failed
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    Success = 0,
    ConfigError = 1,
    OperationError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Lifecycle operation requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Operation {
    Create,
    Read,
    Update,
    Delete,
    Exists,
}

#[derive(Debug, Parser)]
#[command(name = "site24x7ctl")]
#[command(about = "Run one lifecycle operation on a Site24x7 resource")]
#[command(version)]
struct Cli {
    /// Resource type, e.g. site24x7_website_monitor
    #[arg(value_parser = ResourceKind::from_type_name)]
    kind: ResourceKind,

    /// Operation to run
    #[arg(value_enum)]
    operation: Operation,

    /// State file, read before and written after the operation
    state_path: PathBuf,

    /// Log level
    #[arg(long, env = "SITE24X7_LOG_LEVEL", default_value = "info")]
    log_level: Level,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version land here too
            return if e.use_stderr() {
                CtlExitCode::ConfigError.into()
            } else {
                CtlExitCode::Success.into()
            };
        }
    };

    // logs go to stderr; stdout carries the `exists` answer
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let config = match ClientConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::OperationError.into();
        }
    };

    rt.block_on(async {
        let data = match load_state(&cli).await {
            Ok(data) => data,
            Err(e) => {
                error!("State file error: {:#}", e);
                return CtlExitCode::ConfigError;
            }
        };

        match run(&cli, &config, data).await {
            Ok(()) => CtlExitCode::Success,
            Err(e) => {
                error!("{} {:?} failed: {:#}", cli.kind.type_name(), cli.operation, e);
                CtlExitCode::OperationError
            }
        }
    })
    .into()
}

/// Read the state file and check it against the kind's schema
async fn load_state(cli: &Cli) -> Result<ResourceData> {
    let raw = tokio::fs::read_to_string(&cli.state_path)
        .await
        .with_context(|| format!("reading {}", cli.state_path.display()))?;

    let data: ResourceData = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", cli.state_path.display()))?;

    Ok(data.validated(cli.kind.resource().schema())?)
}

async fn store_state(cli: &Cli, data: &ResourceData) -> Result<()> {
    let mut raw = serde_json::to_string_pretty(data)?;
    raw.push('\n');

    tokio::fs::write(&cli.state_path, raw)
        .await
        .with_context(|| format!("writing {}", cli.state_path.display()))
}

/// Run one lifecycle operation and persist the outcome
async fn run(cli: &Cli, config: &ClientConfig, mut data: ResourceData) -> Result<()> {
    let client = Site24x7HttpClient::new(config)?;
    let resource = cli.kind.resource();

    info!(
        "Running {:?} on {} (id: {:?})",
        cli.operation,
        resource.type_name(),
        data.id()
    );

    match cli.operation {
        Operation::Create => {
            resource.create(&mut data, &client).await?;
            store_state(cli, &data).await?;
        }
        Operation::Read => {
            resource.read(&mut data, &client).await?;
            store_state(cli, &data).await?;
        }
        Operation::Update => {
            resource.update(&mut data, &client).await?;
            store_state(cli, &data).await?;
        }
        Operation::Delete => {
            resource.delete(&data, &client).await?;
            data.clear_id();
            store_state(cli, &data).await?;
        }
        Operation::Exists => {
            let exists = resource.exists(&data, &client).await?;
            println!("{}", exists);
        }
    }

    info!("{:?} finished (id: {:?})", cli.operation, data.id());
    Ok(())
}
