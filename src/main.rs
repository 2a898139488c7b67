use env_logger::Env;
use lightstep_notifier::{
    build::BuildOutcomeEvent,
    client::DefaultWebhookClient,
    notification::{severity_options, BuildListener, NotifyOutcome},
    NotifierConfig,
};
use log::{error, info};
use std::path::PathBuf;
use std::process::exit;
use std::sync::Arc;
use structopt::StructOpt;
use tokio::io::AsyncReadExt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "lightstep-notifier",
    about = "Send alerts to Lightstep Incident Response"
)]
struct Options {
    /// Path to the configuration file
    #[structopt(short, long, default_value = "~/.lightstep-notifier.yaml")]
    config: String,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Notify the job's webhook about a completed build
    Notify {
        /// JSON file describing the completed build, stdin if missing
        #[structopt(short, long, parse(from_os_str))]
        event: Option<PathBuf>,
    },

    /// List the severities that can be selected per build result
    Severities,
}

async fn read_event(path: Option<PathBuf>) -> Result<BuildOutcomeEvent, String> {
    let raw = match path {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?,
        None => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .map_err(|e| format!("failed to read stdin: {}", e))?;
            raw
        }
    };
    serde_json::from_str(&raw).map_err(|e| format!("invalid build event: {}", e))
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = Options::from_args();
    let event_path = match options.command {
        Command::Severities => {
            for (label, value) in severity_options() {
                println!("{}\t{}", label, value);
            }
            return;
        }
        Command::Notify { event } => event,
    };

    let config = match NotifierConfig::new(&options.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Error loading config: {}", e);
            exit(1);
        }
    };
    let event = match read_event(event_path).await {
        Ok(event) => event,
        Err(e) => {
            error!("{}", e);
            exit(1);
        }
    };
    let client = match DefaultWebhookClient::new(config.http.timeout()) {
        Ok(client) => client,
        Err(e) => {
            error!("Error building HTTP client: {}", e);
            exit(1);
        }
    };

    let config = Arc::new(config);
    let listener = BuildListener::new(Arc::new(client), config.clone(), config);
    match listener.on_completed(&event).await {
        NotifyOutcome::Dispatched(status) => info!("Notification finished: {:?}", status),
        NotifyOutcome::Skipped => info!("No notification sent"),
        NotifyOutcome::NoConfiguration => info!("Job is not configured, nothing to do"),
    }
}
