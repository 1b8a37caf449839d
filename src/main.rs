use anyhow::Context;
use clap::Parser;
use genrescope_api::{RestApi, SessionLimits};
use genrescope_core::{DataFiles, Session};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Dashboard service for the US novel corpus genre analysis
#[derive(Parser, Debug)]
#[command(name = "genrescope")]
#[command(about = "Serve the genre-classification dashboard", long_about = None)]
struct Args {
    /// Directory holding the four datasets
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// Projection table, relative to the data directory
    #[arg(long, default_value = "tsne_data.csv")]
    projection_file: PathBuf,

    /// Metadata table, relative to the data directory
    #[arg(long, default_value = "metadata.tsv")]
    metadata_file: PathBuf,

    /// Scores table, relative to the data directory
    #[arg(long, default_value = "scores.tsv")]
    scores_file: PathBuf,

    /// Top-words JSON, relative to the data directory
    #[arg(long, default_value = "top_100_words.json")]
    top_words_file: PathBuf,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8050)]
    http_port: u16,

    /// Drop sessions idle for this many seconds
    #[arg(long, default_value_t = 1800)]
    session_idle_secs: u64,

    /// Maximum number of live sessions
    #[arg(long, default_value_t = 10_000)]
    max_sessions: usize,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn data_files(&self) -> DataFiles {
        DataFiles {
            projection: self.data_dir.join(&self.projection_file),
            metadata: self.data_dir.join(&self.metadata_file),
            scores: self.data_dir.join(&self.scores_file),
            top_words: self.data_dir.join(&self.top_words_file),
        }
    }

    fn session_limits(&self) -> SessionLimits {
        SessionLimits {
            idle_timeout: Duration::from_secs(self.session_idle_secs),
            max_sessions: self.max_sessions,
        }
    }
}

/// Turn the HTTP thread's outcome into the process result.
fn server_exit(outcome: std::thread::Result<std::io::Result<()>>) -> anyhow::Result<()> {
    match outcome {
        Ok(result) => result.context("HTTP server failed"),
        Err(_) => anyhow::bail!("HTTP server thread panicked"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting GenreScope v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);

    let store = genrescope_storage::load(&args.data_files())?;
    // Refuse to serve if a fresh session could not render its defaults.
    Session::new(&store)?;
    let store = Arc::new(store);
    info!("Data store ready: {} books", store.book_count());

    let host = args.host.clone();
    let http_port = args.http_port;
    let limits = args.session_limits();
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", host, http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            let result = RestApi::start(store, host, http_port, limits).await;
            if let Err(e) = &result {
                error!("HTTP server error: {}", e);
            }
            result
        })
    });

    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        outcome = tokio::task::spawn_blocking(move || http_handle.join()) => {
            server_exit(outcome?)?;
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_failure_is_an_error() {
        let bind_failure = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err = server_exit(Ok(Err(bind_failure))).unwrap_err();
        assert!(format!("{:#}", err).contains("port taken"));

        let panic: Box<dyn std::any::Any + Send> = Box::new("boom");
        assert!(server_exit(Err(panic)).is_err());
        assert!(server_exit(Ok(Ok(()))).is_ok());
    }

    #[test]
    fn test_session_limit_flags() {
        let args = Args::parse_from(["genrescope", "--session-idle-secs", "5", "--max-sessions", "3"]);
        let limits = args.session_limits();
        assert_eq!(limits.idle_timeout, Duration::from_secs(5));
        assert_eq!(limits.max_sessions, 3);
    }
}
