use std::{
    fs::OpenOptions,
    net::SocketAddr,
    path::PathBuf,
    process::exit,
    sync::Arc,
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use finance_tracker::{
    AppState, BudgetConfig, Error, build_router, graceful_shutdown, logging_middleware, open_db,
};

/// The REST API server for finance_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long, env = "DATABASE_PATH")]
    db_path: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// File path to a JSON object mapping each category to its monthly budget.
    ///
    /// The built-in budgets are used if this is not set.
    #[arg(long, env = "BUDGET_PATH")]
    budget_path: Option<PathBuf>,

    /// How long, in milliseconds, a query waits on a locked database before failing.
    #[arg(long, env = "BUSY_TIMEOUT_MS", default_value_t = 5000)]
    busy_timeout_ms: u64,
}

#[tokio::main]
async fn main() {
    if let Err(error) = setup_logging() {
        eprintln!("Could not set up logging: {error}");
        exit(1);
    }

    let args = Args::parse();

    let state = match create_app_state(&args) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not start the server: {error}");
            exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state))
        .layer(middleware::from_fn(logging_middleware));

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        exit(1);
    }
}

fn create_app_state(args: &Args) -> Result<AppState, Error> {
    let budget = match &args.budget_path {
        Some(path) => BudgetConfig::load(path)?,
        None => BudgetConfig::default(),
    };

    for (category, limit) in budget.iter() {
        tracing::debug!("Budget for {category}: {limit}");
    }

    let connection = open_db(&args.db_path, Duration::from_millis(args.busy_timeout_ms))?;
    tracing::info!("Opened database at {}", args.db_path.display());

    AppState::new(connection, budget)
}

fn setup_logging() -> Result<(), std::io::Error> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the app logs its own errors.
        .on_failure(());

    router.layer(tracing_layer)
}
