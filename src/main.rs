use sentiment_cluster::analysis::lexicon::Lexicon;
use sentiment_cluster::config::{NodeConfig, NodeRole, PartitionTarget, USAGE};
use sentiment_cluster::dispatch::dispatcher::WorkerDispatcher;
use sentiment_cluster::job::coordinator::JobCoordinator;
use sentiment_cluster::pipeline::pipeline::AnalysisPipeline;
use sentiment_cluster::server::{coordinator_router, worker_router};

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        eprintln!("{}", USAGE);
        std::process::exit(0);
    }

    let config = match NodeConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    // 1. Lexicon:
    let lexicon = match &config.lexicon_path {
        Some(path) => {
            tracing::info!("Loading lexicon from {}", path.display());
            Lexicon::from_file(path)?
        }
        None => Lexicon::default(),
    };
    let lexicon = Arc::new(lexicon);

    // 2. Router for this node's role:
    let app = match config.role {
        NodeRole::Worker => {
            tracing::info!("Starting sentiment worker on {}", config.bind_addr);
            worker_router(lexicon)
        }
        NodeRole::Coordinator => {
            tracing::info!(
                "Starting coordinator on {} (corpus: {})",
                config.bind_addr,
                config.corpus_path.display()
            );
            for assignment in &config.assignments {
                match &assignment.target {
                    PartitionTarget::Local => {
                        tracing::info!("  - {} -> local", assignment.platform)
                    }
                    PartitionTarget::Remote(url) => {
                        tracing::info!("  - {} -> {}", assignment.platform, url)
                    }
                }
            }

            let dispatcher = WorkerDispatcher::new(lexicon, config.dispatch_timeout);
            let pipeline = Arc::new(AnalysisPipeline::from_config(&config, dispatcher));
            let coordinator = JobCoordinator::new(pipeline.clone());

            coordinator_router(pipeline, coordinator)
        }
    };

    // 3. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
