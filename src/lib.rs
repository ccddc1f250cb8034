//! cgroup-exporter: exposes cgroup v2 resource accounting as Prometheus metrics.
//!
//! The [`cgroup`] module holds the collection engine: it walks a cgroup2 hierarchy, decodes
//! the accounting files it has descriptors for and streams typed, labelled samples. The
//! [`api`] module serves those samples on a `/metrics` scrape endpoint.
pub mod api;
pub mod cgroup;
pub mod config;
pub mod error;
pub mod fsutil;

use std::sync::Arc;

pub use config::Config;

/// Runs the exporter until SIGINT or SIGTERM.
///
/// # Errors
///
/// Possible errors include:
/// - An invalid cgroup glob.
/// - Failure to bind the listen address.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!("Configuration: {config:?}");
    let collector = cgroup::Collector::new(
        fsutil::DirFs::new(&config.cgroup_root),
        &config.cgroup,
    )?;
    log::info!(
        "Monitoring `{}` below {}",
        if config.cgroup.is_empty() {
            cgroup::DEFAULT_GLOB
        } else {
            config.cgroup.as_str()
        },
        config.cgroup_root.display()
    );

    api::APIServer::new(Arc::new(collector))
        .listen(config.listen_address, shutdown_signal())
        .await?;
    log::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::error!("failed to listen for SIGINT: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                log::error!("failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Received shutdown signal");
}
