use clap::Parser;

/// Entry point of the cgroup exporter.
///
/// Serves the cgroup v2 accounting files below `--cgroup-root` as Prometheus metrics on
/// `--listen-address`. Log verbosity is controlled by `RUST_LOG` and defaults to `info`.
///
/// # Examples
///
/// ```bash
/// RUST_LOG=debug cgroup-exporter --cgroup 'system.slice/*.service'
/// ```
#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = cgroup_exporter::Config::parse();
    cgroup_exporter::run(config).await
}
