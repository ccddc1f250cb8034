use std::net::SocketAddr;
use std::path::PathBuf;

/// Command line and environment configuration of the exporter.
#[derive(Debug, Clone, clap::Parser)]
#[command(
    name = "cgroup-exporter",
    version,
    about = "Exports cgroup v2 resource accounting as Prometheus metrics"
)]
pub struct Config {
    /// Address to listen on.
    #[arg(
        long,
        env = "CGROUP_EXPORTER_LISTEN_ADDRESS",
        default_value = "0.0.0.0:13232"
    )]
    pub listen_address: SocketAddr,

    /// What cgroup to monitor. Can be a glob. If empty all cgroups are monitored.
    #[arg(long, env = "CGROUP_EXPORTER_CGROUP", default_value = "")]
    pub cgroup: String,

    /// Mount point of the cgroup2 hierarchy.
    #[arg(
        long,
        env = "CGROUP_EXPORTER_CGROUP_ROOT",
        default_value = "/sys/fs/cgroup"
    )]
    pub cgroup_root: PathBuf,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "cgroup-exporter",
            "--listen-address",
            "127.0.0.1:9000",
            "--cgroup",
            "system.slice/*.service",
            "--cgroup-root",
            "/rootfs/sys/fs/cgroup",
        ])
        .unwrap();
        assert_eq!(config.listen_address, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.cgroup, "system.slice/*.service");
        assert_eq!(config.cgroup_root, PathBuf::from("/rootfs/sys/fs/cgroup"));
    }

    #[test]
    fn test_invalid_listen_address() {
        assert!(Config::try_parse_from(["cgroup-exporter", "--listen-address", ":13232"]).is_err());
    }
}
