use crate::cgroup::stats::DecodeError;

/// A failure isolated to a single file or directory of a collection pass.
///
/// None of these abort the pass; the walker logs them and moves on.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("failed to open file `{path}`: {source}")]
    OpenFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to collect file `{path}`: {source}")]
    Decode {
        path: String,
        #[source]
        source: DecodeError,
    },
    #[error("failed to walk cgroup `{path}`: {source}")]
    TraversalFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid engine configuration, detected while constructing a collector.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid cgroup glob `{pattern}`: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

pub trait ResultOkLogExt<T, E> {
    fn ok_log(self) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::error!("{err}");
                None
            }
        }
    }
}
