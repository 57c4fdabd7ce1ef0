use splitcalc_allocation::AllocationError;
use splitcalc_client::ClientError;
use splitcalc_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("invalid config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("distribution name must not be empty")]
    UnnamedDistribution,

    #[error("distribution {0:?} is defined more than once")]
    DuplicateDistribution(String),

    #[error("unknown distribution {0:?}")]
    UnknownDistribution(String),

    #[error("no distribution selected")]
    NoDistributions,

    #[error("distribution {name:?}: {source}")]
    Distribution {
        name: String,
        #[source]
        source: AllocationError,
    },
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("distribution {name:?}: {source}")]
    Allocation {
        name: String,
        #[source]
        source: AllocationError,
    },

    #[error("distribution {name:?}: querying {target} failed: {source}")]
    Client {
        name: String,
        target: String,
        #[source]
        source: ClientError,
    },

    #[error("distribution {name:?}: balance of {account} is unreadable: {source}")]
    Balance {
        name: String,
        account: String,
        #[source]
        source: TypesError,
    },

    #[error("distribution {0:?} splits by supply ratio; both supplies are required")]
    MissingSupply(String),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}
