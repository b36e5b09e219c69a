use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error(
        "Missing credential: {0}. Set it in one of:\n\
        - DOME9_ACCESS_ID / DOME9_SECRET_KEY environment variables\n\
        - ./dome9.yaml\n\
        - ~/.config/dome9/config.yaml\n\
        or point DOME9_CONFIG_PATH at a config file"
    )]
    MissingCredential(&'static str),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    CurrentDir(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
