use thiserror::Error;

/// Errors raised while bringing the server up or running it
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    App(#[from] shared::error::AppError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Result alias for server startup
pub type Result<T> = std::result::Result<T, ServerError>;
