use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFile(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid filter '{0}', expected Column=value")]
    InvalidFilter(String),
}
