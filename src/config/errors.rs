//! Error types for configuration validation

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("page_size must be greater than 0")]
    ZeroPageSize,

    #[error("page_size_options must not be empty")]
    NoPageSizeOptions,

    #[error("page_size_options must not contain 0")]
    ZeroPageSizeOption,

    #[error("tick_rate_ms must be greater than 0")]
    ZeroTickRate,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
