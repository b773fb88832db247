/// 统一的错误处理类型
///
/// 二进制入口使用 anyhow::Result，通过 .context() 添加错误上下文信息；
/// 库内部使用 [`ApplicationError`] 表达可匹配的失败原因。
///
/// # 示例
///
/// ```rust,ignore
/// use anyhow::{Context, Result};
///
/// fn load(path: &str) -> Result<Environment> {
///     Environment::from_toml_file(path)
///         .context(format!("Failed to load config '{}'", path))
/// }
/// ```
pub use anyhow::Result;

use thiserror::Error;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInitFailed(String),

    #[error("Failed to read config file {path}: {source}")]
    ConfigLoad {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config '{name}': {message}")]
    ConfigParse { name: String, message: String },

    #[error("Invalid config '{key}': {message}")]
    InvalidConfig { key: String, message: String },
}

impl ApplicationError {
    pub fn invalid_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type ApplicationResult<T> = std::result::Result<T, ApplicationError>;
