use storefront_validator::ValidationError;
use thiserror::Error;

/// 未登录时使用需要身份的功能
pub const LOGIN_REQUIRED_MESSAGE: &str = "Vui lòng đăng nhập để sử dụng chức năng";

/// 客户端状态错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{}", LOGIN_REQUIRED_MESSAGE)]
    LoginRequired,

    #[error("Variant index {index} out of range ({len} variants)")]
    VariantOutOfRange { index: usize, len: usize },

    #[error("Invalid quantity bounds: min {min}, max {max}")]
    InvalidQuantityBounds { min: u32, max: u32 },
}

/// 表单提交流程错误
///
/// 校验失败时请求不会发出；`Gateway` 包装远端调用的错误
#[derive(Debug, Error)]
pub enum FlowError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Gateway error: {0}")]
    Gateway(#[source] E),
}

impl<E: std::error::Error + 'static> FlowError<E> {
    /// 校验失败时的错误详情
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Gateway(_) => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
