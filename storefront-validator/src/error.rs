use serde::Serialize;
use thiserror::Error;

/// 单条字段校验失败：字段路径 + 面向用户的提示
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{path}: {message}")]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// 验证错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// 按字段声明顺序排列
    #[error("Field validation errors: {}", .0.len())]
    Violations(Vec<FieldViolation>),
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::ValidationFailed(message.into())
    }

    pub fn field_error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Violations(vec![FieldViolation::new(path, message)])
    }

    /// 第一条字段错误（声明顺序最靠前的字段）
    pub fn first(&self) -> Option<&FieldViolation> {
        match self {
            Self::Violations(violations) => violations.first(),
            Self::ValidationFailed(_) => None,
        }
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Violations(violations) => violations,
            Self::ValidationFailed(_) => &[],
        }
    }

    /// 按字段路径分组的错误消息，供表单逐项渲染，保持字段首次出现的顺序
    pub fn field_errors(&self) -> Vec<(&str, Vec<&str>)> {
        let mut errors: Vec<(&str, Vec<&str>)> = Vec::new();
        for violation in self.violations() {
            let path = violation.path.as_str();
            let message = violation.message.as_str();
            match errors.iter_mut().find(|(p, _)| *p == path) {
                Some((_, messages)) => messages.push(message),
                None => errors.push((path, vec![message])),
            }
        }
        errors
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// 校验结果：全部通过，或按声明顺序给出失败字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<FieldViolation>),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(violations) => violations,
        }
    }

    pub fn first_violation(&self) -> Option<&FieldViolation> {
        self.violations().first()
    }

    pub fn into_result(self) -> ValidationResult<()> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(violations) => Err(ValidationError::Violations(violations)),
        }
    }
}

impl From<Vec<FieldViolation>> for ValidationOutcome {
    fn from(violations: Vec<FieldViolation>) -> Self {
        if violations.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(violations)
        }
    }
}
