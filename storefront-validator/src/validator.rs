use crate::error::{FieldViolation, ValidationOutcome, ValidationResult};
use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    /// local-part@domain，本地部分的点只能出现在字符之间，域名至少包含一个点
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9_'+-]+(\.[a-zA-Z0-9_'+-]+)*@[a-zA-Z0-9-]+(\.[a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}$"
    )
            .expect("email regex is valid");
}

/// 验证器 trait
pub trait Validate {
    /// 完整的校验结果
    fn outcome(&self) -> ValidationOutcome;

    fn validate(&self) -> ValidationResult<()> {
        self.outcome().into_result()
    }
}

/// 验证规则
///
/// 每条规则只检查一件事，失败时返回带路径的 [`FieldViolation`]。
/// 形状类规则（text / nullable_text / text_list）同时把值收窄成后续规则可用的类型。
pub struct ValidationRules;

impl ValidationRules {
    /// 必填文本：缺失、非字符串、空字符串都视为未填写
    pub fn text<'a>(value: Option<&'a Value>, path: &str, message: &str) -> Result<&'a str, FieldViolation> {
        match value {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
            _ => Err(FieldViolation::new(path, message)),
        }
    }

    /// 可空文本：缺失或 null 返回 None，字符串返回 Some，其他类型失败
    pub fn nullable_text<'a>(
        value: Option<&'a Value>,
        path: &str,
        message: &str,
    ) -> Result<Option<&'a str>, FieldViolation> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(FieldViolation::new(path, message)),
        }
    }

    /// 文本数组：允许为空，每个元素都必须是字符串
    ///
    /// 元素错误的路径为 `<path>.<index>`
    pub fn text_list<'a>(
        value: Option<&'a Value>,
        path: &str,
        message: &str,
    ) -> Result<Vec<&'a str>, FieldViolation> {
        let items = match value {
            Some(Value::Array(items)) => items,
            _ => return Err(FieldViolation::new(path, message)),
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .ok_or_else(|| FieldViolation::new(format!("{}.{}", path, index), message))
            })
            .collect()
    }

    /// 最小长度，按字符计数
    pub fn min_length(value: &str, path: &str, min: usize, message: &str) -> Result<(), FieldViolation> {
        if value.chars().count() < min {
            return Err(FieldViolation::new(path, message));
        }
        Ok(())
    }

    /// 验证邮箱格式
    pub fn email(value: &str, path: &str, message: &str) -> Result<(), FieldViolation> {
        if !EMAIL_REGEX.is_match(value) {
            return Err(FieldViolation::new(path, message));
        }
        Ok(())
    }

    /// 验证正则表达式（调用方负责锚定 `^...$`）
    pub fn pattern(value: &str, path: &str, regex: &Regex, message: &str) -> Result<(), FieldViolation> {
        if !regex.is_match(value) {
            return Err(FieldViolation::new(path, message));
        }
        Ok(())
    }
}

/// 按到达顺序收集字段错误
#[derive(Debug, Default)]
pub struct ViolationCollector {
    violations: Vec<FieldViolation>,
}

impl ViolationCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.violations.push(FieldViolation::new(path, message));
    }

    /// 记录失败并丢弃，成功时把值交还调用方
    pub fn add_result<T>(&mut self, result: Result<T, FieldViolation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.violations.push(violation);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn build(self) -> ValidationOutcome {
        ValidationOutcome::from(self.violations)
    }
}
