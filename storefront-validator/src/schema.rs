use crate::error::{FieldViolation, ValidationOutcome};
use crate::record::FormRecord;
use crate::validator::{ValidationRules, ViolationCollector};
use regex::Regex;

/// 字段期望的值形状
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// 非空字符串
    Text,
    /// 缺失、null 或字符串
    NullableText,
    /// 字符串数组（可为空）
    TextList,
}

/// 作用于文本值的格式约束
#[derive(Debug, Clone)]
pub enum Constraint {
    MinLength { min: usize, message: String },
    Email { message: String },
    Pattern { regex: Regex, message: String },
}

impl Constraint {
    fn check(&self, value: &str, path: &str) -> Result<(), FieldViolation> {
        match self {
            Constraint::MinLength { min, message } => {
                ValidationRules::min_length(value, path, *min, message)
            }
            Constraint::Email { message } => ValidationRules::email(value, path, message),
            Constraint::Pattern { regex, message } => {
                ValidationRules::pattern(value, path, regex, message)
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Constraint::MinLength { message, .. }
            | Constraint::Email { message }
            | Constraint::Pattern { message, .. } => message,
        }
    }
}

/// 规则表中的一行：字段路径、形状、形状不符时的提示、依次检查的约束
#[derive(Debug, Clone)]
pub struct FieldRule {
    path: String,
    shape: Shape,
    shape_message: String,
    constraints: Vec<Constraint>,
}

impl FieldRule {
    pub fn new(path: impl Into<String>, shape: Shape, shape_message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            shape,
            shape_message: shape_message.into(),
            constraints: Vec::new(),
        }
    }

    pub fn text(path: impl Into<String>, shape_message: impl Into<String>) -> Self {
        Self::new(path, Shape::Text, shape_message)
    }

    pub fn nullable_text(path: impl Into<String>, shape_message: impl Into<String>) -> Self {
        Self::new(path, Shape::NullableText, shape_message)
    }

    pub fn text_list(path: impl Into<String>, shape_message: impl Into<String>) -> Self {
        Self::new(path, Shape::TextList, shape_message)
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn shape_message(&self) -> &str {
        &self.shape_message
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// 先检查形状，再按顺序检查约束，遇到第一个失败即停止
    pub fn check(&self, record: &FormRecord) -> Result<(), FieldViolation> {
        let value = record.get(&self.path);
        let text = match self.shape {
            Shape::Text => Some(ValidationRules::text(value, &self.path, &self.shape_message)?),
            Shape::NullableText => {
                ValidationRules::nullable_text(value, &self.path, &self.shape_message)?
            }
            Shape::TextList => {
                ValidationRules::text_list(value, &self.path, &self.shape_message)?;
                None
            }
        };

        match text {
            Some(text) => self
                .constraints
                .iter()
                .try_for_each(|constraint| constraint.check(text, &self.path)),
            None => Ok(()),
        }
    }
}

/// 不可变的规则表
///
/// 每个字段独立求值，结果按字段声明顺序排列，每个字段最多贡献一条错误。
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    rules: Vec<FieldRule>,
}

impl Schema {
    pub fn new(name: &'static str, rules: Vec<FieldRule>) -> Self {
        Self { name, rules }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, path: &str) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.path == path)
    }

    pub fn evaluate(&self, record: &FormRecord) -> ValidationOutcome {
        let mut collector = ViolationCollector::new();
        for rule in &self.rules {
            collector.add_result(rule.check(record));
        }

        let outcome = collector.build();
        if let Some(first) = outcome.first_violation() {
            tracing::debug!(
                schema = self.name,
                violations = outcome.violations().len(),
                first = %first,
                "Validation error"
            );
        }
        outcome
    }
}
