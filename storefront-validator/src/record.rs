use crate::error::{ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 松散类型的表单记录：字段名 -> 任意 JSON 值
///
/// 嵌套字段既可以用扁平的点分键（`"address.line"`）表示，
/// 也可以用嵌套对象（`{"address": {"line": ...}}`）表示，两种写法都能被 [`FormRecord::get`] 找到。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormRecord {
    fields: Map<String, Value>,
}

impl FormRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 解析 JSON 文本，顶层必须是对象
    pub fn from_json_str(json: &str) -> ValidationResult<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| ValidationError::new(format!("Malformed form record: {}", e)))?;
        Self::try_from(value)
    }

    /// 写入字段（键按原样保存，不拆分点号）
    pub fn insert(&mut self, path: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(path.into(), value.into())
    }

    pub fn with(mut self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(path, value);
        self
    }

    pub fn remove(&mut self, path: &str) -> Option<Value> {
        self.fields.remove(path)
    }

    /// 按字段路径取值：先查扁平键，再沿嵌套对象逐段查找
    pub fn get(&self, path: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }

        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}

impl TryFrom<Value> for FormRecord {
    type Error = ValidationError;

    fn try_from(value: Value) -> ValidationResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ValidationError::new(format!(
                "Form record must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl From<Map<String, Value>> for FormRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
