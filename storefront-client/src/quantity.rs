use crate::error::{ClientError, ClientResult};
use storefront_core::{ApplicationError, ApplicationResult, Environment};

pub const DEFAULT_MIN_QUANTITY: u32 = 1;
pub const DEFAULT_MAX_QUANTITY: u32 = 100;

/// 数量上下限（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityBounds {
    min: u32,
    max: u32,
}

impl QuantityBounds {
    pub fn new(min: u32, max: u32) -> ClientResult<Self> {
        if min < 1 || min > max {
            return Err(ClientError::InvalidQuantityBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// 读取 `catalog.quantity.min` / `catalog.quantity.max`
    pub fn from_environment(env: &Environment) -> ApplicationResult<Self> {
        let min = read_bound(env, "catalog.quantity.min", DEFAULT_MIN_QUANTITY)?;
        let max = read_bound(env, "catalog.quantity.max", DEFAULT_MAX_QUANTITY)?;
        Self::new(min, max)
            .map_err(|e| ApplicationError::invalid_config("catalog.quantity", e.to_string()))
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(i64::from(self.min), i64::from(self.max)) as u32
    }
}

impl Default for QuantityBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_QUANTITY,
            max: DEFAULT_MAX_QUANTITY,
        }
    }
}

fn read_bound(env: &Environment, key: &str, default: u32) -> ApplicationResult<u32> {
    let value = env.get_i64_or(key, i64::from(default));
    u32::try_from(value)
        .map_err(|_| ApplicationError::invalid_config(key, format!("{} is not a valid quantity", value)))
}

/// 数量步进器，值始终落在上下限之内
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityStepper {
    value: u32,
    bounds: QuantityBounds,
}

impl QuantityStepper {
    pub fn new(bounds: QuantityBounds) -> Self {
        Self {
            value: bounds.min,
            bounds,
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn bounds(&self) -> QuantityBounds {
        self.bounds
    }

    pub fn increment(&mut self) -> u32 {
        self.value = self.bounds.clamp(i64::from(self.value) + 1);
        self.value
    }

    pub fn decrement(&mut self) -> u32 {
        self.value = self.bounds.clamp(i64::from(self.value) - 1);
        self.value
    }

    /// 输入框直接赋值：清空或输入 0 时回到下限
    pub fn set(&mut self, input: Option<i64>) -> u32 {
        self.value = match input {
            None | Some(0) => self.bounds.min,
            Some(value) => self.bounds.clamp(value),
        };
        self.value
    }
}

impl Default for QuantityStepper {
    fn default() -> Self {
        Self::new(QuantityBounds::default())
    }
}
