//! 商品详情页的派生状态

use crate::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub brand_id: i64,
    pub brand_name: String,
}

/// 商品分类，`category_parent` 指向上级分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub category_id: i64,
    pub category_name: String,
    pub category_slug: String,
    #[serde(default)]
    pub category_parent: Option<Box<ProductCategory>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantProperty {
    pub id: i64,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantProperties {
    pub content: Vec<VariantProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub variant_id: i64,
    /// 单位：越南盾
    pub variant_price: u64,
    #[serde(default)]
    pub variant_properties: Option<VariantProperties>,
}

/// 商品详情（服务端已校验的数据）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub product_id: i64,
    pub product_name: String,
    pub product_slug: String,
    #[serde(default)]
    pub product_short_description: Option<String>,
    pub product_saleable: bool,
    #[serde(default)]
    pub product_brand: Option<Brand>,
    #[serde(default)]
    pub product_category: Option<ProductCategory>,
    #[serde(default)]
    pub product_images: Vec<ProductImage>,
    #[serde(default)]
    pub product_variants: Vec<ProductVariant>,
    #[serde(default)]
    pub product_average_rating_score: f64,
    #[serde(default)]
    pub product_count_reviews: u32,
}

/// 版本区域的展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantDisplay {
    /// 没有任何版本
    None,
    /// 只有一个默认版本（所有版本都没有属性）
    DefaultOnly,
    /// 可以按属性选择版本
    Selectable,
}

impl VariantDisplay {
    pub fn of(product: &ProductView) -> Self {
        if product.product_variants.is_empty() {
            VariantDisplay::None
        } else if product
            .product_variants
            .iter()
            .any(|variant| variant.variant_properties.is_some())
        {
            VariantDisplay::Selectable
        } else {
            VariantDisplay::DefaultOnly
        }
    }
}

/// 主操作按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseAction {
    /// 有货：选择购买，同时显示数量输入
    Buy,
    /// 缺货：预订
    Preorder,
}

impl PurchaseAction {
    pub fn for_product(product: &ProductView) -> Self {
        if product.product_saleable {
            PurchaseAction::Buy
        } else {
            PurchaseAction::Preorder
        }
    }

    pub fn shows_quantity_input(self) -> bool {
        self == PurchaseAction::Buy
    }
}

/// 当前选中的版本，初始为第一个
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantSelector {
    selected: usize,
}

impl VariantSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn select(&mut self, product: &ProductView, index: usize) -> ClientResult<()> {
        let len = product.product_variants.len();
        if index >= len {
            return Err(ClientError::VariantOutOfRange { index, len });
        }
        self.selected = index;
        Ok(())
    }

    pub fn selected_variant<'a>(&self, product: &'a ProductView) -> Option<&'a ProductVariant> {
        product.product_variants.get(self.selected)
    }

    pub fn selected_price(&self, product: &ProductView) -> Option<u64> {
        self.selected_variant(product).map(|variant| variant.variant_price)
    }
}

/// 面包屑：从根分类到当前分类
pub fn category_breadcrumbs(category: &ProductCategory) -> Vec<&ProductCategory> {
    let mut chain = Vec::new();
    let mut current = Some(category);
    while let Some(node) = current {
        chain.push(node);
        current = node.category_parent.as_deref();
    }
    chain.reverse();
    chain
}

/// 按越南习惯用 `.` 分隔千位
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(ch);
    }
    formatted
}
