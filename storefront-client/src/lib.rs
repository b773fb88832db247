//! Storefront Client - 商品页状态与表单提交流程
//!
//! 渲染、路由与 HTTP 调用都在外部；这里只维护它们依赖的状态与规则。

pub mod error;
pub mod flow;
pub mod product;
pub mod quantity;
pub mod requests;
pub mod session;

pub use error::{ClientError, ClientResult, FlowError, LOGIN_REQUIRED_MESSAGE};
pub use flow::{RecoveryFlow, RecoveryGateway, RegisteredUser, SignupFlow, SignupGateway};
pub use product::{
    category_breadcrumbs, format_price, ProductCategory, ProductVariant, ProductView,
    PurchaseAction, VariantDisplay, VariantSelector,
};
pub use quantity::{QuantityBounds, QuantityStepper};
pub use requests::{preorder_request, wish_request, ClientPreorderRequest, ClientWishRequest};
pub use session::{AuthSession, UserSummary};
