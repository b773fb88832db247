//! 收藏与预订请求

use crate::error::{ClientError, ClientResult};
use crate::product::ProductView;
use crate::session::AuthSession;
use serde::{Deserialize, Serialize};

/// 新建预订的初始状态
pub const PREORDER_STATUS_ACTIVE: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientWishRequest {
    pub user_id: i64,
    pub product_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPreorderRequest {
    pub user_id: i64,
    pub product_id: i64,
    pub status: i32,
}

pub fn wish_request(session: &AuthSession, product: &ProductView) -> ClientResult<ClientWishRequest> {
    let user = session.user().ok_or(ClientError::LoginRequired)?;
    Ok(ClientWishRequest {
        user_id: user.id,
        product_id: product.product_id,
    })
}

pub fn preorder_request(
    session: &AuthSession,
    product: &ProductView,
) -> ClientResult<ClientPreorderRequest> {
    let user = session.user().ok_or(ClientError::LoginRequired)?;
    Ok(ClientPreorderRequest {
        user_id: user.id,
        product_id: product.product_id,
        status: PREORDER_STATUS_ACTIVE,
    })
}
