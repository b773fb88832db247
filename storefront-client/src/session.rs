use serde::{Deserialize, Serialize};

/// 已登录用户的摘要信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
}

/// 客户端的认证状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    user: Option<UserSummary>,
    current_signup_user_id: Option<i64>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserSummary) -> Self {
        Self {
            user: Some(user),
            current_signup_user_id: None,
        }
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn sign_in(&mut self, user: UserSummary) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    /// 注册第一步完成后记录新用户 ID，供后续验证步骤使用
    pub fn update_current_signup_user_id(&mut self, user_id: i64) {
        self.current_signup_user_id = Some(user_id);
    }

    pub fn current_signup_user_id(&self) -> Option<i64> {
        self.current_signup_user_id
    }
}
