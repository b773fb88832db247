//! 注册与找回密码的提交流程
//!
//! 先在本地校验，通过后把原样的输入交给远端网关。

use crate::error::FlowError;
use crate::session::AuthSession;
use serde::{Deserialize, Serialize};
use storefront_validator::{RecoveryInput, RegistrationInput, Validate};

/// 注册成功后服务端返回的用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub user_id: i64,
}

/// 注册接口
pub trait SignupGateway {
    type Error: std::error::Error + 'static;

    fn register(&self, input: &RegistrationInput) -> Result<RegisteredUser, Self::Error>;
}

/// 找回密码接口
pub trait RecoveryGateway {
    type Error: std::error::Error + 'static;

    fn request_reset(&self, input: &RecoveryInput) -> Result<(), Self::Error>;
}

pub struct SignupFlow<G> {
    gateway: G,
}

impl<G: SignupGateway> SignupFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn submit(
        &self,
        input: &RegistrationInput,
        session: &mut AuthSession,
    ) -> Result<RegisteredUser, FlowError<G::Error>> {
        input.validate()?;

        let user = self.gateway.register(input).map_err(|e| {
            tracing::warn!(error = %e, "Signup request failed");
            FlowError::Gateway(e)
        })?;

        session.update_current_signup_user_id(user.user_id);
        tracing::info!(user_id = user.user_id, "Signup step one completed");
        Ok(user)
    }
}

pub struct RecoveryFlow<G> {
    gateway: G,
}

impl<G: RecoveryGateway> RecoveryFlow<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn submit(&self, input: &RecoveryInput) -> Result<(), FlowError<G::Error>> {
        input.validate()?;

        self.gateway.request_reset(input).map_err(|e| {
            tracing::warn!(error = %e, "Password reset request failed");
            FlowError::Gateway(e)
        })?;

        tracing::info!("Password reset email requested");
        Ok(())
    }
}
