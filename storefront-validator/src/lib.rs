//! Storefront Validator - 表单校验模块
//!
//! 以显式的规则表描述注册与找回密码表单，对松散类型的表单记录求值，
//! 按字段声明顺序返回带路径的错误提示。

pub mod error;
pub mod forms;
pub mod message;
pub mod record;
pub mod schema;
pub mod validator;

pub use error::*;
pub use forms::{
    recovery_schema, signup_schema, signup_schema_with, validate_recovery, validate_signup,
    Address, RecoveryInput, RegistrationInput,
};
pub use message::{MessageFormatter, VietnameseMessages};
pub use record::FormRecord;
pub use schema::{Constraint, FieldRule, Schema, Shape};
pub use validator::*;
