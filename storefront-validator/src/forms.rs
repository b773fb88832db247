//! 注册表单与找回密码表单的规则表及对应的强类型输入

use crate::error::ValidationOutcome;
use crate::message::{MessageFormatter, VietnameseMessages, EMAIL_MESSAGE, PHONE_MESSAGE, REQUIRED_MESSAGE};
use crate::record::FormRecord;
use crate::schema::{Constraint, FieldRule, Schema};
use crate::validator::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const FULLNAME: &str = "fullname";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";
pub const GENDER: &str = "gender";
pub const ADDRESS_LINE: &str = "address.line";
pub const ADDRESS_PROVINCE_ID: &str = "address.provinceId";
pub const ADDRESS_DISTRICT_ID: &str = "address.districtId";
pub const ADDRESS_WARD_ID: &str = "address.wardId";
pub const AVATAR: &str = "avatar";
pub const STATUS: &str = "status";
pub const ROLES: &str = "roles";

pub const USERNAME_LABEL: &str = "Tên tài khoản";
pub const PASSWORD_LABEL: &str = "Mật khẩu";
pub const USERNAME_MIN_LENGTH: usize = 2;
pub const PASSWORD_MIN_LENGTH: usize = 8;

lazy_static::lazy_static! {
    /// 越南手机号：可选 +84 / 84 / 0 前缀，运营商号段 3/5/7/8/9，再跟 8 位数字
    pub static ref PHONE_REGEX: Regex =
        Regex::new(r"^(\+84|84|0)[35789][0-9]{8}$").expect("phone regex is valid");

    static ref SIGNUP_SCHEMA: Schema = signup_schema_with(&VietnameseMessages);
    static ref RECOVERY_SCHEMA: Schema = build_recovery_schema();
}

/// 进程级共享的注册表单规则
pub fn signup_schema() -> &'static Schema {
    &SIGNUP_SCHEMA
}

/// 进程级共享的找回密码规则
pub fn recovery_schema() -> &'static Schema {
    &RECOVERY_SCHEMA
}

/// 使用自定义提示格式化器构建注册表单规则
pub fn signup_schema_with(formatter: &dyn MessageFormatter) -> Schema {
    Schema::new(
        "signup",
        vec![
            FieldRule::text(USERNAME, REQUIRED_MESSAGE).with(Constraint::MinLength {
                min: USERNAME_MIN_LENGTH,
                message: formatter.min_length(USERNAME_LABEL, USERNAME_MIN_LENGTH),
            }),
            FieldRule::text(PASSWORD, REQUIRED_MESSAGE).with(Constraint::MinLength {
                min: PASSWORD_MIN_LENGTH,
                message: formatter.min_length(PASSWORD_LABEL, PASSWORD_MIN_LENGTH),
            }),
            FieldRule::text(FULLNAME, REQUIRED_MESSAGE),
            FieldRule::text(EMAIL, REQUIRED_MESSAGE).with(Constraint::Email {
                message: EMAIL_MESSAGE.to_string(),
            }),
            FieldRule::text(PHONE, REQUIRED_MESSAGE).with(Constraint::Pattern {
                regex: PHONE_REGEX.clone(),
                message: PHONE_MESSAGE.to_string(),
            }),
            // 只要求有值，不限定 M/F
            FieldRule::text(GENDER, REQUIRED_MESSAGE),
            FieldRule::text(ADDRESS_LINE, REQUIRED_MESSAGE),
            FieldRule::text(ADDRESS_PROVINCE_ID, REQUIRED_MESSAGE),
            FieldRule::text(ADDRESS_DISTRICT_ID, REQUIRED_MESSAGE),
            FieldRule::text(ADDRESS_WARD_ID, REQUIRED_MESSAGE),
            FieldRule::nullable_text(AVATAR, REQUIRED_MESSAGE),
            FieldRule::text(STATUS, REQUIRED_MESSAGE),
            FieldRule::text_list(ROLES, REQUIRED_MESSAGE),
        ],
    )
}

fn build_recovery_schema() -> Schema {
    Schema::new(
        "recovery",
        vec![FieldRule::text(EMAIL, REQUIRED_MESSAGE).with(Constraint::Email {
            message: EMAIL_MESSAGE.to_string(),
        })],
    )
}

/// 校验松散的注册表单记录
pub fn validate_signup(record: &FormRecord) -> ValidationOutcome {
    signup_schema().evaluate(record)
}

/// 校验松散的找回密码表单记录
pub fn validate_recovery(record: &FormRecord) -> ValidationOutcome {
    recovery_schema().evaluate(record)
}

/// 收货地址（行政区划均为 ID 字符串）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub line: Option<String>,
    pub province_id: Option<String>,
    pub district_id: Option<String>,
    pub ward_id: Option<String>,
}

/// 注册表单
///
/// 必填文本用 `Option<String>` 表示，`None` 与空字符串都按未填写处理。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    pub username: Option<String>,
    pub password: Option<String>,
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Address,
    pub avatar: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl RegistrationInput {
    /// 展开为以点分路径为键的表单记录
    pub fn to_record(&self) -> FormRecord {
        let mut record = FormRecord::new();
        let texts = [
            (USERNAME, &self.username),
            (PASSWORD, &self.password),
            (FULLNAME, &self.fullname),
            (EMAIL, &self.email),
            (PHONE, &self.phone),
            (GENDER, &self.gender),
            (ADDRESS_LINE, &self.address.line),
            (ADDRESS_PROVINCE_ID, &self.address.province_id),
            (ADDRESS_DISTRICT_ID, &self.address.district_id),
            (ADDRESS_WARD_ID, &self.address.ward_id),
            (STATUS, &self.status),
        ];
        for (path, value) in texts {
            if let Some(value) = value {
                record.insert(path, value.as_str());
            }
        }

        record.insert(
            AVATAR,
            self.avatar.as_deref().map_or(Value::Null, Value::from),
        );
        record.insert(ROLES, self.roles.clone());
        record
    }
}

impl Validate for RegistrationInput {
    fn outcome(&self) -> ValidationOutcome {
        validate_signup(&self.to_record())
    }
}

/// 找回密码表单
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryInput {
    pub email: Option<String>,
}

impl RecoveryInput {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    pub fn to_record(&self) -> FormRecord {
        let mut record = FormRecord::new();
        if let Some(email) = &self.email {
            record.insert(EMAIL, email.as_str());
        }
        record
    }
}

impl Validate for RecoveryInput {
    fn outcome(&self) -> ValidationOutcome {
        validate_recovery(&self.to_record())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldViolation;
    use serde_json::json;

    fn valid_record() -> FormRecord {
        FormRecord::try_from(json!({
            "username": "testuser",
            "password": "password123",
            "fullname": "Test User",
            "email": "test@example.com",
            "phone": "0912345678",
            "gender": "M",
            "address.line": "123 Test Street",
            "address.provinceId": "1",
            "address.districtId": "2",
            "address.wardId": "3",
            "avatar": null,
            "status": "2",
            "roles": [],
        }))
        .unwrap()
    }

    fn with(path: &str, value: Value) -> FormRecord {
        valid_record().with(path, value)
    }

    fn first_message(outcome: &ValidationOutcome) -> Option<&str> {
        outcome.first_violation().map(|v| v.message.as_str())
    }

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            username: Some("testuser".to_string()),
            password: Some("password123".to_string()),
            fullname: Some("Test User".to_string()),
            email: Some("test@example.com".to_string()),
            phone: Some("+84912345678".to_string()),
            gender: Some("F".to_string()),
            address: Address {
                line: Some("123 Test Street".to_string()),
                province_id: Some("1".to_string()),
                district_id: Some("2".to_string()),
                ward_id: Some("3".to_string()),
            },
            avatar: None,
            status: Some("2".to_string()),
            roles: vec!["user".to_string()],
        }
    }

    #[test]
    fn test_accepts_valid_record() {
        assert_eq!(validate_signup(&valid_record()), ValidationOutcome::Valid);
    }

    #[test]
    fn test_rejects_short_username() {
        let outcome = validate_signup(&with(USERNAME, json!("a")));
        assert!(!outcome.is_valid());
        assert_eq!(first_message(&outcome), Some("Tên tài khoản phải có ít nhất 2 ký tự"));
        assert_eq!(outcome.first_violation().map(|v| v.path.as_str()), Some(USERNAME));
    }

    #[test]
    fn test_rejects_short_password() {
        let outcome = validate_signup(&with(PASSWORD, json!("pass")));
        assert_eq!(first_message(&outcome), Some("Mật khẩu phải có ít nhất 8 ký tự"));
    }

    #[test]
    fn test_rejects_invalid_email() {
        let outcome = validate_signup(&with(EMAIL, json!("invalid-email")));
        assert_eq!(first_message(&outcome), Some(EMAIL_MESSAGE));
    }

    #[test]
    fn test_rejects_invalid_phone() {
        for phone in [
            "12345",
            "912345678",
            "9123456789",
            "0123456789",
            "09123456789",
            "0912 345 678",
        ] {
            let outcome = validate_signup(&with(PHONE, json!(phone)));
            assert_eq!(first_message(&outcome), Some(PHONE_MESSAGE), "phone {}", phone);
        }
    }

    #[test]
    fn test_accepts_phone_prefixes() {
        for phone in ["0912345678", "+84912345678", "84912345678", "0389999999"] {
            assert!(validate_signup(&with(PHONE, json!(phone))).is_valid(), "phone {}", phone);
        }
    }

    #[test]
    fn test_rejects_blank_required_field() {
        let outcome = validate_signup(&with(ADDRESS_PROVINCE_ID, json!("")));
        assert_eq!(
            outcome.violations(),
            &[FieldViolation::new(ADDRESS_PROVINCE_ID, REQUIRED_MESSAGE)]
        );
    }

    #[test]
    fn test_rejects_missing_and_wrong_type_fields() {
        let mut record = valid_record();
        record.remove(FULLNAME);
        let outcome = validate_signup(&record);
        assert_eq!(outcome.violations(), &[FieldViolation::new(FULLNAME, REQUIRED_MESSAGE)]);

        let outcome = validate_signup(&with(USERNAME, json!(42)));
        assert_eq!(outcome.violations(), &[FieldViolation::new(USERNAME, REQUIRED_MESSAGE)]);

        let outcome = validate_signup(&with(STATUS, json!(null)));
        assert_eq!(outcome.violations(), &[FieldViolation::new(STATUS, REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_accepts_any_gender_text() {
        for gender in ["M", "F", "X"] {
            assert!(validate_signup(&with(GENDER, json!(gender))).is_valid());
        }
    }

    #[test]
    fn test_avatar_null_or_text() {
        assert!(validate_signup(&with(AVATAR, json!(null))).is_valid());
        assert!(validate_signup(&with(AVATAR, json!("avatar.jpg"))).is_valid());

        let mut record = valid_record();
        record.remove(AVATAR);
        assert!(validate_signup(&record).is_valid());

        let outcome = validate_signup(&with(AVATAR, json!(5)));
        assert_eq!(outcome.violations(), &[FieldViolation::new(AVATAR, REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_roles_array_of_text() {
        assert!(validate_signup(&with(ROLES, json!([]))).is_valid());
        assert!(validate_signup(&with(ROLES, json!(["user"]))).is_valid());

        let outcome = validate_signup(&with(ROLES, json!(["user", 1])));
        assert_eq!(outcome.violations(), &[FieldViolation::new("roles.1", REQUIRED_MESSAGE)]);

        let outcome = validate_signup(&with(ROLES, json!("user")));
        assert_eq!(outcome.violations(), &[FieldViolation::new(ROLES, REQUIRED_MESSAGE)]);
    }

    #[test]
    fn test_nested_address_object() {
        let mut record = valid_record();
        for path in [ADDRESS_LINE, ADDRESS_PROVINCE_ID, ADDRESS_DISTRICT_ID, ADDRESS_WARD_ID] {
            record.remove(path);
        }
        record.insert(
            "address",
            json!({ "line": "1 Lê Lợi", "provinceId": "79", "districtId": "760", "wardId": "26734" }),
        );
        assert!(validate_signup(&record).is_valid());
    }

    #[test]
    fn test_violations_follow_declaration_order() {
        let record = valid_record()
            .with(ROLES, json!(null))
            .with(PHONE, json!("12345"))
            .with(USERNAME, json!("a"));

        let paths: Vec<String> = validate_signup(&record)
            .violations()
            .iter()
            .map(|v| v.path.clone())
            .collect();
        assert_eq!(paths, vec![USERNAME, PHONE, ROLES]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let record = with(EMAIL, json!("invalid-email"));
        assert_eq!(validate_signup(&record), validate_signup(&record));
        assert_eq!(validate_signup(&valid_record()), validate_signup(&valid_record()));
    }

    #[test]
    fn test_injected_formatter() {
        let schema = signup_schema_with(&|label: &str, min: usize| format!("{label} >= {min}"));
        let outcome = schema.evaluate(&with(PASSWORD, json!("short")));
        assert_eq!(first_message(&outcome), Some("Mật khẩu >= 8"));
    }

    #[test]
    fn test_rule_table_declaration_order() {
        let paths: Vec<&str> = signup_schema().rules().iter().map(FieldRule::path).collect();
        assert_eq!(
            paths,
            vec![
                USERNAME, PASSWORD, FULLNAME, EMAIL, PHONE, GENDER, ADDRESS_LINE,
                ADDRESS_PROVINCE_ID, ADDRESS_DISTRICT_ID, ADDRESS_WARD_ID, AVATAR, STATUS, ROLES,
            ]
        );
    }

    #[test]
    fn test_typed_registration_input() {
        assert!(valid_input().validate().is_ok());

        let mut input = valid_input();
        input.address.ward_id = Some(String::new());
        input.avatar = Some("avatar.jpg".to_string());
        let err = input.validate().unwrap_err();
        assert_eq!(err.first(), Some(&FieldViolation::new(ADDRESS_WARD_ID, REQUIRED_MESSAGE)));
    }

    #[test]
    fn test_registration_input_from_json() {
        let input: RegistrationInput = serde_json::from_value(json!({
            "username": "testuser",
            "password": "password123",
            "fullname": "Test User",
            "email": "test@example.com",
            "phone": "0912345678",
            "gender": "M",
            "address": { "line": "1 Lê Lợi", "provinceId": "1", "districtId": "2", "wardId": "3" },
            "avatar": null,
            "status": "2",
            "roles": []
        }))
        .unwrap();

        assert_eq!(input.address.province_id.as_deref(), Some("1"));
        assert!(input.validate().is_ok());
        assert_eq!(input.to_record().get(ADDRESS_PROVINCE_ID), Some(&json!("1")));
    }

    #[test]
    fn test_recovery_schema() {
        assert!(RecoveryInput::new("test@example.com").validate().is_ok());

        let outcome = RecoveryInput::new("").outcome();
        assert_eq!(outcome.violations(), &[FieldViolation::new(EMAIL, REQUIRED_MESSAGE)]);

        let outcome = RecoveryInput::new("invalid-email").outcome();
        assert_eq!(outcome.violations(), &[FieldViolation::new(EMAIL, EMAIL_MESSAGE)]);

        let outcome = validate_recovery(&FormRecord::new());
        assert_eq!(first_message(&outcome), Some(REQUIRED_MESSAGE));
    }
}
