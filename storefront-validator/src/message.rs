//! 面向用户的校验提示

/// 必填字段缺失或类型不符
pub const REQUIRED_MESSAGE: &str = "Vui lòng không bỏ trống";

/// 邮箱格式不正确
pub const EMAIL_MESSAGE: &str = "Nhập email đúng định dạng";

/// 手机号格式不正确
pub const PHONE_MESSAGE: &str = "Nhập số điện thoại đúng định dạng";

/// 带参数的提示由外部格式化器生成，schema 只依赖它的输入输出约定
pub trait MessageFormatter: Send + Sync {
    /// 最小长度提示，`label` 为字段的显示名
    fn min_length(&self, label: &str, min: usize) -> String;
}

/// 默认的越南语提示
#[derive(Debug, Clone, Copy, Default)]
pub struct VietnameseMessages;

impl MessageFormatter for VietnameseMessages {
    fn min_length(&self, label: &str, min: usize) -> String {
        format!("{} phải có ít nhất {} ký tự", label, min)
    }
}

impl<F> MessageFormatter for F
where
    F: Fn(&str, usize) -> String + Send + Sync,
{
    fn min_length(&self, label: &str, min: usize) -> String {
        self(label, min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vietnamese_min_length() {
        assert_eq!(
            VietnameseMessages.min_length("Mật khẩu", 8),
            "Mật khẩu phải có ít nhất 8 ký tự"
        );
    }

    #[test]
    fn test_closure_formatter() {
        let formatter = |label: &str, min: usize| format!("{label}: min {min}");
        assert_eq!(formatter.min_length("username", 2), "username: min 2");
    }
}
