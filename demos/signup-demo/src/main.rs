use anyhow::bail;
use clap::Parser;
use std::path::{Path, PathBuf};
use storefront_client::QuantityBounds;
use storefront_core::prelude::*;
use storefront_validator::{validate_recovery, validate_signup, FormRecord, ValidationOutcome};

/// 要校验的表单类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKind {
    Signup,
    Recovery,
}

#[derive(Debug, Parser)]
#[command(name = "signup-demo", version, about = "Validate a storefront signup or recovery form")]
struct Args {
    /// 按找回密码表单校验
    #[arg(long)]
    recovery: bool,

    /// 配置文件路径，缺省时按顺序查找 storefront.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON 表单文件
    form: PathBuf,
}

impl Args {
    fn kind(&self) -> FormKind {
        if self.recovery {
            FormKind::Recovery
        } else {
            FormKind::Signup
        }
    }
}

/// 未显式指定时按顺序查找配置文件
fn find_config_file() -> Option<PathBuf> {
    ["demos/signup-demo/storefront.toml", "storefront.toml"]
        .iter()
        .map(Path::new)
        .find(|path| path.exists())
        .map(Path::to_path_buf)
}

fn print_outcome(kind: FormKind, outcome: &ValidationOutcome) -> Result<()> {
    match outcome {
        ValidationOutcome::Valid => {
            println!("✅ {:?} form is valid", kind);
        }
        ValidationOutcome::Invalid(violations) => {
            println!("❌ {:?} form has {} error(s):", kind, violations.len());
            println!("{}", serde_json::to_string_pretty(violations)?);
        }
    }
    Ok(())
}

/// 表单无效时返回错误，使进程以非零状态退出
fn ensure_valid(form: &Path, outcome: &ValidationOutcome) -> Result<()> {
    if let Some(first) = outcome.first_violation() {
        bail!(
            "{} has {} invalid field(s), first: {}",
            form.display(),
            outcome.violations().len(),
            first
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let kind = args.kind();

    let config_file = args.config.clone().or_else(find_config_file);
    let env = Environment::load(config_file.as_deref())
        .context("Failed to load storefront configuration")?;
    LoggingConfig::from_environment(&env)?.init()?;

    tracing::info!(config = ?config_file, "Configuration loaded");

    let bounds = QuantityBounds::from_environment(&env)?;
    tracing::info!(min = bounds.min(), max = bounds.max(), "Quantity bounds");

    let content = tokio::fs::read_to_string(&args.form)
        .await
        .with_context(|| format!("Failed to read form {}", args.form.display()))?;
    let record = FormRecord::from_json_str(&content)?;

    let outcome = match kind {
        FormKind::Signup => validate_signup(&record),
        FormKind::Recovery => validate_recovery(&record),
    };
    print_outcome(kind, &outcome)?;

    ensure_valid(&args.form, &outcome)
}
