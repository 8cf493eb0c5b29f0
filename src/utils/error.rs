use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("{message}")]
    UpstreamError { message: String, status: Option<u16> },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Upstream,
    Configuration,
    System,
}

impl RelayError {
    pub fn validation(field: &str, label: &str) -> Self {
        RelayError::ValidationError {
            field: field.to_string(),
            message: format!("{} is required.", label),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            RelayError::ValidationError { .. } => ErrorCategory::Validation,
            RelayError::UpstreamError { .. } => ErrorCategory::Upstream,
            RelayError::ConfigError { .. }
            | RelayError::MissingConfigError { .. }
            | RelayError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            RelayError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 對應的 HTTP 狀態碼：只有驗證錯誤是呼叫端可以修正的
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            _ => 500,
        }
    }

    /// 缺少的欄位名稱（僅驗證錯誤）
    pub fn field(&self) -> Option<&str> {
        match self {
            RelayError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            RelayError::ValidationError { message, .. } => message.clone(),
            // 連線層錯誤只寫進日誌，不回給使用者
            RelayError::UpstreamError {
                message,
                status: Some(_),
            } if !message.trim().is_empty() => message.clone(),
            RelayError::UpstreamError { .. } => "Something went wrong".to_string(),
            RelayError::MissingConfigError { field } => {
                format!("{} is not set in environment variables", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Fill in the missing field and submit again",
            ErrorCategory::Upstream => "Check the destination service status and try again later",
            ErrorCategory::Configuration => {
                "Set XANO_BASE_URL and XANO_API_KEY, or pass a valid --config file"
            }
            ErrorCategory::System => "Check file permissions and the process environment",
        }
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;
