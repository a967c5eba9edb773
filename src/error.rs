//! 定义了整个库的错误类型 `ComposerError`，以及把原始错误归类为
//! 面向用户的错误类别的逻辑。

use std::io;

use thiserror::Error;

use crate::locale::{Language, translations};

/// 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum ComposerError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Base64 解码失败 (源自 `base64::DecodeError`)
    #[error("Base64 解码失败: {0}")]
    Base64Decode(#[from] base64::DecodeError),

    /// I/O 错误 (源自 `io::Error`)
    #[error("I/O 错误: {0}")]
    Io(#[from] io::Error),

    /// 提供商返回了错误响应，携带原始错误文本供归类
    #[error("API 返回错误: {0}")]
    Api(String),

    /// API Key 无效或无法用于构造请求
    #[error("API Key 无效: {0}")]
    InvalidApiKey(String),

    /// 响应被提供商的安全过滤拦截
    #[error("响应被安全过滤拦截: {0}")]
    SafetyBlocked(String),

    /// 提供商未返回任何可用文本，也没有给出安全拦截原因
    #[error("模型返回了空响应")]
    EmptyResponse,

    /// 模型因意外原因停止生成
    #[error("模型因意外原因停止生成: {0}")]
    UnexpectedFinish(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

/// `ComposerError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, ComposerError>;

/// 面向用户的错误类别。
///
/// 上层界面按类别决定呈现方式：`RateLimit` 应当弹出阻断式对话框，
/// 其余类别用临时通知即可；`InvalidApiKey` 还应把当前凭据从凭据池移除。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 传输层或网络错误。
    Network,
    /// API Key 无效。
    InvalidApiKey,
    /// 模型过载。
    ModelOverloaded,
    /// 配额耗尽或被限流。
    RateLimit,
    /// 响应被安全过滤拦截。
    SafetyBlocked,
    /// 模型返回了空响应。
    EmptyResponse,
    /// 其他无法归类的错误。
    Unknown,
}

/// 归类后的、可直接展示给用户的错误。
#[derive(Debug, Clone)]
pub struct UserFacingError {
    /// 错误类别。
    pub kind: ErrorKind,
    /// 当前语言下的人类可读消息，保证非空。
    pub message: String,
}

impl UserFacingError {
    /// 该错误是否应当以阻断式对话框呈现。
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        self.kind == ErrorKind::RateLimit
    }

    /// 该错误是否意味着当前 API Key 应当被废弃。
    #[must_use]
    pub fn should_discard_credential(&self) -> bool {
        self.kind == ErrorKind::InvalidApiKey
    }
}

/// 把任意 [`ComposerError`] 归类为面向用户的错误。
///
/// 归类是全函数：任何输入都会得到一个带非空消息的 [`UserFacingError`]，
/// 自身绝不失败。匹配按固定优先级进行，先命中者生效。
#[must_use]
pub fn classify(error: &ComposerError, lang: Language) -> UserFacingError {
    let ui = &translations(lang).ui;

    match error {
        // 传输层失败直接视为网络错误，不再看消息内容。
        ComposerError::Reqwest(_) => UserFacingError {
            kind: ErrorKind::Network,
            message: ui.error_network.to_string(),
        },
        ComposerError::InvalidApiKey(_) => UserFacingError {
            kind: ErrorKind::InvalidApiKey,
            message: ui.error_api_key_invalid.to_string(),
        },
        ComposerError::SafetyBlocked(_) => UserFacingError {
            kind: ErrorKind::SafetyBlocked,
            message: ui.error_safety_blocked.to_string(),
        },
        ComposerError::EmptyResponse => UserFacingError {
            kind: ErrorKind::EmptyResponse,
            message: ui.error_empty_response.to_string(),
        },
        other => classify_message(&other.to_string(), lang),
    }
}

/// 对原始错误文本做基于标记词的归类。
fn classify_message(raw: &str, lang: Language) -> UserFacingError {
    let ui = &translations(lang).ui;
    let lower = raw.to_lowercase();

    if lower.contains("api key") || lower.contains("apikey") {
        return UserFacingError {
            kind: ErrorKind::InvalidApiKey,
            message: ui.error_api_key_invalid.to_string(),
        };
    }
    // "Failed to execute 'append' on 'Headers'" 一类的报错，
    // 通常是 API Key 里混入了非 ASCII 字符。
    if lower.contains("iso-8859-1") || lower.contains("headers") {
        return UserFacingError {
            kind: ErrorKind::InvalidApiKey,
            message: ui.error_api_key_invalid.to_string(),
        };
    }
    if lower.contains("model is overloaded") {
        return UserFacingError {
            kind: ErrorKind::ModelOverloaded,
            message: ui.error_model_overloaded.to_string(),
        };
    }
    if ["network", "fetch", "xhr", "rpc"]
        .iter()
        .any(|marker| lower.contains(marker))
    {
        return UserFacingError {
            kind: ErrorKind::Network,
            message: ui.error_network.to_string(),
        };
    }
    if lower.contains("resource_exhausted") || lower.contains("quota") || lower.contains("429") {
        return UserFacingError {
            kind: ErrorKind::RateLimit,
            message: ui.error_rate_limit.to_string(),
        };
    }

    classify_embedded_json(raw, lang)
}

/// 尝试从错误文本中定位并解析内嵌的 JSON 错误负载。
///
/// 找到负载时，`RESOURCE_EXHAUSTED` 状态重归类为限流，
/// 否则原样透出其中嵌套的 message；找不到或解析失败则透出原始文本。
fn classify_embedded_json(raw: &str, lang: Language) -> UserFacingError {
    let ui = &translations(lang).ui;

    let fallback_message = if raw.trim().is_empty() {
        ui.error_unknown.to_string()
    } else {
        raw.to_string()
    };

    let Some(json_start) = raw.find('{') else {
        return UserFacingError {
            kind: ErrorKind::Unknown,
            message: fallback_message,
        };
    };

    // 错误文本里 JSON 之后可能还跟着别的内容，用流式反序列化取第一个值。
    let mut stream =
        serde_json::Deserializer::from_str(&raw[json_start..]).into_iter::<serde_json::Value>();
    let Some(Ok(parsed)) = stream.next() else {
        return UserFacingError {
            kind: ErrorKind::Unknown,
            message: fallback_message,
        };
    };

    let nested = parsed.get("error").unwrap_or(&parsed);

    if nested.get("status").and_then(serde_json::Value::as_str) == Some("RESOURCE_EXHAUSTED") {
        return UserFacingError {
            kind: ErrorKind::RateLimit,
            message: ui.error_rate_limit.to_string(),
        };
    }

    match nested.get("message").and_then(serde_json::Value::as_str) {
        Some(message) if !message.trim().is_empty() => UserFacingError {
            kind: ErrorKind::Unknown,
            message: message.to_string(),
        },
        _ => UserFacingError {
            kind: ErrorKind::Unknown,
            message: fallback_message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_marker_beats_quota_marker() {
        let err = ComposerError::Api("API key not valid, quota exceeded".to_string());
        let classified = classify(&err, Language::En);
        assert_eq!(classified.kind, ErrorKind::InvalidApiKey);
        assert!(classified.should_discard_credential());
    }

    #[test]
    fn test_overload_marker() {
        let err = ComposerError::Api("the model is overloaded, try later".to_string());
        assert_eq!(
            classify(&err, Language::En).kind,
            ErrorKind::ModelOverloaded
        );
    }

    #[test]
    fn test_quota_markers_map_to_rate_limit() {
        for raw in ["RESOURCE_EXHAUSTED", "status 429", "quota exceeded"] {
            let err = ComposerError::Api(raw.to_string());
            let classified = classify(&err, Language::Th);
            assert!(classified.is_rate_limit(), "{raw} 应被归类为限流");
        }
    }

    #[test]
    fn test_embedded_json_resource_exhausted_reclassified() {
        let raw =
            r#"got status 400 {"error":{"status":"RESOURCE_EXHAUSTED","message":"try later"}}"#;
        let err = ComposerError::Api(raw.to_string());
        assert_eq!(classify(&err, Language::En).kind, ErrorKind::RateLimit);
    }

    #[test]
    fn test_embedded_json_nested_message_surfaced_verbatim() {
        let raw =
            r#"call failed {"error":{"status":"INVALID_ARGUMENT","message":"schema mismatch"}}"#;
        let err = ComposerError::Api(raw.to_string());
        let classified = classify(&err, Language::En);
        assert_eq!(classified.kind, ErrorKind::Unknown);
        assert_eq!(classified.message, "schema mismatch");
    }

    #[test]
    fn test_classification_is_total() {
        let errors = [
            ComposerError::Api(String::new()),
            ComposerError::Api("{not json at all".to_string()),
            ComposerError::EmptyResponse,
            ComposerError::SafetyBlocked("HARM_CATEGORY".to_string()),
            ComposerError::InvalidApiKey("bad".to_string()),
            ComposerError::Internal("oops".to_string()),
            ComposerError::UnexpectedFinish("MAX_TOKENS".to_string()),
        ];
        for err in &errors {
            let classified = classify(err, Language::Zh);
            assert!(!classified.message.is_empty(), "{err} 的消息不应为空");
        }
    }

    #[test]
    fn test_pre_typed_variants_map_directly() {
        assert_eq!(
            classify(&ComposerError::EmptyResponse, Language::En).kind,
            ErrorKind::EmptyResponse
        );
        assert_eq!(
            classify(&ComposerError::SafetyBlocked("x".into()), Language::En).kind,
            ErrorKind::SafetyBlocked
        );
    }
}
