//! 实现了与 Google Gemini 平台交互的 `ModelProvider`。
//!
//! API 参考 <https://ai.google.dev/api/generate-content>
//!
//! 所有调用都走 `generateContent` 这一个 REST 端点：纯文本、
//! 结构化 JSON 与语音合成只在 `generationConfig` 上有区别。

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crate::{
    error::{ComposerError, Result},
    provider::{GenerationOptions, ModelProvider, VoicePlan},
};

pub mod models;

use models::GenerateContentResponse;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// 快速、低成本的默认文本模型，用于翻译与 Key 校验等轻量调用。
pub const FLASH_MODEL: &str = "gemini-2.5-flash";
/// 创意质量优先的模型，用于灵感、叙事与风格建议。
pub const PRO_MODEL: &str = "gemini-3-pro-preview";
/// 语音合成模型。
pub const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Gemini 的 Provider 实现。
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    http_client: Client,
}

impl GeminiClient {
    /// 用给定的 API Key 创建客户端。
    ///
    /// # Errors
    ///
    /// Key 为空或含非 ASCII 字符时返回 [`ComposerError::InvalidApiKey`]：
    /// 这类 Key 无法放进 HTTP 请求，提前拒绝能得到更明确的错误。
    pub fn new(api_key: &str) -> Result<Self> {
        let trimmed = api_key.trim();
        if trimmed.is_empty() {
            return Err(ComposerError::InvalidApiKey(
                "API Key 不能为空".to_string(),
            ));
        }
        if !trimmed.is_ascii() {
            return Err(ComposerError::InvalidApiKey(
                "API Key 含有非 ASCII 字符".to_string(),
            ));
        }
        Ok(Self {
            api_key: trimmed.to_string(),
            http_client: Client::new(),
        })
    }

    /// 发出一次 `generateContent` 调用并返回解析后的响应。
    async fn generate_content(&self, model: &str, body: &Value) -> Result<GenerateContentResponse> {
        let url = format!(
            "{GEMINI_API_BASE}/{model}:generateContent?key={}",
            self.api_key
        );
        let response = self.http_client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            // 原始响应体通常内嵌 JSON 错误负载，保留全文供归类。
            let raw = response.text().await.unwrap_or_default();
            warn!(%status, model, "Gemini 调用失败");
            return Err(ComposerError::Api(format!("{status}: {raw}")));
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }

    /// 从响应中取出第一个候选的文本。
    ///
    /// 文本为空时按结束原因归因：安全拦截、意外中止或空响应。
    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            if let Some(feedback) = response.prompt_feedback
                && let Some(reason) = feedback.block_reason
            {
                return Err(ComposerError::SafetyBlocked(reason));
            }
            return Err(ComposerError::EmptyResponse);
        };

        let text: String = candidate
            .content
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter_map(|part| part.text.as_deref())
            .collect();

        if !text.is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some("SAFETY") => Err(ComposerError::SafetyBlocked("SAFETY".to_string())),
            Some(reason) if reason != "STOP" => {
                Err(ComposerError::UnexpectedFinish(reason.to_string()))
            }
            _ => Err(ComposerError::EmptyResponse),
        }
    }

    /// 构造 `generateContent` 的请求体。
    fn request_body(prompt: &str, options: &GenerationOptions) -> Value {
        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = options.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(schema) = &options.response_schema {
            generation_config.insert(
                "responseMimeType".to_string(),
                json!("application/json"),
            );
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }

        let mut body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }
        body
    }

    /// 用一次轻量调用校验 API Key 是否可用。
    ///
    /// # Errors
    ///
    /// Key 无效时返回 [`ComposerError::InvalidApiKey`] 或携带原始
    /// 响应的 [`ComposerError::Api`]，网络失败时返回 [`ComposerError::Reqwest`]。
    #[instrument(skip(self))]
    pub async fn verify_api_key(&self) -> Result<()> {
        let body = Self::request_body("Hi", &GenerationOptions::default());
        self.generate_content(FLASH_MODEL, &body).await?;
        info!("API Key 校验通过");
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, prompt, options), fields(prompt_len = prompt.len()))]
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        let body = Self::request_body(prompt, options);
        let response = self.generate_content(model, &body).await?;
        Self::extract_text(response)
    }

    #[instrument(skip(self, prompt, options), fields(prompt_len = prompt.len()))]
    async fn generate_structured(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Value> {
        let body = Self::request_body(prompt, options);
        let response = self.generate_content(model, &body).await?;
        let text = Self::extract_text(response)?;
        Ok(serde_json::from_str(&text)?)
    }

    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn generate_audio(
        &self,
        model: &str,
        text: &str,
        voices: &VoicePlan,
    ) -> Result<String> {
        let speech_config = match voices {
            VoicePlan::Single { voice_name } => json!({
                "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": voice_name } }
            }),
            VoicePlan::Duet {
                male_voice,
                female_voice,
            } => json!({
                "multiSpeakerVoiceConfig": {
                    "speakerVoiceConfigs": [
                        {
                            "speaker": "Male",
                            "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": male_voice } }
                        },
                        {
                            "speaker": "Female",
                            "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": female_voice } }
                        }
                    ]
                }
            }),
        };

        let body = json!({
            "contents": [{ "parts": [{ "text": text }] }],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": speech_config,
            },
        });

        let response = self.generate_content(model, &body).await?;
        let audio = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.inline_data)
            .map(|data| data.data);

        audio.ok_or(ComposerError::EmptyResponse)
    }
}
