//! 此模块定义了所有用于反序列化 Gemini `generateContent` 接口响应的数据结构。
//! API 参考 <https://ai.google.dev/api/generate-content>

use serde::Deserialize;

/// `generateContent` 的顶层响应结构。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// 候选回复列表。只取第一个。
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// 提示词本身被拦截时的反馈，此时 `candidates` 为空。
    pub prompt_feedback: Option<PromptFeedback>,
}

/// 一个候选回复。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// 生成的内容。被拦截时可能缺失。
    pub content: Option<Content>,

    /// 生成结束的原因，正常完成为 `"STOP"`。
    pub finish_reason: Option<String>,
}

/// 候选回复的内容部分。
#[derive(Debug, Deserialize)]
pub struct Content {
    /// 内容分片列表。
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// 一个内容分片：文本或内联二进制数据，二者取一。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// 文本分片。
    pub text: Option<String>,

    /// 内联数据分片（语音合成时为 Base64 编码的 PCM）。
    pub inline_data: Option<InlineData>,
}

/// 内联二进制数据。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// Base64 编码的数据。
    pub data: String,

    /// 数据的 MIME 类型，如 `audio/L16;codec=pcm;rate=24000`。
    pub mime_type: Option<String>,
}

/// 提示词反馈。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// 提示词被拦截的原因。
    pub block_reason: Option<String>,
}
