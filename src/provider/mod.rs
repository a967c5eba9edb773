//! 提供商模块
//!
//! 该模块定义了与文本生成模型提供商交互的核心抽象。

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub mod gemini;

/// 一次生成调用的可选配置。
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// 采样温度。`None` 时使用提供商的默认值。
    pub temperature: Option<f32>,
    /// 结构化输出的响应 schema。设置后提供商必须请求 JSON 输出。
    pub response_schema: Option<Value>,
}

impl GenerationOptions {
    /// 只设置温度的便捷构造。
    #[must_use]
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }

    /// 设置温度与响应 schema 的便捷构造。
    #[must_use]
    pub fn structured(temperature: f32, schema: Value) -> Self {
        Self {
            temperature: Some(temperature),
            response_schema: Some(schema),
        }
    }
}

/// 语音合成的声部配置。
#[derive(Debug, Clone)]
pub enum VoicePlan {
    /// 单声部，使用指定的预置音色。
    Single {
        /// 预置音色名。
        voice_name: String,
    },
    /// 对唱：文本中以 `Male:` / `Female:` 标记声部。
    Duet {
        /// 男声音色名。
        male_voice: String,
        /// 女声音色名。
        female_voice: String,
    },
}

/// 定义了所有文本生成提供商需要实现的通用接口。
#[async_trait]
pub trait ModelProvider: Send + Sync {
    ///
    /// 返回提供商的唯一名称。
    ///
    /// 一个全小写的静态字符串，例如 `"gemini"`。
    ///
    fn name(&self) -> &'static str;

    ///
    /// 向指定模型发送提示词并返回生成的文本。
    ///
    /// # 参数
    /// * `model` - 提供商侧的模型标识。
    /// * `prompt` - 完整的提示词文本。
    /// * `options` - 温度等可选配置。
    ///
    async fn generate_text(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String>;

    ///
    /// 请求结构化（JSON）输出并解析为 [`Value`]。
    ///
    /// 默认实现直接把文本输出按 JSON 解析；提供商可以覆盖它
    /// 以启用原生的结构化输出模式。
    ///
    async fn generate_structured(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<Value> {
        let text = self.generate_text(model, prompt, options).await?;
        Ok(serde_json::from_str(&text)?)
    }

    ///
    /// 请求语音合成，返回 Base64 编码的原始音频数据。
    ///
    async fn generate_audio(&self, model: &str, text: &str, voices: &VoicePlan)
    -> Result<String>;
}
