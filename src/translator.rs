//! 标签与自由文本的英译。
//!
//! 音乐生成器对英文风格标签的理解最稳定，所以提示词里的标签
//! 一律先翻成英文；文化特有的曲风名按音译处理（如 ลูกทุ่ง → Luk Thung）。
//! 翻译失败不阻断主流程：模型给出空结果时回退为原文并记录告警。

use tracing::warn;

use crate::{
    error::Result,
    locale::Language,
    provider::{GenerationOptions, ModelProvider},
    provider::gemini::FLASH_MODEL,
};

/// 把一组音乐标签翻译为英文。
///
/// 空列表与英文界面直接原样返回，不发起网络调用。
/// 模型返回空文本时回退为原始标签。
///
/// # Errors
///
/// 透传提供商调用的错误（网络、限流、安全拦截等）。
pub async fn translate_tags_to_english(
    provider: &dyn ModelProvider,
    tags: &[String],
    lang: Language,
) -> Result<Vec<String>> {
    if tags.is_empty() {
        return Ok(Vec::new());
    }
    if lang == Language::En {
        return Ok(tags.to_vec());
    }

    let prompt = format!(
        "Translate the following music style tags from {source} to English. Provide the closest, most common English equivalent for each tag. For culturally specific genres (like 'ลูกทุ่ง'), transliterate them phonetically (e.g., 'Luk Thung'). Return ONLY the comma-separated list of the translated English terms, with no extra text or explanations.
Tags: {tags}",
        source = lang.english_name(),
        tags = tags.join(", "),
    );

    let translated = provider
        .generate_text(FLASH_MODEL, &prompt, &GenerationOptions::with_temperature(0.0))
        .await?;

    let result: Vec<String> = translated
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect();

    if result.is_empty() {
        warn!(?lang, "标签翻译返回空结果，回退为原始标签");
        return Ok(tags.to_vec());
    }
    Ok(result)
}

/// 把一段自由文本翻译为英文。
///
/// 空文本与英文界面直接原样返回。
///
/// # Errors
///
/// 透传提供商调用的错误。
pub async fn translate_text_to_english(
    provider: &dyn ModelProvider,
    text: &str,
    lang: Language,
) -> Result<String> {
    if text.is_empty() || lang == Language::En {
        return Ok(text.to_string());
    }

    let prompt = format!(
        "Translate the following text from {source} to English. Return ONLY the translated English text, with no extra formatting, labels, or explanations.\n\nText: \"{text}\"",
        source = lang.english_name(),
    );

    let translated = provider
        .generate_text(FLASH_MODEL, &prompt, &GenerationOptions::with_temperature(0.0))
        .await?;

    Ok(translated.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 返回固定文本并记录收到的提示词的测试提供商。
    struct FixedProvider {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ModelProvider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn generate_text(
            &self,
            _model: &str,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }

        async fn generate_audio(
            &self,
            _model: &str,
            _text: &str,
            _voices: &crate::provider::VoicePlan,
        ) -> Result<String> {
            unreachable!("翻译测试不会请求音频")
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[tokio::test]
    async fn test_empty_tags_skip_network() {
        let provider = FixedProvider::new("unused");
        let result = translate_tags_to_english(&provider, &[], Language::Th)
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_english_tags_pass_through() {
        let provider = FixedProvider::new("unused");
        let input = tags(&["Pop", "Rock"]);
        let result = translate_tags_to_english(&provider, &input, Language::En)
            .await
            .unwrap();
        assert_eq!(result, input);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_reply_is_split_and_trimmed() {
        let provider = FixedProvider::new("Luk Thung , Ballad,, Sad ");
        let result = translate_tags_to_english(&provider, &tags(&["ลูกทุ่ง", "บัลลาด"]), Language::Th)
            .await
            .unwrap();
        assert_eq!(result, tags(&["Luk Thung", "Ballad", "Sad"]));
    }

    #[tokio::test]
    async fn test_blank_reply_falls_back_to_original() {
        let provider = FixedProvider::new("   ");
        let input = tags(&["ลูกทุ่ง"]);
        let result = translate_tags_to_english(&provider, &input, Language::Th)
            .await
            .unwrap();
        assert_eq!(result, input);
    }

    #[tokio::test]
    async fn test_text_translation_trims_reply() {
        let provider = FixedProvider::new("  the last train home\n");
        let result = translate_text_to_english(&provider, "รถไฟเที่ยวสุดท้าย", Language::Th)
            .await
            .unwrap();
        assert_eq!(result, "the last train home");
    }
}
