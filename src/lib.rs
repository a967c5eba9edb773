#![warn(missing_docs)]

//! # Song Composer RS
//!
//! 一个用于 AI 歌曲概念生成的 Rust 库：把结构化的创作表单组装成
//! 提示词、调用文本生成模型，并把自由文本回复解析为结构化的歌曲数据。
//!
//! ## 主要功能
//!
//! - **提示词组装**: 把曲风、情绪、结构等表单字段与共享规则确定性地
//!   拼装成主提示词，标签先统一翻译为英文。
//! - **回复解析**: 从模型回复中提取标题、风格与歌词，清理罗马音行，
//!   解析永不失败。
//! - **参数推算**: 自动模式下根据标签确定性地推算怪异度与风格影响度。
//! - **错误归类**: 把任意底层错误归类为带本地化消息的用户可见错误。
//!
//! ## 生成一首歌
//!
//! ```rust,no_run
//! use song_composer_rs::{FormState, Language, SongComposer, parse_song};
//!
//! async {
//!     let composer = SongComposer::with_gemini("your-api-key", Language::Th).unwrap();
//!
//!     let form = FormState {
//!         prompt: "เพลงถึงคนที่คิดถึงในคืนฝนตก".to_string(),
//!         genres: vec!["Pop".to_string()],
//!         moods: vec!["เหงา".to_string()],
//!         ..FormState::default()
//!     };
//!
//!     match composer.generate_song(&form).await {
//!         Ok(raw) => {
//!             let song = parse_song(&raw, None);
//!             println!("{} ({})", song.title, song.style);
//!         }
//!         Err(e) => eprintln!("发生错误: {e}"),
//!     }
//! };
//! ```

pub mod audio;
pub mod config;
pub mod error;
pub mod locale;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod provider;
pub mod translator;

use std::collections::HashSet;

use chrono::Utc;
use tracing::{info, instrument};

pub use crate::{
    error::{ComposerError, ErrorKind, Result, UserFacingError, classify},
    locale::Language,
    model::{
        form::{FormState, GenerationMode},
        song::{HistoryItem, Metrics, NarrativeConcept, ParsedSong, Preset, StyleSuggestion},
    },
    parser::{clean_lyrics_for_speech, parse_song, strip_romanization},
};

use crate::{
    prompt::concepts,
    provider::{
        GenerationOptions, ModelProvider, VoicePlan,
        gemini::{FLASH_MODEL, GeminiClient, PRO_MODEL, TTS_MODEL},
    },
    translator::{translate_tags_to_english, translate_text_to_english},
};

/// 单声部与对唱男声使用的预置音色。
const MALE_VOICE: &str = "Puck";
/// 单声部与对唱女声使用的预置音色。
const FEMALE_VOICE: &str = "Kore";

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层歌曲创作客户端，封装提供商调用与完整的生成流水线。
///
/// 这是与本库交互的主要入口点。
pub struct SongComposer {
    provider: Box<dyn ModelProvider>,
    language: Language,
}

impl SongComposer {
    /// 用任意提供商实现创建客户端。
    #[must_use]
    pub fn new(provider: Box<dyn ModelProvider>, language: Language) -> Self {
        Self { provider, language }
    }

    /// 用 Gemini 提供商创建客户端。
    ///
    /// # Errors
    ///
    /// API Key 为空或含非 ASCII 字符时返回 [`ComposerError::InvalidApiKey`]。
    pub fn with_gemini(api_key: &str, language: Language) -> Result<Self> {
        Ok(Self::new(Box::new(GeminiClient::new(api_key)?), language))
    }

    /// 客户端当前的界面/输出语言。
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// 表单选择的模型标识，未指定时回退到默认创意模型。
    fn song_model<'a>(&self, form: &'a FormState) -> &'a str {
        if form.model.is_empty() {
            PRO_MODEL
        } else {
            form.model.as_str()
        }
    }

    /// 把全部风格相关标签翻译为英文并合并为最终的风格串。
    ///
    /// 人声选项也一并纳入翻译。翻译后按出现顺序去重。
    async fn build_final_style(&self, form: &FormState) -> Result<String> {
        let mut tags: Vec<String> = Vec::new();
        if !form.vocal.is_empty() {
            tags.push(form.vocal.clone());
        }
        tags.extend(form.genres.iter().cloned());
        tags.extend(form.moods.iter().cloned());
        tags.extend(form.tempos.iter().cloned());
        tags.extend(form.instruments.iter().cloned());

        let translated = translate_tags_to_english(&*self.provider, &tags, self.language).await?;

        let mut seen = HashSet::new();
        let deduped: Vec<String> = translated
            .into_iter()
            .filter(|tag| seen.insert(tag.clone()))
            .collect();
        Ok(deduped.join(", "))
    }

    /// 生成一首完整的歌曲文本。
    ///
    /// 流水线：标签英译 → 提示词组装 → 模型调用 → 罗马音清理。
    /// 返回的是模型的完整回复（元数据 + 歌词），可交给
    /// [`parse_song`] 提取结构化数据。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误。可用 [`classify`] 归类后展示给用户。
    #[instrument(skip(self, form))]
    pub async fn generate_song(&self, form: &FormState) -> Result<String> {
        let final_style = self.build_final_style(form).await?;
        let full_prompt = prompt::assemble(form, &final_style, self.language);
        info!(
            style = %final_style,
            prompt_len = full_prompt.len(),
            "歌曲生成提示词已组装"
        );

        let raw = self
            .provider
            .generate_text(self.song_model(form), &full_prompt, &GenerationOptions::default())
            .await?;
        Ok(strip_romanization(&raw))
    }

    /// 基于用户反馈修订一首已生成的歌曲，返回完整的修订后文本。
    ///
    /// 使用与原始生成相同的模型以保持风格一致。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误。
    #[instrument(skip(self, original_song, revision_request))]
    pub async fn revise_song(
        &self,
        original_song: &str,
        revision_request: &str,
        model: &str,
    ) -> Result<String> {
        let full_prompt = concepts::revision_prompt(original_song, revision_request);
        let model = if model.is_empty() { PRO_MODEL } else { model };
        let raw = self
            .provider
            .generate_text(model, &full_prompt, &GenerationOptions::default())
            .await?;
        Ok(strip_romanization(&raw))
    }

    /// 为歌曲生成一条英文的专辑封面图像提示词。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误。
    #[instrument(skip(self, form))]
    pub async fn generate_image_prompt(&self, form: &FormState) -> Result<String> {
        let provider = &*self.provider;
        let concept = if form.prompt.is_empty() {
            &form.core_theme
        } else {
            &form.prompt
        };
        let concept = translate_text_to_english(provider, concept, self.language).await?;
        let genres = translate_tags_to_english(provider, &form.genres, self.language).await?;
        let moods = translate_tags_to_english(provider, &form.moods, self.language).await?;
        let imagery = translate_text_to_english(provider, &form.imagery, self.language).await?;

        let full_prompt =
            concepts::image_prompt(&concept, &genres, &moods, &imagery, self.language);
        let raw = provider
            .generate_text(FLASH_MODEL, &full_prompt, &GenerationOptions::with_temperature(0.8))
            .await?;
        Ok(raw.trim().to_string())
    }

    /// 为歌曲生成一份英文的 MV 分镜概念。
    ///
    /// 标题从已生成的歌曲文本中提取，缺失时使用占位值。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误。
    #[instrument(skip(self, song_data, form))]
    pub async fn generate_video_prompt(
        &self,
        song_data: &str,
        form: &FormState,
    ) -> Result<String> {
        let provider = &*self.provider;
        let title = parse_song(song_data, None).title;
        let story = if !form.story.is_empty() {
            &form.story
        } else if !form.prompt.is_empty() {
            &form.prompt
        } else {
            &form.core_theme
        };

        let title = translate_text_to_english(provider, &title, self.language).await?;
        let story = translate_text_to_english(provider, story, self.language).await?;
        let genres = translate_tags_to_english(provider, &form.genres, self.language).await?;
        let moods = translate_tags_to_english(provider, &form.moods, self.language).await?;
        let imagery = translate_text_to_english(provider, &form.imagery, self.language).await?;

        let full_prompt =
            concepts::video_prompt(&title, &story, &genres, &moods, &imagery, self.language);
        let raw = provider
            .generate_text(PRO_MODEL, &full_prompt, &GenerationOptions::with_temperature(0.7))
            .await?;
        Ok(raw.trim().to_string())
    }

    /// 生成一条当前语言的一句话歌曲灵感。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误。
    #[instrument(skip(self))]
    pub async fn generate_random_idea(&self) -> Result<String> {
        let raw = self
            .provider
            .generate_text(
                PRO_MODEL,
                &concepts::random_idea_prompt(self.language),
                &GenerationOptions::with_temperature(1.0),
            )
            .await?;
        Ok(raw.trim().to_string())
    }

    /// 从零生成一份完整的叙事蓝图。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误；模型输出不符合 schema 时返回解析错误。
    #[instrument(skip(self))]
    pub async fn generate_narrative(&self) -> Result<NarrativeConcept> {
        let value = self
            .provider
            .generate_structured(
                PRO_MODEL,
                &concepts::narrative_prompt(self.language),
                &GenerationOptions::structured(1.0, concepts::narrative_schema(self.language)),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// 把用户的一句话灵感扩展为完整的叙事蓝图。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误；模型输出不符合 schema 时返回解析错误。
    #[instrument(skip(self, main_idea))]
    pub async fn narrative_from_idea(&self, main_idea: &str) -> Result<NarrativeConcept> {
        let value = self
            .provider
            .generate_structured(
                PRO_MODEL,
                &concepts::narrative_from_idea_prompt(self.language, main_idea),
                &GenerationOptions::structured(0.7, concepts::narrative_schema(self.language)),
            )
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// 根据歌手名推断一组风格建议。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误。
    #[instrument(skip(self))]
    pub async fn suggest_style_from_artist(&self, artist_name: &str) -> Result<StyleSuggestion> {
        let value = self
            .provider
            .generate_structured(
                PRO_MODEL,
                &concepts::style_from_artist_prompt(artist_name, self.language),
                &GenerationOptions::structured(0.2, concepts::style_schema(self.language)),
            )
            .await?;
        Ok(StyleSuggestion::from_value(&value))
    }

    /// 根据歌曲概念推断一组风格建议。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误。
    #[instrument(skip(self, form))]
    pub async fn suggest_style_from_idea(&self, form: &FormState) -> Result<StyleSuggestion> {
        let value = self
            .provider
            .generate_structured(
                PRO_MODEL,
                &concepts::style_from_idea_prompt(form, self.language),
                &GenerationOptions::structured(0.5, concepts::style_schema(self.language)),
            )
            .await?;
        Ok(StyleSuggestion::from_value(&value))
    }

    /// 根据歌曲概念建议一个段落结构。
    ///
    /// # Errors
    ///
    /// 透传提供商调用的错误；模型返回的不是字符串数组时返回
    /// [`ComposerError::Internal`]。
    #[instrument(skip(self, form))]
    pub async fn suggest_structure(&self, form: &FormState) -> Result<Vec<String>> {
        let value = self
            .provider
            .generate_structured(
                PRO_MODEL,
                &concepts::structure_prompt(form, self.language),
                &GenerationOptions::structured(0.3, concepts::structure_schema()),
            )
            .await?;

        let Some(items) = value.as_array() else {
            return Err(ComposerError::Internal(
                "模型返回的歌曲结构不是数组".to_string(),
            ));
        };
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_owned).ok_or_else(|| {
                    ComposerError::Internal("歌曲结构数组中含有非字符串项".to_string())
                })
            })
            .collect()
    }

    /// 为歌曲生成语音朗读预览，返回 Base64 编码的 PCM 数据。
    ///
    /// 歌词先经 [`clean_lyrics_for_speech`] 清理；对唱歌曲使用
    /// 双声部配置，否则按人声行选择单一音色。
    /// 解码见 [`audio::decode_pcm_base64`]。
    ///
    /// # Errors
    ///
    /// 歌曲文本中找不到歌词时返回 [`ComposerError::Internal`]；
    /// 其余错误透传自提供商调用。
    #[instrument(skip(self, song_data))]
    pub async fn generate_vocal_preview(&self, song_data: &str) -> Result<String> {
        let lyrics = clean_lyrics_for_speech(song_data, self.language);
        if lyrics.is_empty() {
            return Err(ComposerError::Internal(
                "未找到可用于语音预览的歌词".to_string(),
            ));
        }

        let t = locale::translations(self.language);
        let vocal_line = song_data
            .lines()
            .find(|line| line.trim_start().starts_with(t.labels.vocal_gender));
        let is_duet = vocal_line.is_some_and(|line| line.contains(t.options.vocals[2]));
        let is_male = vocal_line.is_some_and(|line| line.contains(t.options.vocals[0]));

        let voices = if is_duet {
            VoicePlan::Duet {
                male_voice: MALE_VOICE.to_string(),
                female_voice: FEMALE_VOICE.to_string(),
            }
        } else {
            VoicePlan::Single {
                voice_name: if is_male { MALE_VOICE } else { FEMALE_VOICE }.to_string(),
            }
        };

        self.provider.generate_audio(TTS_MODEL, &lyrics, &voices).await
    }

    /// 把一次生成结果打包为历史记录条目。
    ///
    /// 条目 ID 是创建时刻的毫秒时间戳，标题与风格即时解析。
    #[must_use]
    pub fn make_history_item(&self, song_data: &str, form: &FormState) -> HistoryItem {
        let parsed = parse_song(song_data, None);
        let now = Utc::now();
        HistoryItem {
            id: now.timestamp_millis(),
            song_data: song_data.to_string(),
            created_at: now,
            title: parsed.title,
            style: parsed.style,
            inputs: form.clone(),
        }
    }
}
