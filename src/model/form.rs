//! 定义了由上层界面收集、传入生成流水线的表单数据。

use serde::{Deserialize, Serialize};

/// 数值参数的生成模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// 由模型自行推断怪异度与风格影响度。
    #[default]
    Auto,
    /// 使用用户在滑块上固定的数值。
    Manual,
}

/// 用户在表单中选择的全部歌曲参数。
///
/// 由界面层持有并传入核心函数。核心函数只读，不会修改其中任何字段。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormState {
    /// 歌曲的主要创意描述。
    pub prompt: String,
    /// 核心主题。
    pub core_theme: String,
    /// 故事情节。
    pub story: String,
    /// 关键情感。
    pub key_emotions: String,
    /// 意象与符号。
    pub imagery: String,
    /// 已选曲风。
    pub genres: Vec<String>,
    /// 已选情绪。
    pub moods: Vec<String>,
    /// 已选速度。
    pub tempos: Vec<String>,
    /// 已选人声选项（取自当前语言的 vocals 列表）。
    pub vocal: String,
    /// 已选乐器。
    pub instruments: Vec<String>,
    /// 参考歌曲。
    pub inspired_by_song: String,
    /// 参考艺术家。
    pub inspired_by_artist: String,
    /// 对唱模式下男声的角色名。
    pub male_role: String,
    /// 对唱模式下女声的角色名。
    pub female_role: String,
    /// 歌曲结构段落，按顺序排列，如 `["[Intro]", "[Verse]", "[Chorus]"]`。
    pub structure: Vec<String>,
    /// 数值参数的生成模式。
    pub mode: GenerationMode,
    /// 怪异度滑块值，0 到 100。
    pub weirdness: u32,
    /// 风格影响度滑块值，0 到 100。
    pub style_influence: u32,
    /// 使用的模型标识。
    pub model: String,
    /// 要在歌词中排除的词语，逗号分隔的自由文本。
    pub excluded_words: String,
    /// 水印模板，支持 `{title}` 与 `{style}` 占位符。
    pub watermark: String,
}
