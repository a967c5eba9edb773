//! 定义了生成结果相关的数据结构：解析后的歌曲、风格建议、叙事蓝图与历史记录。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::form::FormState;

/// 从模型的自由文本回复中提取出的结构化歌曲数据。
///
/// 解析永远不会失败：提取不到的字段会回退到固定的占位值
/// （`"Untitled"` / `"Unknown Style"`），歌词至少回退为原始全文。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSong {
    /// 歌曲标题。
    pub title: String,
    /// 风格描述。
    pub style: String,
    /// 歌词正文（含结构标记）。
    pub lyrics: String,
}

/// 自动计算出的两个风格强度参数，均在 `[0, 100]` 区间内。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// 怪异度。
    pub weirdness: u32,
    /// 风格影响度。
    pub influence: u32,
}

/// 模型给出的结构化风格建议。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleSuggestion {
    /// 建议的曲风，最多 3 个。
    pub genres: Vec<String>,
    /// 建议的情绪，最多 3 个。
    pub moods: Vec<String>,
    /// 建议的速度。不变式：长度不超过 1。
    pub tempos: Vec<String>,
    /// 建议的乐器，最多 4 个。
    pub instruments: Vec<String>,
}

impl StyleSuggestion {
    /// 从模型返回的 JSON 构造建议，并强制执行不变式。
    ///
    /// 缺失或类型不符的字段回退为空列表；`tempos` 多于一项时只保留第一项，
    /// 截断而非报错。
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        fn string_list(value: &serde_json::Value, key: &str) -> Vec<String> {
            value
                .get(key)
                .and_then(serde_json::Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_owned))
                        .collect()
                })
                .unwrap_or_default()
        }

        let mut tempos = string_list(value, "tempos");
        tempos.truncate(1);

        Self {
            genres: string_list(value, "genres"),
            moods: string_list(value, "moods"),
            tempos,
            instruments: string_list(value, "instruments"),
        }
    }
}

/// 模型生成的叙事蓝图。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeConcept {
    /// 歌曲探讨的核心主题。
    pub core_theme: String,
    /// 展现主题的具体场景或故事。
    pub story: String,
    /// 听众应当感受到的情感组合。
    pub key_emotions: String,
    /// 强化故事的象征性意象。
    pub imagery: String,
}

/// 一条生成历史记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    /// 唯一标识（创建时刻的毫秒时间戳）。
    pub id: i64,
    /// 模型输出的完整歌曲文本。
    pub song_data: String,
    /// 创建时间。
    pub created_at: DateTime<Utc>,
    /// 解析出的标题。
    pub title: String,
    /// 解析出的风格。
    pub style: String,
    /// 生成时使用的表单快照。
    pub inputs: FormState,
}

/// 一组可复用的表单预设。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preset {
    /// 预设的唯一标识。
    pub id: uuid::Uuid,
    /// 用户为预设起的名字。
    pub name: String,
    /// 保存的表单内容。
    pub settings: FormState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_style_suggestion_truncates_tempos() {
        let value = json!({
            "genres": ["Pop", "Rock"],
            "moods": ["Sad"],
            "tempos": ["Slow", "Fast", "Medium"],
            "instruments": ["Piano"],
        });
        let suggestion = StyleSuggestion::from_value(&value);
        assert_eq!(suggestion.tempos, vec!["Slow"]);
        assert_eq!(suggestion.genres.len(), 2);
    }

    #[test]
    fn test_style_suggestion_tolerates_missing_fields() {
        let value = json!({ "tempos": "not-an-array" });
        let suggestion = StyleSuggestion::from_value(&value);
        assert!(suggestion.genres.is_empty());
        assert!(suggestion.tempos.is_empty());
    }
}
