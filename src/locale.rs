//! 多语言文本表。
//!
//! 集中存放各语言的字段标签、预置选项列表和界面消息。
//! 表在编译期固定，运行时通过 [`translations`] 对 [`Language`] 做穷举匹配取得，
//! 不存在"键不存在"的运行时状态。
//!
//! 发给模型的提示词规则正文是全语言共享的英文常量（见 [`crate::prompt`]），
//! 只有标签、选项与歌词语言规则按语言区分。

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// 支持的界面/输出语言。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// 泰语
    #[default]
    Th,
    /// 英语
    En,
    /// 简体中文
    Zh,
    /// 日语
    Ja,
    /// 韩语
    Ko,
}

impl Language {
    /// 返回该语言的英文名称，用于拼接翻译类提示词。
    #[must_use]
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Th => "Thai",
            Self::En => "English",
            Self::Zh => "Chinese",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
        }
    }
}

/// 歌曲元数据的字段标签（不含冒号）。
///
/// 这些标签会原样出现在提示词与模型输出中，
/// 解析器会把所有语言的标签汇总进同一个匹配模式。
#[derive(Debug)]
pub struct Labels {
    /// 歌曲标题行的标签。
    pub song_title: &'static str,
    /// 风格行的标签。
    pub style: &'static str,
    /// 歌词段落的标签。
    pub lyrics: &'static str,
    /// 人声性别行的标签。
    pub vocal_gender: &'static str,
    /// 怪异度参数行的标签。
    pub weirdness: &'static str,
    /// 风格影响度参数行的标签。
    pub style_influence: &'static str,
}

/// 表单的预置选项列表。
#[derive(Debug)]
pub struct Options {
    /// 曲风选项。
    pub genres: &'static [&'static str],
    /// 情绪选项。
    pub moods: &'static [&'static str],
    /// 速度选项。
    pub tempos: &'static [&'static str],
    /// 乐器选项。
    pub instruments: &'static [&'static str],
    /// 歌曲结构段落标记。所有语言共用英文方括号标记。
    pub structure_parts: &'static [&'static str],
    /// 人声选项。约定第三项（下标 2）恒为对唱。
    pub vocals: [&'static str; 3],
}

/// 面向用户展示的错误消息文案。
#[derive(Debug)]
pub struct UiMessages {
    /// 未知错误。
    pub error_unknown: &'static str,
    /// 网络错误。
    pub error_network: &'static str,
    /// 配额/限流错误。
    pub error_rate_limit: &'static str,
    /// 模型过载。
    pub error_model_overloaded: &'static str,
    /// API Key 无效。
    pub error_api_key_invalid: &'static str,
    /// 响应被安全过滤拦截。
    pub error_safety_blocked: &'static str,
    /// 模型返回空响应。
    pub error_empty_response: &'static str,
}

/// 单一语言的完整文本表。
#[derive(Debug)]
pub struct Translations {
    /// 语言的英文名称。
    pub language_name: &'static str,
    /// 要求模型以该语言写歌词的规则行（英文指令）。
    pub lyric_language_rule: &'static str,
    /// 对唱模式下男声角色的默认称呼。
    pub duet_default_male: &'static str,
    /// 对唱模式下女声角色的默认称呼。
    pub duet_default_female: &'static str,
    /// 字段标签。
    pub labels: Labels,
    /// 预置选项。
    pub options: Options,
    /// 界面消息。
    pub ui: UiMessages,
}

/// 返回指定语言的文本表。
#[must_use]
pub fn translations(lang: Language) -> &'static Translations {
    match lang {
        Language::Th => &TH,
        Language::En => &EN,
        Language::Zh => &ZH,
        Language::Ja => &JA,
        Language::Ko => &KO,
    }
}

/// 所有语言共用的歌曲结构段落标记。
const STRUCTURE_PARTS: &[&str] = &[
    "[Intro]",
    "[Verse]",
    "[Verse 2]",
    "[Pre-Chorus]",
    "[Chorus]",
    "[Post-Chorus]",
    "[Bridge]",
    "[Rap Verse]",
    "[Fast Flow]",
    "[Guitar Solo]",
    "[Instrumental Break]",
    "[Outro]",
];

static EN: Translations = Translations {
    language_name: "English",
    lyric_language_rule:
        "All lyrics MUST be written in natural, contemporary English. Do NOT include translations or phonetic guides.",
    duet_default_male: "the male singer",
    duet_default_female: "the female singer",
    labels: Labels {
        song_title: "Song Title",
        style: "Style",
        lyrics: "Lyrics",
        vocal_gender: "Vocal Gender",
        weirdness: "Weirdness",
        style_influence: "Style Influence",
    },
    options: Options {
        genres: &[
            "Pop", "Rock", "Indie", "R&B", "Soul", "Hip Hop", "Rap", "Jazz", "Blues", "Funk",
            "Country", "Folk", "Acoustic", "Ballad", "EDM", "House", "Techno", "Synthwave",
            "Lo-fi", "Ambient", "Metal", "Death Metal", "Reggae", "Latin", "Bossa Nova",
            "Classical", "Opera", "Gospel", "City Pop", "K-Pop", "J-Pop", "Hyperpop",
            "Experimental", "Psychedelic",
        ],
        moods: &[
            "Happy", "Sad", "Romantic", "Lonely", "Energetic", "Relaxing", "Dark", "Epic",
            "Nostalgic", "Tense",
        ],
        tempos: &["Slow", "Medium", "Fast", "Very Fast"],
        instruments: &[
            "Piano",
            "Acoustic Guitar",
            "Electric Guitar",
            "Bass",
            "Drums",
            "Strings",
            "Synthesizer",
            "Saxophone",
            "Violin",
            "Flute",
        ],
        structure_parts: STRUCTURE_PARTS,
        vocals: ["Male Vocal", "Female Vocal", "Duet (Male/Female)"],
    },
    ui: UiMessages {
        error_unknown: "An unknown error occurred. Please try again.",
        error_network: "Network connection failed. Please check your internet connection.",
        error_rate_limit: "You have exceeded the request quota. Please wait a moment and try again.",
        error_model_overloaded: "The model is currently overloaded. Please try again later.",
        error_api_key_invalid: "The API key is not valid. Please check it and try again.",
        error_safety_blocked:
            "The response was blocked for safety reasons. Please adjust your prompt and try again.",
        error_empty_response: "The model returned an empty response. Please try again.",
    },
};

static TH: Translations = Translations {
    language_name: "Thai",
    lyric_language_rule:
        "All lyrics MUST be written in natural, contemporary Thai. Do NOT include English translations or phonetic (karaoke) guides.",
    duet_default_male: "ฝ่ายชาย",
    duet_default_female: "ฝ่ายหญิง",
    labels: Labels {
        song_title: "ชื่อเพลง",
        style: "สไตล์",
        lyrics: "เนื้อเพลง",
        vocal_gender: "เสียงร้อง",
        weirdness: "ความแปลกใหม่",
        style_influence: "อิทธิพลของสไตล์",
    },
    options: Options {
        genres: &[
            "Pop", "Rock", "Indie", "R&B", "Soul", "Hip Hop", "Rap", "Jazz", "Blues", "Funk",
            "Country", "Folk", "Acoustic", "Ballad", "EDM", "House", "Techno", "Synthwave",
            "Lo-fi", "Ambient", "Metal", "Reggae", "Latin", "Classical", "Opera", "City Pop",
            "Hyperpop", "Experimental", "ลูกทุ่ง", "หมอลำ", "เพื่อชีวิต", "สตริง",
        ],
        moods: &[
            "มีความสุข",
            "เศร้า",
            "โรแมนติก",
            "เหงา",
            "มีพลัง",
            "ผ่อนคลาย",
            "มืดมน",
            "ยิ่งใหญ่",
            "คิดถึงอดีต",
            "ตึงเครียด",
        ],
        tempos: &["ช้า", "ปานกลาง", "เร็ว", "เร็วมาก"],
        instruments: &[
            "เปียโน",
            "กีตาร์โปร่ง",
            "กีตาร์ไฟฟ้า",
            "เบส",
            "กลอง",
            "เครื่องสาย",
            "ซินธิไซเซอร์",
            "แซกโซโฟน",
            "ไวโอลิน",
            "ขลุ่ย",
        ],
        structure_parts: STRUCTURE_PARTS,
        vocals: ["เสียงร้องชาย", "เสียงร้องหญิง", "ร้องคู่ (ชาย/หญิง)"],
    },
    ui: UiMessages {
        error_unknown: "เกิดข้อผิดพลาดที่ไม่ทราบสาเหตุ กรุณาลองใหม่อีกครั้ง",
        error_network: "การเชื่อมต่อเครือข่ายล้มเหลว กรุณาตรวจสอบอินเทอร์เน็ตของคุณ",
        error_rate_limit: "มีการเรียกใช้งานเกินโควต้า กรุณารอสักครู่แล้วลองใหม่",
        error_model_overloaded: "โมเดลกำลังทำงานหนักเกินไป กรุณาลองใหม่ภายหลัง",
        error_api_key_invalid: "API Key ไม่ถูกต้อง กรุณาตรวจสอบแล้วลองใหม่",
        error_safety_blocked: "คำตอบถูกระงับด้วยเหตุผลด้านความปลอดภัย กรุณาปรับคำขอของคุณ",
        error_empty_response: "โมเดลไม่ได้ส่งข้อความกลับมา กรุณาลองใหม่อีกครั้ง",
    },
};

static ZH: Translations = Translations {
    language_name: "Chinese",
    lyric_language_rule:
        "All lyrics MUST be written in natural, contemporary Simplified Chinese. Do NOT include translations or pinyin guides.",
    duet_default_male: "男声",
    duet_default_female: "女声",
    labels: Labels {
        song_title: "歌曲名称",
        style: "风格",
        lyrics: "歌词",
        vocal_gender: "人声",
        weirdness: "怪异度",
        style_influence: "风格影响度",
    },
    options: Options {
        genres: &[
            "Pop", "Rock", "Indie", "R&B", "Soul", "Hip Hop", "Rap", "Jazz", "Blues", "Funk",
            "Country", "Folk", "Acoustic", "Ballad", "EDM", "House", "Techno", "Synthwave",
            "Lo-fi", "Ambient", "Metal", "Reggae", "Latin", "Classical", "Opera", "City Pop",
            "Hyperpop", "Experimental", "中国风", "民谣",
        ],
        moods: &[
            "快乐", "悲伤", "浪漫", "孤独", "充满活力", "放松", "黑暗", "史诗", "怀旧", "紧张",
        ],
        tempos: &["慢速", "中速", "快速", "极快"],
        instruments: &[
            "钢琴",
            "原声吉他",
            "电吉他",
            "贝斯",
            "鼓",
            "弦乐",
            "合成器",
            "萨克斯",
            "小提琴",
            "长笛",
        ],
        structure_parts: STRUCTURE_PARTS,
        vocals: ["男声", "女声", "男女对唱"],
    },
    ui: UiMessages {
        error_unknown: "发生未知错误，请重试。",
        error_network: "网络连接失败，请检查网络设置。",
        error_rate_limit: "请求超出配额，请稍后再试。",
        error_model_overloaded: "模型当前负载过高，请稍后再试。",
        error_api_key_invalid: "API Key 无效，请检查后重试。",
        error_safety_blocked: "回复因安全原因被拦截，请调整你的请求。",
        error_empty_response: "模型返回了空回复，请重试。",
    },
};

static JA: Translations = Translations {
    language_name: "Japanese",
    lyric_language_rule:
        "All lyrics MUST be written in natural, contemporary Japanese. Do NOT include translations or romaji guides.",
    duet_default_male: "男性パート",
    duet_default_female: "女性パート",
    labels: Labels {
        song_title: "曲名",
        style: "スタイル",
        lyrics: "歌詞",
        vocal_gender: "ボーカル",
        weirdness: "奇抜さ",
        style_influence: "スタイルの影響度",
    },
    options: Options {
        genres: &[
            "Pop", "Rock", "Indie", "R&B", "Soul", "Hip Hop", "Rap", "Jazz", "Blues", "Funk",
            "Country", "Folk", "Acoustic", "Ballad", "EDM", "House", "Techno", "Synthwave",
            "Lo-fi", "Ambient", "Metal", "Reggae", "Latin", "Classical", "Opera", "City Pop",
            "J-Pop", "Hyperpop", "Experimental", "演歌", "ボカロ",
        ],
        moods: &[
            "楽しい",
            "悲しい",
            "ロマンチック",
            "孤独",
            "エネルギッシュ",
            "リラックス",
            "ダーク",
            "壮大",
            "ノスタルジック",
            "緊張感",
        ],
        tempos: &["スロー", "ミディアム", "ファスト", "超高速"],
        instruments: &[
            "ピアノ",
            "アコースティックギター",
            "エレキギター",
            "ベース",
            "ドラム",
            "ストリングス",
            "シンセサイザー",
            "サックス",
            "バイオリン",
            "フルート",
        ],
        structure_parts: STRUCTURE_PARTS,
        vocals: ["男性ボーカル", "女性ボーカル", "デュエット（男女）"],
    },
    ui: UiMessages {
        error_unknown: "不明なエラーが発生しました。もう一度お試しください。",
        error_network: "ネットワーク接続に失敗しました。通信環境をご確認ください。",
        error_rate_limit: "リクエストがクォータを超えました。しばらくしてから再試行してください。",
        error_model_overloaded: "モデルが混雑しています。後ほどお試しください。",
        error_api_key_invalid: "API キーが無効です。確認のうえ再入力してください。",
        error_safety_blocked: "安全上の理由で応答がブロックされました。入力内容を調整してください。",
        error_empty_response: "モデルから空の応答が返されました。もう一度お試しください。",
    },
};

static KO: Translations = Translations {
    language_name: "Korean",
    lyric_language_rule:
        "All lyrics MUST be written in natural, contemporary Korean. Do NOT include translations or romanization guides.",
    duet_default_male: "남성 파트",
    duet_default_female: "여성 파트",
    labels: Labels {
        song_title: "곡 제목",
        style: "스타일",
        lyrics: "가사",
        vocal_gender: "보컬",
        weirdness: "독특함",
        style_influence: "스타일 영향도",
    },
    options: Options {
        genres: &[
            "Pop", "Rock", "Indie", "R&B", "Soul", "Hip Hop", "Rap", "Jazz", "Blues", "Funk",
            "Country", "Folk", "Acoustic", "Ballad", "EDM", "House", "Techno", "Synthwave",
            "Lo-fi", "Ambient", "Metal", "Reggae", "Latin", "Classical", "Opera", "City Pop",
            "K-Pop", "Hyperpop", "Experimental", "트로트",
        ],
        moods: &[
            "행복한",
            "슬픈",
            "로맨틱한",
            "외로운",
            "에너지 넘치는",
            "편안한",
            "어두운",
            "웅장한",
            "그리운",
            "긴장감 있는",
        ],
        tempos: &["느리게", "보통", "빠르게", "매우 빠르게"],
        instruments: &[
            "피아노",
            "어쿠스틱 기타",
            "일렉 기타",
            "베이스",
            "드럼",
            "현악기",
            "신디사이저",
            "색소폰",
            "바이올린",
            "플루트",
        ],
        structure_parts: STRUCTURE_PARTS,
        vocals: ["남성 보컬", "여성 보컬", "듀엣 (남녀)"],
    },
    ui: UiMessages {
        error_unknown: "알 수 없는 오류가 발생했습니다. 다시 시도해 주세요.",
        error_network: "네트워크 연결에 실패했습니다. 인터넷 상태를 확인해 주세요.",
        error_rate_limit: "요청이 할당량을 초과했습니다. 잠시 후 다시 시도해 주세요.",
        error_model_overloaded: "모델이 혼잡합니다. 나중에 다시 시도해 주세요.",
        error_api_key_invalid: "API 키가 올바르지 않습니다. 확인 후 다시 시도해 주세요.",
        error_safety_blocked: "안전상의 이유로 응답이 차단되었습니다. 요청을 수정해 주세요.",
        error_empty_response: "모델이 빈 응답을 반환했습니다. 다시 시도해 주세요.",
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_language_has_duet_as_third_vocal() {
        // 对唱选项恒为第三项，组装器依赖这一约定。
        for lang in Language::iter() {
            let t = translations(lang);
            assert_eq!(t.options.vocals.len(), 3);
            assert!(!t.options.vocals[2].is_empty());
        }
    }

    #[test]
    fn test_language_parses_case_insensitively() {
        assert_eq!("TH".parse::<Language>().unwrap(), Language::Th);
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
    }

    #[test]
    fn test_labels_are_unique_across_languages() {
        // 解析器把所有语言的标签并入同一个正则，标签之间不能互为前缀歧义来源。
        let mut titles: Vec<&str> = Language::iter()
            .map(|l| translations(l).labels.song_title)
            .collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), Language::iter().count());
    }
}
