//! # 模型回复解析器
//!
//! 从模型的自由文本回复中提取标题、风格与歌词，并清理
//! 罗马音/注音行。所有函数都是全函数：提取失败时回退到
//! 固定占位值，绝不报错。

use std::sync::LazyLock;

use regex::Regex;
use strum::IntoEnumIterator;

use crate::{
    locale::{Labels, Language, translations},
    model::song::ParsedSong,
};

/// 提取不到标题时的占位值。
pub const UNTITLED: &str = "Untitled";
/// 提取不到风格时的占位值。
pub const UNKNOWN_STYLE: &str = "Unknown Style";

/// 为某个字段标签构建跨语言的行首匹配模式。
///
/// 把**所有**支持语言的该字段标签并入同一个交替分支（模型可能用
/// 非当前语言回显标签），并容忍标签两侧的 Markdown 强调符号。
/// 冒号后只允许行内空白：标签行没有同行内容时，匹配必须止步于
/// 行尾，不能吞掉下一行。模式只在加载时编译一次。
fn label_pattern(get_label: fn(&Labels) -> &'static str) -> Regex {
    let labels = Language::iter()
        .map(|lang| regex::escape(get_label(&translations(lang).labels)))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?m)^\s*\**({labels})\**\s*:[ \t]*(.*)")).expect("未能编译字段标签正则")
}

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| label_pattern(|l| l.song_title));
static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| label_pattern(|l| l.style));
static LYRICS_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| label_pattern(|l| l.lyrics));

/// 匹配行内的第一个方括号结构标记，如 `[Verse]`。
static SECTION_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\]").expect("未能编译 SECTION_TAG_RE"));

/// 去掉 Markdown 强调符号并修剪首尾空白。
fn clean_markdown(text: &str) -> String {
    text.replace('*', "").trim().to_string()
}

/// 把模型回复解析为结构化的歌曲数据。
///
/// - 标题与风格按行首标签提取，缺失时回退为 [`UNTITLED`] / [`UNKNOWN_STYLE`]；
/// - 歌词取歌词标签之后的全部文本；没有歌词标签时回退到第一个
///   方括号结构标记的位置；再没有则整段原文都视为歌词；
/// - 配置了水印且歌词非空时，把替换过 `{title}`/`{style}` 的水印
///   作为独立段落附加在歌词末尾（只加到歌词，不影响标题与风格）。
#[must_use]
pub fn parse_song(raw: &str, watermark: Option<&str>) -> ParsedSong {
    let title = TITLE_RE
        .captures(raw)
        .and_then(|caps| caps.get(2))
        .map_or_else(|| UNTITLED.to_string(), |m| clean_markdown(m.as_str()));
    let style = STYLE_RE
        .captures(raw)
        .and_then(|caps| caps.get(2))
        .map_or_else(|| UNKNOWN_STYLE.to_string(), |m| clean_markdown(m.as_str()));

    let mut lyrics = if let Some(header) = LYRICS_HEADER_RE.find(raw) {
        raw[header.end()..].trim().to_string()
    } else if let Some(tag) = SECTION_TAG_RE.find(raw) {
        raw[tag.start()..].trim().to_string()
    } else {
        raw.to_string()
    };

    if let Some(template) = watermark
        && !template.is_empty()
        && !lyrics.is_empty()
    {
        let formatted = template.replace("{title}", &title).replace("{style}", &style);
        lyrics.push_str(&format!("\n\n({formatted})"));
    }

    ParsedSong {
        title,
        style,
        lyrics,
    }
}

/// 括号行以这些词开头时视为音乐指示，整行保留。
static MUSICAL_INSTRUCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(chorus|verse|intro|outro|solo|bridge|hook|pre-chorus|instrumental|fast flow|rap|guitar|drum|bass|piano|synth|ad-lib|spoken|background|music|fade|build|drop|break|riff|end)",
    )
    .expect("未能编译 MUSICAL_INSTRUCTION_RE")
});

/// 括号行内容包含这些词之一时同样视为音乐指示。
const MUSICAL_KEYWORDS: &[&str] = &[
    "guitar", "drum", "bass", "piano", "synth", "solo", "riff", "instrumental", "voice", "vocal",
    "sound", "beat", "music", "fade", "end", "start", "tempo", "slow", "fast", "build", "drop",
];

/// 删除看起来像罗马音/注音指南的括号行。
///
/// 逐行判定，只作用于整行被圆括号包裹的行：
/// - 内容匹配音乐指示关键词，或含 `!`/`?`（和声、喊叫）→ 保留；
/// - 否则内容含空格且长度超过 5 个字符 → 视为注音句子删除；
/// - 其余行原样通过。行序与非括号内容完全不变。
#[must_use]
pub fn strip_romanization(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            let Some(inner) = trimmed
                .strip_prefix('(')
                .and_then(|rest| rest.strip_suffix(')'))
            else {
                return true;
            };
            let content = inner.to_lowercase();

            if MUSICAL_INSTRUCTION_RE.is_match(&content) {
                return true;
            }
            if content.contains('!') || content.contains('?') {
                return true;
            }
            if MUSICAL_KEYWORDS
                .iter()
                .any(|keyword| content.contains(keyword))
            {
                return true;
            }
            // 含空格的长括号句子几乎总是逐词注音。
            !(content.contains(' ') && content.chars().count() > 5)
        })
        .collect();
    kept.join("\n")
}

static BRACKET_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]").expect("未能编译 BRACKET_TAG_RE"));
static SPEAKER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\):\s*").expect("未能编译 SPEAKER_PREFIX_RE"));
static STAGE_DIRECTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(instrumental.*?\)|\(.*?solo.*?\)|\(fade.*?\)")
        .expect("未能编译 STAGE_DIRECTION_RE")
});
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("未能编译 BLANK_LINES_RE"));

/// 把生成的歌曲文本清理成适合送入语音模型朗读的纯歌词。
///
/// 去掉元数据头、结构标记与舞台指示；对唱歌曲把两个声部前缀
/// 规整为 `Male:` / `Female:`，独唱则直接去掉说话人前缀。
/// 找不到歌词标签时返回空串。
#[must_use]
pub fn clean_lyrics_for_speech(song: &str, lang: Language) -> String {
    let Some(header) = LYRICS_HEADER_RE.find(song) else {
        return String::new();
    };
    let options = &translations(lang).options;

    let mut text = song[header.end()..].to_string();
    text = BRACKET_TAG_RE.replace_all(&text, "\n").into_owned();

    let is_duet = song.contains(options.vocals[2]);
    if is_duet {
        let male_tag = format!("({}):", options.vocals[0]);
        let female_tag = format!("({}):", options.vocals[1]);
        text = text.replace(&male_tag, "Male:");
        text = text.replace(&female_tag, "Female:");
    } else {
        text = SPEAKER_PREFIX_RE.replace_all(&text, "").into_owned();
    }

    text = STAGE_DIRECTION_RE.replace_all(&text, "").into_owned();
    BLANK_LINES_RE.replace_all(&text, "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labeled_song() {
        let raw = "**Song Title:** Midnight Rain\n**Style:** Synth Pop\n**Lyrics:**\n[Verse]\nfoo";
        let song = parse_song(raw, None);
        assert_eq!(song.title, "Midnight Rain");
        assert_eq!(song.style, "Synth Pop");
        assert_eq!(song.lyrics, "[Verse]\nfoo");
    }

    #[test]
    fn test_parse_labels_from_another_language() {
        // 界面是泰语，但模型用泰语标签回显时同样要能解析。
        let raw = "ชื่อเพลง: แสงดาว\nสไตล์: Luk Thung\nเนื้อเพลง:\n[Verse]\nบรรทัดแรก";
        let song = parse_song(raw, None);
        assert_eq!(song.title, "แสงดาว");
        assert_eq!(song.style, "Luk Thung");
        assert_eq!(song.lyrics, "[Verse]\nบรรทัดแรก");
    }

    #[test]
    fn test_lyrics_fallback_to_first_section_tag() {
        let raw = "some preamble\n[Chorus]\nbar";
        let song = parse_song(raw, None);
        assert_eq!(song.title, UNTITLED);
        assert_eq!(song.style, UNKNOWN_STYLE);
        assert_eq!(song.lyrics, "[Chorus]\nbar");
    }

    #[test]
    fn test_lyrics_fallback_to_entire_text() {
        let raw = "no headers and no tags here";
        let song = parse_song(raw, None);
        assert_eq!(song.lyrics, raw);
    }

    #[test]
    fn test_watermark_appended_to_lyrics_only() {
        let raw = "Song Title: Foo\nStyle: Bar\nLyrics:\n[Verse]\nbaz";
        let song = parse_song(raw, Some("{title} - {style} edit"));
        assert_eq!(song.lyrics, "[Verse]\nbaz\n\n(Foo - Bar edit)");
        assert_eq!(song.title, "Foo");
        assert_eq!(song.style, "Bar");
    }

    #[test]
    fn test_bare_lyrics_header_keeps_first_line() {
        // 标签行没有同行内容时，歌词必须从下一行完整开始，
        // 首个结构标记不能被标签匹配吞掉。
        let raw = "Song Title: Foo\nLyrics:\n[Verse]\nfirst line";
        let song = parse_song(raw, None);
        assert_eq!(song.lyrics, "[Verse]\nfirst line");
    }

    #[test]
    fn test_watermark_omitted_for_empty_lyrics() {
        let song = parse_song("", Some("{title} edit"));
        assert_eq!(song.lyrics, "");
    }

    #[test]
    fn test_strip_romanization_rules() {
        let text = "ฉันรักเธอ\n(Chan rak ter mak mak)\n(Guitar Solo)\n(Hey!)\nบรรทัดสุดท้าย";
        let cleaned = strip_romanization(text);
        assert_eq!(cleaned, "ฉันรักเธอ\n(Guitar Solo)\n(Hey!)\nบรรทัดสุดท้าย");
    }

    #[test]
    fn test_strip_romanization_keeps_short_parentheticals() {
        // 不含空格或不超过 5 个字符的括号行不会被当成注音。
        let text = "(Oh)\n(la la)";
        assert_eq!(strip_romanization(text), text);
    }

    #[test]
    fn test_strip_romanization_preserves_other_lines_exactly() {
        let text = "  indented line\n\n(chan rak ter mak mak)\nplain";
        assert_eq!(strip_romanization(text), "  indented line\n\nplain");
    }

    #[test]
    fn test_clean_lyrics_for_speech() {
        let song = "Song Title: X\nLyrics:\n[Verse]\n(Narrator): first line\n(Instrumental Break)\nsecond line";
        let cleaned = clean_lyrics_for_speech(song, Language::En);
        assert!(cleaned.contains("first line"));
        assert!(!cleaned.contains("Narrator"));
        assert!(!cleaned.contains("Instrumental"));
    }

    #[test]
    fn test_clean_lyrics_for_speech_without_header() {
        assert_eq!(clean_lyrics_for_speech("[Verse]\nfoo", Language::En), "");
    }
}
