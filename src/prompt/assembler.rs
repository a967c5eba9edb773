//! # 主提示词组装器
//!
//! 把表单字段、翻译后的最终风格串与静态规则片段确定性地替换进
//! 主模板。纯字符串操作，没有内部失败路径：模板的全部替换键
//! 都是类型化文本表的字段，不存在运行时缺键。

use crate::{
    locale::{Language, translations},
    model::form::{FormState, GenerationMode},
    prompt::texts,
};

/// 判定结构段落为器乐段的关键词。
const INSTRUMENTAL_KEYWORDS: &[&str] = &[
    "intro",
    "solo",
    "outro",
    "instrumental",
    "interlude",
    "break",
];

/// 无结构输入时使用的固定三段式骨架。
const DEFAULT_STRUCTURE: &[&str] = &["[Intro]", "[Solo]", "[Outro]"];

/// 触发快速说唱指示的段落标记词。
const FAST_FLOW_MARKERS: &[&str] = &["fast", "flow", "chopper"];

/// 组装最终发送给模型的主提示词。
///
/// `final_style` 是已翻译、去重后的风格标签串；条件块按各自的
/// 触发条件独立加入，缺席的块替换为空串，最终输出不含任何
/// 未解析的占位符。
#[must_use]
pub fn assemble(form: &FormState, final_style: &str, lang: Language) -> String {
    let t = translations(lang);
    let style_lower = final_style.to_lowercase();

    // 条件指示块
    let rap_instruction = if style_lower.contains("rap") || style_lower.contains("hip-hop") {
        format!(
            "{}{}",
            texts::RAP_INSTRUCTION_TITLE,
            texts::RAP_INSTRUCTION_CONTENT
        )
    } else {
        String::new()
    };

    let is_narrative_genre = ["ลูกทุ่ง", "หมอลำ", "luk thung", "mor lam"]
        .iter()
        .any(|marker| style_lower.contains(marker));
    let narrative_genre_instruction = if is_narrative_genre {
        format!(
            "{}{}",
            texts::NARRATIVE_GENRE_TITLE,
            texts::NARRATIVE_GENRE_CONTENT
        )
    } else {
        String::new()
    };

    let auto_param_instruction = if form.mode == GenerationMode::Auto {
        format!("{}{}", texts::AUTO_RULES_TITLE, texts::AUTO_RULES_CONTENT)
    } else {
        String::new()
    };

    let (instrument_instruction, instrument_lyric_constraint) = if form.instruments.is_empty() {
        (String::new(), String::new())
    } else {
        let instrument_list = form.instruments.join(", ");
        (
            format!(
                "{}{}",
                texts::INSTRUMENT_FOCUS_TITLE,
                texts::INSTRUMENT_FOCUS_CONTENT.replace("{instrument_list}", &instrument_list)
            ),
            texts::INSTRUMENT_LYRIC_CONSTRAINT.replace("{instrument_list}", &instrument_list),
        )
    };

    let exclusion_instruction = if form.excluded_words.trim().is_empty() {
        String::new()
    } else {
        format!(
            "{}{}",
            texts::EXCLUSION_RULE_TITLE,
            texts::EXCLUSION_RULE_CONTENT.replace("{excluded_words}", form.excluded_words.trim())
        )
    };

    // 对唱选项约定为人声列表的第三项。
    let is_duet = form.vocal == t.options.vocals[2];
    let duet_instruction = if is_duet {
        let male_role = if form.male_role.is_empty() {
            t.duet_default_male
        } else {
            form.male_role.as_str()
        };
        let female_role = if form.female_role.is_empty() {
            t.duet_default_female
        } else {
            form.female_role.as_str()
        };
        format!(
            "{}{}",
            texts::DUET_INSTRUCTIONS_TITLE,
            texts::DUET_INSTRUCTIONS_CONTENT
                .replace("{male_role}", male_role)
                .replace("{female_role}", female_role)
        )
    } else {
        String::new()
    };

    let mut inspiration_instruction = String::new();
    if !form.inspired_by_song.is_empty() || !form.inspired_by_artist.is_empty() {
        inspiration_instruction.push_str("\n\n");
        inspiration_instruction.push_str(texts::INSPIRATION_TITLE);
        if !form.inspired_by_song.is_empty() {
            inspiration_instruction.push('\n');
            inspiration_instruction
                .push_str(&texts::INSPIRATION_SONG.replace("{song}", &form.inspired_by_song));
        }
        if !form.inspired_by_artist.is_empty() {
            inspiration_instruction.push('\n');
            inspiration_instruction.push_str(
                &texts::INSPIRATION_ARTIST.replace("{artist}", &form.inspired_by_artist),
            );
        }
    }

    let structure_rule = if form.structure.is_empty() {
        String::new()
    } else {
        format!(
            "{}{}",
            texts::STRUCTURE_RULE_TITLE,
            texts::STRUCTURE_RULE_CONTENT.replace("{structure}", &form.structure.join(" -> "))
        )
    };

    let has_fast_flow = form.structure.iter().any(|part| {
        let lower = part.to_lowercase();
        FAST_FLOW_MARKERS.iter().any(|marker| lower.contains(marker))
    });
    let fast_flow_instruction = if has_fast_flow {
        texts::FAST_FLOW_INSTRUCTION
    } else {
        ""
    };

    let structure_body = build_structure_body(&form.structure);

    // 数值参数行：手动模式写入字面值，自动模式写入占位标记，
    // 数值本身由 metrics 模块独立计算，模板从不自行求值。
    let weirdness_line = parameter_line(t.labels.weirdness, form.mode, form.weirdness);
    let style_influence_line =
        parameter_line(t.labels.style_influence, form.mode, form.style_influence);

    substitute(
        texts::MASTER_TEMPLATE,
        &[
            ("final_goal", texts::FINAL_GOAL),
            ("label_song_title", t.labels.song_title),
            ("placeholder_song_title", texts::PLACEHOLDER_SONG_TITLE),
            ("label_style", t.labels.style),
            ("style", final_style),
            ("label_vocal_gender", t.labels.vocal_gender),
            ("vocal_gender", &form.vocal),
            ("weirdness_line", &weirdness_line),
            ("style_influence_line", &style_influence_line),
            ("label_lyrics", t.labels.lyrics),
            ("structure_body", &structure_body),
            ("golden_rules_title", texts::GOLDEN_RULES_TITLE),
            ("rule_emotional_core", texts::RULE_EMOTIONAL_CORE),
            ("rule_narrative_flow", texts::RULE_NARRATIVE_FLOW),
            ("rule_lyrical_craft", texts::RULE_LYRICAL_CRAFT),
            ("rule_authentic_voice", texts::RULE_AUTHENTIC_VOICE),
            ("rule_language", t.lyric_language_rule),
            ("rule_rhythm", texts::RULE_RHYTHM),
            ("rule_repetition", texts::RULE_REPETITION),
            (
                "rule_description_language",
                texts::RULE_DESCRIPTION_LANGUAGE,
            ),
            (
                "rule_technical_lyricism_title",
                texts::RULE_TECHNICAL_LYRICISM_TITLE,
            ),
            (
                "rule_technical_lyricism_content",
                texts::RULE_TECHNICAL_LYRICISM_CONTENT,
            ),
            ("instrument_lyric_constraint", &instrument_lyric_constraint),
            ("exclusion_instruction", &exclusion_instruction),
            ("rap_instruction", &rap_instruction),
            ("narrative_genre_instruction", &narrative_genre_instruction),
            ("auto_param_instruction", &auto_param_instruction),
            ("analysis_guide_title", texts::ANALYSIS_GUIDE_TITLE),
            ("analysis_guide_content", texts::ANALYSIS_GUIDE_CONTENT),
            ("instrument_instruction", &instrument_instruction),
            ("duet_instruction", &duet_instruction),
            ("inspiration_instruction", &inspiration_instruction),
            ("structure_rule", &structure_rule),
            ("fast_flow_instruction", fast_flow_instruction),
            ("command_instruction", texts::COMMAND_INSTRUCTION),
            ("user_request_header", texts::USER_REQUEST_HEADER),
            ("user_prompt", &form.prompt),
        ],
    )
}

/// 构建歌词段落骨架：每个结构标记后接一个按段落类型选出的占位文本。
fn build_structure_body(structure: &[String]) -> String {
    let parts: Vec<&str> = if structure.is_empty() {
        DEFAULT_STRUCTURE.to_vec()
    } else {
        structure.iter().map(String::as_str).collect()
    };

    parts
        .iter()
        .map(|part| format!("{part}\n{}", structure_placeholder(part)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// 按段落标记选择内容占位文本。
///
/// 命中器乐关键词的段落按子关键词细分为前奏/独奏/尾奏/通用器乐，
/// 其余段落一律使用歌词占位文本。
fn structure_placeholder(part: &str) -> &'static str {
    let lower = part.to_lowercase();
    if INSTRUMENTAL_KEYWORDS
        .iter()
        .any(|keyword| lower.contains(keyword))
    {
        if lower.contains("intro") {
            texts::PLACEHOLDER_INTRO
        } else if lower.contains("solo") {
            texts::PLACEHOLDER_SOLO
        } else if lower.contains("outro") {
            texts::PLACEHOLDER_OUTRO
        } else {
            texts::PLACEHOLDER_INSTRUMENTAL
        }
    } else {
        texts::PLACEHOLDER_LYRICS
    }
}

/// 渲染一条数值参数行。
fn parameter_line(label: &str, mode: GenerationMode, value: u32) -> String {
    match mode {
        GenerationMode::Manual => format!("{label}: {value}"),
        GenerationMode::Auto => format!("{label}: {}", texts::AUTO_VALUE_PLACEHOLDER),
    }
}

/// 对模板做一轮键值替换。
fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = template.to_string();
    for (key, value) in values {
        output = output.replace(&format!("{{{key}}}"), value);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_form() -> FormState {
        FormState {
            prompt: "a song about the last train home".to_string(),
            vocal: "Female Vocal".to_string(),
            mode: GenerationMode::Manual,
            weirdness: 65,
            style_influence: 40,
            ..FormState::default()
        }
    }

    #[test]
    fn test_no_unresolved_placeholders_remain() {
        let prompt = assemble(&base_form(), "Synth Pop, Dreamy", Language::En);
        for key in [
            "{label_", "{rule_", "{structure_body}", "{style}", "{user_prompt}",
            "{duet_instruction}", "{weirdness_line}",
        ] {
            assert!(!prompt.contains(key), "未解析的占位符: {key}");
        }
    }

    #[test]
    fn test_manual_mode_renders_literal_values() {
        let prompt = assemble(&base_form(), "Pop", Language::En);
        assert!(prompt.contains("Weirdness: 65"));
        assert!(prompt.contains("Style Influence: 40"));
        assert!(!prompt.contains("AUTO PARAMETER RULES"));
    }

    #[test]
    fn test_auto_mode_uses_placeholder_token() {
        let mut form = base_form();
        form.mode = GenerationMode::Auto;
        let prompt = assemble(&form, "Pop", Language::En);
        assert!(prompt.contains(&format!("Weirdness: {}", texts::AUTO_VALUE_PLACEHOLDER)));
        assert!(!prompt.contains("Weirdness: 65"));
        assert!(prompt.contains("AUTO PARAMETER RULES"));
    }

    #[test]
    fn test_rap_block_triggered_by_style_marker() {
        let without = assemble(&base_form(), "Dream Pop", Language::En);
        assert!(!without.contains("RAP GUIDELINES"));
        let with = assemble(&base_form(), "Boom Bap Hip-Hop", Language::En);
        assert!(with.contains("RAP GUIDELINES"));
        let case_insensitive = assemble(&base_form(), "THAI RAP", Language::En);
        assert!(case_insensitive.contains("RAP GUIDELINES"));
    }

    #[test]
    fn test_narrative_genre_block_triggered_by_markers() {
        let prompt = assemble(&base_form(), "Luk Thung, Ballad", Language::Th);
        assert!(prompt.contains("TRADITIONAL GENRE GUIDELINES"));
        let thai_script = assemble(&base_form(), "ลูกทุ่ง", Language::Th);
        assert!(thai_script.contains("TRADITIONAL GENRE GUIDELINES"));
    }

    #[test]
    fn test_structure_interleaving_and_classification() {
        let mut form = base_form();
        form.structure = vec![
            "[Intro]".to_string(),
            "[Verse]".to_string(),
            "[Guitar Solo]".to_string(),
            "[Outro]".to_string(),
        ];
        let prompt = assemble(&form, "Rock", Language::En);
        assert!(prompt.contains(&format!("[Intro]\n{}", texts::PLACEHOLDER_INTRO)));
        assert!(prompt.contains(&format!("[Verse]\n{}", texts::PLACEHOLDER_LYRICS)));
        assert!(prompt.contains(&format!("[Guitar Solo]\n{}", texts::PLACEHOLDER_SOLO)));
        assert!(prompt.contains(&format!("[Outro]\n{}", texts::PLACEHOLDER_OUTRO)));
        assert!(prompt.contains("[Intro] -> [Verse] -> [Guitar Solo] -> [Outro]"));
    }

    #[test]
    fn test_default_skeleton_when_no_structure() {
        let prompt = assemble(&base_form(), "Pop", Language::En);
        assert!(prompt.contains(&format!("[Intro]\n{}", texts::PLACEHOLDER_INTRO)));
        assert!(prompt.contains(&format!("[Solo]\n{}", texts::PLACEHOLDER_SOLO)));
        assert!(prompt.contains(&format!("[Outro]\n{}", texts::PLACEHOLDER_OUTRO)));
        assert!(!prompt.contains("STRUCTURE RULE"));
    }

    #[test]
    fn test_duet_roles_with_defaults() {
        let mut form = base_form();
        form.vocal = "Duet (Male/Female)".to_string();
        form.female_role = "Nok".to_string();
        let prompt = assemble(&form, "Pop", Language::En);
        assert!(prompt.contains("DUET FORMAT"));
        // 男声角色留空，回退到该语言的默认称呼。
        assert!(prompt.contains("(the male singer):"));
        assert!(prompt.contains("(Nok):"));
    }

    #[test]
    fn test_optional_blocks_from_fields() {
        let mut form = base_form();
        form.excluded_words = " heartbreak, tears ".to_string();
        form.instruments = vec!["Saxophone".to_string(), "Piano".to_string()];
        form.inspired_by_artist = "Bird Thongchai".to_string();
        let prompt = assemble(&form, "City Pop", Language::En);
        assert!(prompt.contains("must NOT appear anywhere in the lyrics: heartbreak, tears."));
        assert!(prompt.contains("Saxophone, Piano"));
        assert!(prompt.contains("Bird Thongchai"));
        assert!(prompt.contains("INSPIRATION"));
        // 未填写参考歌曲时不应出现歌曲参考行。
        assert!(!prompt.contains("as a structural and emotional reference"));
    }

    #[test]
    fn test_fast_flow_marker_in_structure() {
        let mut form = base_form();
        form.structure = vec!["[Verse]".to_string(), "[Fast Flow]".to_string()];
        let prompt = assemble(&form, "Rap", Language::En);
        assert!(prompt.contains("FAST FLOW"));
    }
}
