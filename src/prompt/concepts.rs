//! 辅助提示词构建：修订、封面、MV、灵感、叙事蓝图、风格与结构建议。
//!
//! 与 [`super::assembler`] 一样全部是纯字符串/JSON 操作；
//! 结构化输出的响应 schema 用 [`serde_json::json!`] 现场构建。

use serde_json::{Value, json};

use crate::{
    locale::{Language, translations},
    model::form::FormState,
};

/// 构建歌曲修订提示词。
///
/// 要求模型保留原有元数据、只改动反馈提到的段落，并返回完整歌曲文本。
#[must_use]
pub fn revision_prompt(original_song: &str, revision_request: &str) -> String {
    format!(
        "You are a master lyricist and song editor. Your task is to revise an existing song based on specific user feedback.

# CRITICAL RULES
1. **Preserve Metadata:** You MUST preserve the original metadata (Song Title, Style, Vocal Gender, Weirdness, Style Influence) exactly as it is, unless the user's feedback explicitly asks to change it.
2. **Targeted Revisions:** Only modify the lyrics sections (e.g., [Verse], [Chorus]) to incorporate the user's feedback. Do not rewrite sections that were not mentioned.
3. **Maintain Language:** The language of the lyrics MUST remain the same as the original song's language.
4. **Complete Output:** Return the FULL, complete song text in the original, correct format. Do not provide only the changed parts or any extra commentary.
5. **NO TRANSLATIONS/NOTES:** Do NOT include translations, romanization (karaoke), or explanations in the lyrics. Output ONLY what is to be sung.

---

# Original Song
{original_song}

---

# User's Revision Request
\"{revision_request}\"

---

# Command
Now, generate the revised song based on the user's request, following all rules strictly."
    )
}

/// 描述目标听众文化背景的短语，用于封面与 MV 提示词中的角色设定。
fn audience_culture(lang: Language) -> String {
    format!(
        "the culture of {}-language popular music",
        translations(lang).language_name
    )
}

/// 构建专辑封面图像提示词的生成请求。
///
/// 所有输入都应当已翻译为英文；`imagery` 为空时写入 `Not specified`。
#[must_use]
pub fn image_prompt(
    concept: &str,
    genres: &[String],
    moods: &[String],
    imagery: &str,
    lang: Language,
) -> String {
    let imagery = if imagery.is_empty() {
        "Not specified"
    } else {
        imagery
    };
    format!(
        "You are a professional art director specializing in creating prompts for AI image generators. Your task is to generate a single, highly-detailed, and evocative prompt to create album cover art for a song.

**Song Analysis:**
- **Concept:** {concept}
- **Genre/Style:** {genres}
- **Mood:** {moods}
- **Key Imagery/Symbols:** {imagery}

**Instructions for Prompt Generation:**
1. **Core Principle: Emotional Realism.** The prompt must evoke a realistic, cinematic, and emotionally resonant scene that captures the song's core feeling. Avoid fantastical, surreal, or abstract elements.
2. **Character Grounding:** If any human characters are described, they MUST be depicted as belonging to {culture}, in believable everyday settings from that world.
3. **Format:** Create a single, continuous paragraph of text. Do not use line breaks.
4. **Content:** Blend the song's concept, mood, and imagery into one coherent visual scene. Describe the subject, setting, composition, lighting, and color palette.
5. **Style Keywords:** Incorporate artistic style keywords (e.g., \"photorealistic, cinematic, dramatic lighting, 35mm film photography\").
6. **Technical Details:** Add technical terms such as lighting descriptions, camera details, and quality specifiers (\"hyperdetailed, 8k, photorealistic\").
7. **Language:** The entire output prompt MUST be in English.
8. **Output:** Return ONLY the generated prompt text, with no additional commentary, labels, or explanations.

Now, generate the prompt based on the provided song analysis.",
        genres = genres.join(", "),
        moods = moods.join(", "),
        culture = audience_culture(lang),
    )
}

/// 构建 MV 分镜概念的生成请求。输入同样应当已翻译为英文。
#[must_use]
pub fn video_prompt(
    title: &str,
    story: &str,
    genres: &[String],
    moods: &[String],
    imagery: &str,
    lang: Language,
) -> String {
    let imagery = if imagery.is_empty() {
        "Not specified"
    } else {
        imagery
    };
    format!(
        "You are a visionary music video director. Your task is to create a detailed, scene-by-scene concept for a music video based on the provided song analysis.

**Song Analysis:**
- **Title:** {title}
- **Story/Concept:** {story}
- **Genre/Style:** {genres}
- **Mood:** {moods}
- **Key Imagery/Symbols:** {imagery}

**Instructions for Video Concept Generation:**
1. **Core Principle: Grounded Storytelling.** The concept must be grounded in reality, creating a believable and emotionally impactful narrative that connects with the song's lyrics and mood.
2. **Character Grounding:** All characters featured in the video concept MUST be depicted as belonging to {culture}, with locations drawn from that world.
3. **Overall Vision:** Start with a brief, powerful paragraph summarizing the video's concept, visual style, and emotional arc.
4. **Visual Style:** Describe the overall aesthetic, including color grading, lighting, and feel.
5. **Scene-by-Scene Breakdown:** Write short, descriptive paragraphs for at least 3-4 key scenes (e.g., Verse 1, Chorus, Bridge, Outro), covering characters and action, location, and cinematography.
6. **Editing & Effects:** Suggest an editing style and any key visual effects.
7. **Language:** The entire output MUST be in English.
8. **Output:** Return ONLY the generated video concept, formatted with clear headings for each section. Do not include any other commentary.

Generate the music video concept now.",
        genres = genres.join(", "),
        moods = moods.join(", "),
        culture = audience_culture(lang),
    )
}

/// 构建"随机灵感"提示词：一句话的高概念歌曲提案。
#[must_use]
pub fn random_idea_prompt(lang: Language) -> String {
    let lang_name = translations(lang).language_name;
    format!(
        "As an acclaimed A&R executive with a golden ear for hits, pitch a single, modern, and commercially viable song concept in {lang_name}. The idea must feel fresh, culturally relevant, and tap into a genuine human emotion. Present it as a high-concept, one-sentence pitch. Return ONLY the pitch, with no extra text, labels, or quotation marks."
    )
}

/// 构建从零生成叙事蓝图的提示词。
#[must_use]
pub fn narrative_prompt(lang: Language) -> String {
    let lang_name = translations(lang).language_name;
    format!(
        "You are an elite narrative designer for a top-tier record label. Your task is to generate a complete, artistically profound, and commercially appealing narrative blueprint for a song in {lang_name}. The concept must be modern, emotionally intelligent, and contain a unique twist or perspective. Ensure all fields are filled with vivid, interconnected ideas."
    )
}

/// 构建从用户灵感扩展叙事蓝图的提示词。
#[must_use]
pub fn narrative_from_idea_prompt(lang: Language, main_idea: &str) -> String {
    let lang_name = translations(lang).language_name;
    format!(
        "As an elite narrative designer, take the following user-provided song idea and expand it into a complete, artistically profound, and commercially appealing narrative blueprint in {lang_name}. Ensure the generated blueprint is directly inspired by and consistent with the user's idea. Fill all fields with vivid, interconnected concepts.
User Idea: \"{main_idea}\""
    )
}

/// 叙事蓝图的结构化输出 schema。四个字段全部必填。
#[must_use]
pub fn narrative_schema(lang: Language) -> Value {
    let lang_name = translations(lang).language_name;
    json!({
        "type": "OBJECT",
        "properties": {
            "coreTheme": {
                "type": "STRING",
                "description": format!("The central, universal human truth the song explores in {lang_name}. Make it concise and powerful."),
            },
            "story": {
                "type": "STRING",
                "description": format!("A specific, cinematic scenario or moment in time that illustrates the theme in {lang_name}."),
            },
            "keyEmotions": {
                "type": "STRING",
                "description": format!("A sophisticated blend of primary and secondary emotions the listener should feel, in {lang_name}."),
            },
            "imagery": {
                "type": "STRING",
                "description": format!("A list of striking, symbolic visual metaphors that enhance the story and theme in {lang_name}."),
            },
        },
        "required": ["coreTheme", "story", "keyEmotions", "imagery"],
    })
}

/// 构建从歌手名推断风格建议的提示词。选项约束来自当前语言的预置列表。
#[must_use]
pub fn style_from_artist_prompt(artist_name: &str, lang: Language) -> String {
    let t = translations(lang);
    let options = &t.options;
    format!(
        "You are a world-class musicologist. Analyze the musical style of the artist \"{artist_name}\".
Based on their typical sound, provide a list of relevant genres, moods, tempos, and instruments in {lang_name}.
- For genres, select up to 3 most dominant genres from this list: {genres}.
- For moods, select up to 3 most fitting moods from this list: {moods}.
- For tempos, select ONLY ONE most representative tempo from this list: {tempos}.
- For instruments, select up to 4 relevant instruments from this list: {instruments}.
Return the result as a JSON object. Ensure all tags are in {lang_name}.",
        lang_name = t.language_name,
        genres = options.genres.join(", "),
        moods = options.moods.join(", "),
        tempos = options.tempos.join(", "),
        instruments = options.instruments.join(", "),
    )
}

/// 构建从歌曲概念推断风格建议的提示词。
#[must_use]
pub fn style_from_idea_prompt(form: &FormState, lang: Language) -> String {
    let t = translations(lang);
    let options = &t.options;
    format!(
        "You are a visionary A&R executive. Based on the following song concept, suggest the most commercially viable and artistically fitting musical style. Provide your answer in {lang_name}.
- Select up to 3 genres from this list: {genres}.
- Select up to 3 moods from this list: {moods}.
- Select ONLY ONE tempo from this list: {tempos}.
- Select up to 4 relevant instruments from this list: {instruments}.

Song Concept:
- Main Idea: {prompt}
- Core Theme: {core_theme}
- Story: {story}
- Key Emotions: {key_emotions}
- Imagery: {imagery}

Return ONLY a JSON object with the keys \"genres\", \"moods\", \"tempos\", and \"instruments\".",
        lang_name = t.language_name,
        genres = options.genres.join(", "),
        moods = options.moods.join(", "),
        tempos = options.tempos.join(", "),
        instruments = options.instruments.join(", "),
        prompt = form.prompt,
        core_theme = form.core_theme,
        story = form.story,
        key_emotions = form.key_emotions,
        imagery = form.imagery,
    )
}

/// 风格建议的结构化输出 schema。
#[must_use]
pub fn style_schema(lang: Language) -> Value {
    let lang_name = translations(lang).language_name;
    json!({
        "type": "OBJECT",
        "properties": {
            "genres": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Up to 3 most dominant genres, in {lang_name}."),
            },
            "moods": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Up to 3 most fitting moods, in {lang_name}."),
            },
            "tempos": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Exactly one most representative tempo, in {lang_name}."),
            },
            "instruments": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": format!("Up to 4 relevant instruments, in {lang_name}."),
            },
        },
        "required": ["genres", "moods", "tempos", "instruments"],
    })
}

/// 构建歌曲结构建议的提示词。可选段落限定为预置结构标记。
#[must_use]
pub fn structure_prompt(form: &FormState, lang: Language) -> String {
    let t = translations(lang);
    let combined_style = form
        .genres
        .iter()
        .chain(form.moods.iter())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "As a master songwriter, analyze the following song concept and musical style. Suggest the most effective and conventional song structure in {lang_name}.
- Choose from these available parts: {parts}.
- The structure should be logical and build emotional momentum.
- Return ONLY a JSON array of strings representing the structure, e.g., [\"[Intro]\", \"[Verse]\", \"[Chorus]\"].

Song Concept:
- Main Idea: {prompt}
- Core Theme: {core_theme}
- Musical Style: {combined_style}",
        lang_name = t.language_name,
        parts = t.options.structure_parts.join(", "),
        prompt = form.prompt,
        core_theme = form.core_theme,
    )
}

/// 歌曲结构建议的结构化输出 schema：字符串数组。
#[must_use]
pub fn structure_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "STRING",
            "description": "A song structure part, e.g., \"[Verse]\"",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_prompt_embeds_song_and_request() {
        let prompt = revision_prompt("Song Title: X\nLyrics:\nfoo", "make the chorus sadder");
        assert!(prompt.contains("Song Title: X"));
        assert!(prompt.contains("\"make the chorus sadder\""));
        assert!(prompt.contains("Preserve Metadata"));
    }

    #[test]
    fn test_image_prompt_culture_follows_language() {
        let th = image_prompt("a lonely night", &[], &[], "", Language::Th);
        assert!(th.contains("Thai-language popular music"));
        assert!(th.contains("Not specified"));
        let ja = image_prompt("a lonely night", &[], &[], "rain", Language::Ja);
        assert!(ja.contains("Japanese-language popular music"));
        assert!(ja.contains("rain"));
    }

    #[test]
    fn test_style_prompts_list_preset_options() {
        let prompt = style_from_artist_prompt("Bird Thongchai", Language::Th);
        assert!(prompt.contains("ลูกทุ่ง"));
        assert!(prompt.contains("ONLY ONE"));
    }

    #[test]
    fn test_structure_prompt_combines_genres_and_moods() {
        let form = FormState {
            prompt: "last train home".to_string(),
            genres: vec!["Pop".to_string()],
            moods: vec!["Sad".to_string()],
            ..FormState::default()
        };
        let prompt = structure_prompt(&form, Language::En);
        assert!(prompt.contains("Pop, Sad"));
        assert!(prompt.contains("[Fast Flow]"));
    }

    #[test]
    fn test_schemas_declare_required_fields() {
        let narrative = narrative_schema(Language::En);
        assert_eq!(narrative["required"].as_array().map(Vec::len), Some(4));
        let style = style_schema(Language::En);
        assert_eq!(style["required"].as_array().map(Vec::len), Some(4));
        assert_eq!(structure_schema()["type"], "ARRAY");
    }
}
