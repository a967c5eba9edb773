//! 全语言共享的提示词文本常量。
//!
//! 规则正文统一用英文写成（模型对英文指令的遵循最稳定），
//! 语言相关的部分（字段标签、歌词语言规则、默认角色名）由
//! [`crate::locale`] 的文本表在组装时注入。

/// 主提示词骨架。所有 `{...}` 占位符都会在组装时被替换；
/// 没有对应内容的条件块替换为空串。
pub const MASTER_TEMPLATE: &str = "{final_goal}

{label_song_title}: {placeholder_song_title}
{label_style}: {style}
{label_vocal_gender}: {vocal_gender}
{weirdness_line}
{style_influence_line}

{label_lyrics}:
{structure_body}

{golden_rules_title}
1. {rule_emotional_core}
2. {rule_narrative_flow}
3. {rule_lyrical_craft}
4. {rule_authentic_voice}
5. {rule_language}
6. {rule_rhythm}
7. {rule_repetition}
8. {rule_description_language}

{rule_technical_lyricism_title}
{rule_technical_lyricism_content}{instrument_lyric_constraint}{exclusion_instruction}{rap_instruction}{narrative_genre_instruction}{auto_param_instruction}

{analysis_guide_title}
{analysis_guide_content}{instrument_instruction}{duet_instruction}{inspiration_instruction}{structure_rule}{fast_flow_instruction}

{command_instruction}

{user_request_header}
{user_prompt}";

pub const FINAL_GOAL: &str = "You are a world-class songwriter and producer. Write one complete, emotionally resonant and commercially viable song in EXACTLY the metadata-plus-lyrics format below, ready to be pasted into an AI music generator.";

pub const PLACEHOLDER_SONG_TITLE: &str = "(create a short, memorable title here)";

pub const GOLDEN_RULES_TITLE: &str = "# GOLDEN RULES";
pub const RULE_EMOTIONAL_CORE: &str = "Emotional core: every section must serve one clear central feeling; cut anything that dilutes it.";
pub const RULE_NARRATIVE_FLOW: &str = "Narrative flow: verses advance the story, the chorus distills its meaning, the bridge shifts the perspective.";
pub const RULE_LYRICAL_CRAFT: &str = "Lyrical craft: concrete images over abstractions; show the scene, do not explain the emotion.";
pub const RULE_AUTHENTIC_VOICE: &str = "Authentic voice: write the way the target audience actually speaks; no stiff, literary phrasing.";
pub const RULE_RHYTHM: &str = "Rhythm: line lengths and stress patterns must be singable at the requested tempo.";
pub const RULE_REPETITION: &str = "Repetition: repeat the hook enough to stick, never enough to bore; vary the final chorus.";
pub const RULE_DESCRIPTION_LANGUAGE: &str = "Metadata language: the Style line and all section tags stay in English regardless of the lyric language.";

pub const RULE_TECHNICAL_LYRICISM_TITLE: &str = "# TECHNICAL LYRICISM";
pub const RULE_TECHNICAL_LYRICISM_CONTENT: &str = "Use internal rhyme and assonance where the genre calls for it. Keep syllable counts consistent between matching sections so the melody can repeat.";

pub const RAP_INSTRUCTION_TITLE: &str = "\n\n# RAP GUIDELINES\n";
pub const RAP_INSTRUCTION_CONTENT: &str = "This is a rap/hip-hop song: build multisyllabic rhyme schemes, keep a consistent flow per verse, switch the flow between verses, and write punchlines that land on the beat.";

pub const NARRATIVE_GENRE_TITLE: &str = "\n\n# TRADITIONAL GENRE GUIDELINES\n";
pub const NARRATIVE_GENRE_CONTENT: &str = "This style (Luk Thung / Mor Lam) is narrative country music: tell a grounded story of everyday life, use vivid rural imagery, and leave room for the characteristic vocal ornamentation on long vowels.";

pub const AUTO_RULES_TITLE: &str = "\n\n# AUTO PARAMETER RULES\n";
pub const AUTO_RULES_CONTENT: &str = "Weirdness and Style Influence are set to auto: choose values implicitly by writing the song so that it matches the style tags, and do NOT print numeric values for these two lines.";

/// 自动模式下两条数值参数行使用的占位值。
pub const AUTO_VALUE_PLACEHOLDER: &str = "Auto (infer from style)";

pub const INSTRUMENT_FOCUS_TITLE: &str = "\n\n# INSTRUMENT FOCUS\n";
pub const INSTRUMENT_FOCUS_CONTENT: &str = "Feature these instruments prominently in the arrangement: {instrument_list}. Mention them in the Style line and give at least one of them a dedicated instrumental moment.";
pub const INSTRUMENT_LYRIC_CONSTRAINT: &str = "\nDo not name the featured instruments ({instrument_list}) inside the sung lyrics themselves.";

pub const EXCLUSION_RULE_TITLE: &str = "\n\n# EXCLUDED WORDS\n";
pub const EXCLUSION_RULE_CONTENT: &str = "The following words and phrases must NOT appear anywhere in the lyrics: {excluded_words}.";

pub const DUET_INSTRUCTIONS_TITLE: &str = "\n\n# DUET FORMAT\n";
pub const DUET_INSTRUCTIONS_CONTENT: &str = "This is a male/female duet. Mark each sung line with its voice: ({male_role}): for the male part, ({female_role}): for the female part, and (Both): when they sing together. Give the two voices distinct perspectives that converge in the final chorus.";

pub const INSPIRATION_TITLE: &str = "# INSPIRATION";
pub const INSPIRATION_SONG: &str = "Use the song \"{song}\" as a structural and emotional reference without copying its lyrics.";
pub const INSPIRATION_ARTIST: &str = "Echo the signature phrasing and delivery of {artist} without naming them.";

pub const STRUCTURE_RULE_TITLE: &str = "\n\n# STRUCTURE RULE\n";
pub const STRUCTURE_RULE_CONTENT: &str = "Follow this exact section order, keeping every tag as written: {structure}.";

pub const FAST_FLOW_INSTRUCTION: &str = "\n\n# FAST FLOW\nThe structure contains a fast-flow section: write it with short syllables and dense internal rhymes so it can be delivered at double-time.";

pub const ANALYSIS_GUIDE_TITLE: &str = "# BEFORE YOU WRITE";
pub const ANALYSIS_GUIDE_CONTENT: &str = "Silently analyze the request first: who is the narrator, what single moment is the song about, and which image can carry the chorus. Then write the final song only; do not output the analysis.";

pub const COMMAND_INSTRUCTION: &str = "# COMMAND\nNow write the complete song. Output ONLY the metadata lines and the lyrics in the format above, with no commentary, translations or phonetic guides.";

pub const USER_REQUEST_HEADER: &str = "# USER REQUEST";

/// 各段落内容占位文本，按段落类型选择。
pub const PLACEHOLDER_INTRO: &str = "(atmospheric instrumental intro, describe the soundscape briefly)";
pub const PLACEHOLDER_SOLO: &str = "(instrumental solo, name the lead instrument)";
pub const PLACEHOLDER_OUTRO: &str = "(instrumental outro, describe how the song fades)";
pub const PLACEHOLDER_INSTRUMENTAL: &str = "(instrumental passage, describe it briefly)";
pub const PLACEHOLDER_LYRICS: &str = "(write the lyrics for this section here)";
