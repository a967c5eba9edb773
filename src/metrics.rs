//! 根据已选曲风与情绪推算"怪异度"与"风格影响度"两个参数。
//!
//! 纯函数，无副作用。同一组标签（忽略顺序与大小写、按类别去重后）
//! 永远得到同一组结果，自动模式下的展示因此可复现。

use std::collections::BTreeSet;

use crate::model::song::Metrics;

/// 两个参数共同的基准值。
const BASE: i32 = 50;

/// 一个关键词档位：命中任意关键词即应用增量。
struct Tier {
    keywords: &'static [&'static str],
    delta: i32,
}

/// 怪异度档位，按优先级从高到低排列，互斥：命中即停。
const WEIRDNESS_TIERS: &[Tier] = &[
    // 极端
    Tier {
        keywords: &[
            "glitch",
            "breakcore",
            "hyperpop",
            "experimental",
            "idm",
            "avant-garde",
            "psychedelic",
            "weird",
            "whimsical",
            "death",
        ],
        delta: 35,
    },
    // 偏高
    Tier {
        keywords: &[
            "metal",
            "trap",
            "drill",
            "dubstep",
            "industrial",
            "techno",
            "cyberpunk",
            "sci-fi",
            "vocaloid",
            "opera",
        ],
        delta: 20,
    },
    // 中等
    Tier {
        keywords: &[
            "jazz",
            "fusion",
            "rap",
            "hip hop",
            "funk",
            "synthwave",
            "electronic",
            "reggae",
            "ska",
            "latin",
            "bossa",
        ],
        delta: 10,
    },
    // 安全/常规
    Tier {
        keywords: &[
            "pop",
            "ballad",
            "acoustic",
            "folk",
            "country",
            "easy listening",
            "lullaby",
            "children",
            "classical",
            "relax",
            "calm",
        ],
        delta: -15,
    },
];

/// 风格影响度档位，规则同上。
const INFLUENCE_TIERS: &[Tier] = &[
    // 必须听起来"地道"的严格流派
    Tier {
        keywords: &[
            "classical",
            "opera",
            "orchestral",
            "traditional",
            "ancient",
            "luk thung",
            "ลูกทุ่ง",
            "mor lam",
            "หมอลำ",
            "enka",
            "trot",
            "gospel",
            "choral",
            "march",
        ],
        delta: 35,
    },
    // 辨识度高的风格
    Tier {
        keywords: &[
            "metal", "blues", "jazz", "country", "techno", "trance", "house", "disco",
            "synthwave", "city pop", "k-pop", "j-pop",
        ],
        delta: 20,
    },
    Tier {
        keywords: &["rock", "pop", "r&b", "soul", "hip hop", "rap"],
        delta: 5,
    },
    // 结构松散的风格
    Tier {
        keywords: &[
            "lo-fi",
            "ambient",
            "dream",
            "shoegaze",
            "indie",
            "alternative",
            "fusion",
            "experimental",
            "chill",
        ],
        delta: -15,
    },
];

/// 情绪修正。与档位互相独立，可叠加。
const DARK_MOOD_KEYWORDS: &[&str] = &["dark", "scary", "horror", "anxious", "tense", "มืดมน"];
const BRIGHT_MOOD_KEYWORDS: &[&str] = &["happy", "joy", "romantic", "warm", "upbeat"];
const INTENSE_MOOD_KEYWORDS: &[&str] = &["focused", "intense", "epic", "cinematic"];

/// 计算自动模式下的怪异度与风格影响度。
///
/// 基准 50/50；曲风与情绪标签合并为大小写不敏感的集合后：
/// 1. 两个参数各自按固定优先级套用**第一个**命中的档位；
/// 2. 情绪修正独立叠加在档位结果之上；
/// 3. 加上由标签内容导出的确定性抖动（-2 到 +2）；
/// 4. 收束到 `[0, 100]`。
///
/// 空标签集恰好得到 `{ weirdness: 50, influence: 50 }`。
#[must_use]
pub fn compute(genres: &[String], moods: &[String]) -> Metrics {
    let tags = normalized_union(genres, moods);

    let mut weirdness = BASE + first_matching_delta(&tags, WEIRDNESS_TIERS);
    let mut influence = BASE + first_matching_delta(&tags, INFLUENCE_TIERS);

    if contains_any(&tags, DARK_MOOD_KEYWORDS) {
        weirdness += 10;
    }
    if contains_any(&tags, BRIGHT_MOOD_KEYWORDS) {
        weirdness -= 5;
    }
    if contains_any(&tags, INTENSE_MOOD_KEYWORDS) {
        influence += 10;
    }

    let hash = rolling_hash(&tags.concat());
    weirdness += hash % 3;
    influence += (hash >> 1) % 3;

    Metrics {
        weirdness: clamp_metric(weirdness),
        influence: clamp_metric(influence),
    }
}

/// 把原始分数收束到 `[0, 100]`。
///
/// 当前的档位与修正表叠加后最多到 97、最低到 28，触不到边界，
/// 但收束保证了未来调表时结果仍落在合法区间内。
fn clamp_metric(raw: i32) -> u32 {
    raw.clamp(0, 100) as u32
}

/// 小写、去空白、按类别去重后合并两类标签，结果有序。
///
/// 排序保证了等价的标签集（无论传入顺序）得到同一个抖动哈希。
fn normalized_union(genres: &[String], moods: &[String]) -> Vec<String> {
    let normalize = |tags: &[String]| -> BTreeSet<String> {
        tags.iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    };

    let mut merged = normalize(genres);
    merged.extend(normalize(moods));
    merged.into_iter().collect()
}

/// 返回第一个命中档位的增量，全部未命中时为 0。
fn first_matching_delta(tags: &[String], tiers: &[Tier]) -> i32 {
    tiers
        .iter()
        .find(|tier| contains_any(tags, tier.keywords))
        .map_or(0, |tier| tier.delta)
}

fn contains_any(tags: &[String], keywords: &[&str]) -> bool {
    tags.iter()
        .any(|tag| keywords.iter().any(|keyword| tag.contains(keyword)))
}

/// 对标签串做 32 位滚动哈希。
///
/// 空串哈希为 0，使空标签集的抖动恰好为 0。
fn rolling_hash(text: &str) -> i32 {
    let mut hash: i32 = 0;
    for ch in text.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(ch as i32);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn test_empty_input_is_exactly_base() {
        let metrics = compute(&[], &[]);
        assert_eq!(metrics.weirdness, 50);
        assert_eq!(metrics.influence, 50);
    }

    #[test]
    fn test_deterministic_and_order_independent() {
        let a = compute(&strings(&["Pop", "Rock"]), &strings(&["Dark"]));
        let b = compute(&strings(&["rock", "POP", "pop"]), &strings(&["dark"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_death_metal_hits_only_extreme_weirdness_tier() {
        let metrics = compute(&strings(&["Death Metal"]), &[]);
        // 85 ± 2。若偏高档位（metal, +20）被叠加，结果会落到 100 的收束边界。
        assert!((83..=87).contains(&metrics.weirdness), "{metrics:?}");
        // 影响度命中偏高档位（metal, +20）。
        assert!((68..=72).contains(&metrics.influence), "{metrics:?}");
    }

    #[test]
    fn test_mood_modifier_stacks_on_tier() {
        let metrics = compute(&strings(&["Pop"]), &strings(&["Dark"]));
        // 怪异度：低档 -15 与黑暗情绪 +10 独立叠加，45 ± 2。
        assert!((43..=47).contains(&metrics.weirdness), "{metrics:?}");
    }

    #[test]
    fn test_results_always_in_range() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["Glitch", "Experimental", "Hyperpop"], &["Dark", "Tense"]),
            (&["Classical", "Opera"], &["Epic", "Cinematic"]),
            (&["Lo-fi", "Ambient"], &["Happy", "Relaxing"]),
            (&["ลูกทุ่ง"], &[]),
        ];
        for (genres, moods) in cases {
            let metrics = compute(&strings(genres), &strings(moods));
            assert!(metrics.weirdness <= 100);
            assert!(metrics.influence <= 100);
        }
    }

    #[test]
    fn test_clamp_metric_bounds() {
        // 现有关键词表的叠加触不到边界，直接测收束本身。
        assert_eq!(clamp_metric(150), 100);
        assert_eq!(clamp_metric(-20), 0);
        assert_eq!(clamp_metric(97), 97);
        assert_eq!(clamp_metric(0), 0);
        assert_eq!(clamp_metric(100), 100);
    }

    #[test]
    fn test_jitter_stays_within_two_points() {
        let metrics = compute(&strings(&["Jazz"]), &[]);
        // 中等档 +10，抖动不超过 ±2。
        assert!((58..=62).contains(&metrics.weirdness), "{metrics:?}");
    }
}
