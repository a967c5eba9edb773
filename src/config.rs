//! 负责处理应用的持久化状态：生成历史、表单预设与 API Key 池。

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::Result,
    model::song::{HistoryItem, Preset},
};

/// 历史记录的最大条数，超出时丢弃最旧的条目。
pub const MAX_HISTORY_ITEMS: usize = 30;

const HISTORY_FILE: &str = "history.json";
const PRESETS_FILE: &str = "presets.json";
const API_KEYS_FILE: &str = "api_keys.json";

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "history.json"。
fn get_config_file_path(filename: &str) -> std::result::Result<PathBuf, std::io::Error> {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push("song-composer");
        fs::create_dir_all(&config_dir)?;
        config_dir.push(filename);
        Ok(config_dir)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "无法找到用户配置目录",
        ))
    }
}

/// 从文件加载 JSON 序列化的值，文件不存在时返回默认值。
fn load_or_default<T: Default + for<'de> Deserialize<'de>>(filename: &str) -> Result<T> {
    let path = get_config_file_path(filename)?;
    match fs::read_to_string(&path) {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// 把值序列化为 JSON 并保存到配置目录。
fn save<T: Serialize>(filename: &str, value: &T) -> Result<()> {
    let path = get_config_file_path(filename)?;
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

/// 从文件加载生成历史，最新的在最前。
///
/// # Errors
///
/// 文件损坏或不可读时返回错误；文件不存在视为空历史。
pub fn load_history() -> Result<Vec<HistoryItem>> {
    load_or_default(HISTORY_FILE)
}

/// 保存生成历史。
///
/// # Errors
///
/// 序列化或写文件失败时返回错误。
pub fn save_history(history: &[HistoryItem]) -> Result<()> {
    save(HISTORY_FILE, &history)?;
    info!(count = history.len(), "生成历史已保存");
    Ok(())
}

/// 把一条新记录插入历史头部并裁剪到 [`MAX_HISTORY_ITEMS`] 条。
pub fn push_history(history: &mut Vec<HistoryItem>, item: HistoryItem) {
    history.insert(0, item);
    history.truncate(MAX_HISTORY_ITEMS);
}

/// 从文件加载表单预设。
///
/// # Errors
///
/// 文件损坏或不可读时返回错误；文件不存在视为无预设。
pub fn load_presets() -> Result<Vec<Preset>> {
    load_or_default(PRESETS_FILE)
}

/// 保存表单预设。
///
/// # Errors
///
/// 序列化或写文件失败时返回错误。
pub fn save_presets(presets: &[Preset]) -> Result<()> {
    save(PRESETS_FILE, &presets)?;
    info!(count = presets.len(), "表单预设已保存");
    Ok(())
}

/// 可轮换的 API Key 池。
///
/// 同一时刻只有一个活动 Key；被判定无效的 Key 应当从池中移除，
/// 由下一个 Key 顶替。
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiKeyPool {
    keys: Vec<String>,
    active: Option<String>,
}

impl ApiKeyPool {
    /// 当前的活动 Key。
    #[must_use]
    pub fn active_key(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// 池中的全部 Key。
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// 加入一个 Key。重复的 Key 不会加入第二次；
    /// 池原本为空时新 Key 自动成为活动 Key。
    pub fn add_key(&mut self, key: &str) {
        let key = key.trim();
        if key.is_empty() || self.keys.iter().any(|k| k == key) {
            return;
        }
        self.keys.push(key.to_string());
        if self.active.is_none() {
            self.active = Some(key.to_string());
        }
    }

    /// 把指定 Key 设为活动 Key。Key 不在池中时不做任何事。
    pub fn set_active(&mut self, key: &str) {
        if self.keys.iter().any(|k| k == key) {
            self.active = Some(key.to_string());
        }
    }

    /// 从池中移除一个 Key（通常因为它被判定无效）。
    ///
    /// 被移除的恰好是活动 Key 时，池中的第一个剩余 Key 顶替。
    pub fn remove_key(&mut self, key: &str) {
        self.keys.retain(|k| k != key);
        if self.active.as_deref() == Some(key) {
            self.active = self.keys.first().cloned();
        }
    }
}

/// 从文件加载 API Key 池。
///
/// # Errors
///
/// 文件损坏或不可读时返回错误；文件不存在视为空池。
pub fn load_key_pool() -> Result<ApiKeyPool> {
    load_or_default(API_KEYS_FILE)
}

/// 保存 API Key 池。
///
/// # Errors
///
/// 序列化或写文件失败时返回错误。
pub fn save_key_pool(pool: &ApiKeyPool) -> Result<()> {
    save(API_KEYS_FILE, pool)?;
    info!(count = pool.keys.len(), "API Key 池已保存");
    Ok(())
}
