//! 键值持久化
//!
//! `BrowserStorage` 通过 `gloo-storage` 读写 `localStorage`，值以 JSON 文本保存。
//! 缺失的键与内容损坏的键要区分开：后者需要由调用方删除。

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;

/// 键存在，但内容无法读出
#[derive(Debug, Error, PartialEq, Eq)]
#[error("entry {key} is unreadable: {reason}")]
pub struct CorruptEntry {
    pub key: String,
    pub reason: String,
}

impl CorruptEntry {
    fn new(key: &str, reason: impl ToString) -> Self {
        Self {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub trait KeyValueStore {
    /// 键不存在时返回 `Ok(None)`
    fn load(&self, key: &str) -> Result<Option<Value>, CorruptEntry>;
    /// 写入被拒绝 (配额、隐私模式) 时返回 `false`
    fn save(&self, key: &str, value: &Value) -> bool;
    fn remove(&self, key: &str);
}

/// 浏览器 `localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, CorruptEntry> {
        match LocalStorage::get::<Value>(key) {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(CorruptEntry::new(key, e)),
        }
    }

    fn save(&self, key: &str, value: &Value) -> bool {
        LocalStorage::set(key, value).is_ok()
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// 测试用内存存储，与浏览器一样保存原始文本
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: Value) -> Self {
        Self::with_raw(key, &value.to_string())
    }

    /// 直接写入文本，可以不是合法 JSON
    pub fn with_raw(key: &str, text: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), text.to_string());
        storage
    }

    /// 解析后的值；键不存在或内容损坏时为 `None`
    pub fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.borrow();
        entries.get(key).and_then(|text| serde_json::from_str(text).ok())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Value>, CorruptEntry> {
        let entries = self.entries.borrow();
        match entries.get(key) {
            Some(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|e| CorruptEntry::new(key, e)),
            None => Ok(None),
        }
    }

    fn save(&self, key: &str, value: &Value) -> bool {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

#[cfg(test)]
impl<S: KeyValueStore> KeyValueStore for std::rc::Rc<S> {
    fn load(&self, key: &str) -> Result<Option<Value>, CorruptEntry> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &Value) -> bool {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}
