//! LocalStorage 封装模块
//!
//! 会话令牌持久化在浏览器 LocalStorage 的固定键下。

use tradepanel::storage::{TOKEN_STORAGE_KEY, TokenStore, non_empty_token};

/// 基于 LocalStorage 的令牌存储
///
/// 无状态单元结构体：每次访问都直接读写浏览器存储。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 写入失败（隐私模式、配额不足等）时返回 `false`
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

impl TokenStore for LocalStorage {
    fn get(&self) -> Option<String> {
        non_empty_token(Self::get(TOKEN_STORAGE_KEY))
    }

    fn set(&self, token: &str) -> bool {
        Self::set(TOKEN_STORAGE_KEY, token)
    }

    fn remove(&self) -> bool {
        Self::delete(TOKEN_STORAGE_KEY)
    }
}
