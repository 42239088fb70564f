//! `localStorage` как хранилище кэша CSV.
//! Кэш живёт в браузере пользователя, сервер его не видит.

use contracts::shared::csv_cache::{CacheError, KeyValueStore};

pub struct BrowserStore(web_sys::Storage);

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.0.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
        self.0
            .set_item(key, value)
            .map_err(|e| CacheError::Storage {
                key: key.to_string(),
                message: format!("{:?}", e),
            })
    }

    fn remove_item(&self, key: &str) -> bool {
        let existed = self.get_item(key).is_some();
        let _ = self.0.remove_item(key);
        existed
    }
}

/// None, если localStorage недоступен (приватный режим, запрет настроек)
pub fn browser_store() -> Option<BrowserStore> {
    web_sys::window()?
        .local_storage()
        .ok()?
        .map(BrowserStore)
}
