//! Кэш разобранного CSV: JSON под строковым ключом в локальном хранилище.
//!
//! Хранилище абстрагировано [`KeyValueStore`]: в браузере это `localStorage`,
//! в тестах обычная map. Без вытеснения и лимитов, последняя запись побеждает.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Строковое key-value хранилище
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError>;
    /// true, если запись была
    fn remove_item(&self, key: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("failed to serialize cache entry '{key}': {message}")]
    Serialize { key: String, message: String },

    #[error("storage rejected cache entry '{key}': {message}")]
    Storage { key: String, message: String },
}

pub fn save_csv_data<S, T>(store: &S, key: &str, data: &T) -> Result<(), CacheError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(data).map_err(|e| CacheError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.set_item(key, &json)
}

/// None, если записи нет. Испорченная запись удаляется и тоже даёт None.
pub fn get_csv_data<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let json = store.get_item(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(_) => {
            store.remove_item(key);
            None
        }
    }
}

pub fn clear_csv_data<S>(store: &S, key: &str) -> bool
where
    S: KeyValueStore + ?Sized,
{
    store.remove_item(key)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    pub(crate) struct MemoryStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl MemoryStore {
        pub(crate) fn raw(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get_item(&self, key: &str) -> Option<String> {
            self.items.borrow().get(key).cloned()
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), CacheError> {
            self.items
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove_item(&self, key: &str) -> bool {
            self.items.borrow_mut().remove(key).is_some()
        }
    }

    /// Как localStorage при переполнении квоты
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get_item(&self, _key: &str) -> Option<String> {
            None
        }

        fn set_item(&self, key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::Storage {
                key: key.to_string(),
                message: "QuotaExceededError".to_string(),
            })
        }

        fn remove_item(&self, _key: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_save_get_clear() {
        let store = MemoryStore::default();
        assert_eq!(get_csv_data::<_, Vec<i32>>(&store, "k"), None);

        save_csv_data(&store, "k", &vec![1, 2, 3]).unwrap();
        assert_eq!(get_csv_data::<_, Vec<i32>>(&store, "k"), Some(vec![1, 2, 3]));

        assert!(clear_csv_data(&store, "k"));
        assert!(!clear_csv_data(&store, "k"));
        assert_eq!(get_csv_data::<_, Vec<i32>>(&store, "k"), None);
    }

    #[test]
    fn test_last_write_wins() {
        let store = MemoryStore::default();
        save_csv_data(&store, "k", &vec![1]).unwrap();
        save_csv_data(&store, "k", &vec![2, 3]).unwrap();
        assert_eq!(get_csv_data::<_, Vec<i32>>(&store, "k"), Some(vec![2, 3]));
    }

    #[test]
    fn test_corrupt_entry_is_discarded() {
        let store = MemoryStore::default();
        store.set_item("k", "{not json").unwrap();

        assert_eq!(get_csv_data::<_, Vec<i32>>(&store, "k"), None);
        assert_eq!(store.raw("k"), None);
    }

    #[test]
    fn test_storage_error_is_returned() {
        let err = save_csv_data(&FullStore, "k", &vec![1]).unwrap_err();
        assert!(matches!(err, CacheError::Storage { ref key, .. } if key == "k"));
    }
}
