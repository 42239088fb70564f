use contracts::shared::csv_cache::{clear_csv_data, get_csv_data, save_csv_data};
use contracts::usecases::u601_inventory_csv_upload::{CachedUpload, CACHE_KEY};

use crate::shared::csv_cache::browser_store;

pub fn load_upload() -> Option<CachedUpload> {
    get_csv_data(&browser_store()?, CACHE_KEY)
}

pub fn save_upload(upload: &CachedUpload) {
    let Some(store) = browser_store() else {
        log::warn!("localStorage unavailable, upload {} not cached", upload.upload_id);
        return;
    };
    if let Err(e) = save_csv_data(&store, CACHE_KEY, upload) {
        log::warn!("failed to cache upload: {}", e);
    }
}

pub fn clear_upload() {
    if let Some(store) = browser_store() {
        clear_csv_data(&store, CACHE_KEY);
    }
}
