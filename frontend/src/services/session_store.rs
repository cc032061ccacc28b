use collections_client::{CredentialStore, StoreError, StoredSession};
use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};

/// Keeps the session in `localStorage` so a reload stays signed in.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl CredentialStore for LocalStorageStore {
    fn load(&self) -> Result<Option<StoredSession>, StoreError> {
        match LocalStorage::get::<StoredSession>(&self.key) {
            Ok(session) => Ok(Some(session)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(StorageError::SerdeError(e)) => Err(StoreError::Corrupt(e.to_string())),
            Err(e) => Err(StoreError::Unavailable(e.to_string())),
        }
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        LocalStorage::set(&self.key, session).map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        LocalStorage::delete(&self.key);
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_round_trip_through_local_storage() {
        let store = LocalStorageStore::new("collections.test.session");
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);

        let session = StoredSession {
            access: "access".into(),
            refresh: Some("refresh".into()),
            user: None,
        };
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[wasm_bindgen_test]
    fn test_garbage_is_reported_as_corrupt() {
        let store = LocalStorageStore::new("collections.test.garbage");
        LocalStorage::set("collections.test.garbage", "not a session").unwrap();
        assert!(matches!(store.load(), Err(StoreError::Corrupt(_))));
        store.clear().unwrap();
    }
}
