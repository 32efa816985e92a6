use super::*;

#[test]
fn memory_storage_set_get_remove() {
    let storage = MemoryStorage::new();
    assert!(storage.is_empty());

    storage.set(ACCESS_TOKEN_KEY, "A");
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("A"));
    assert_eq!(storage.len(), 1);

    storage.set(ACCESS_TOKEN_KEY, "B");
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("B"));

    storage.remove(ACCESS_TOKEN_KEY);
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_remove_missing_key_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove(REFRESH_TOKEN_KEY);
    assert!(storage.is_empty());
}

#[test]
fn memory_storage_with_items_seeds_values() {
    let storage = MemoryStorage::with_items([(ACCESS_TOKEN_KEY, "A"), (REFRESH_TOKEN_KEY, "R")]);
    assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("A"));
    assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("R"));
}

#[test]
fn storage_keys_match_persisted_names() {
    assert_eq!(ACCESS_TOKEN_KEY, "accessToken");
    assert_eq!(REFRESH_TOKEN_KEY, "refreshToken");
}

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_is_noop_outside_browser() {
    let storage = LocalStorage;
    storage.set(ACCESS_TOKEN_KEY, "A");
    assert_eq!(storage.get(ACCESS_TOKEN_KEY), None);
    storage.remove(ACCESS_TOKEN_KEY);
}
