// ============================================================================
// STORAGE - Persistencia clave/valor (localStorage o memoria)
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;

use gloo_storage::{LocalStorage, Storage};
use web_sys::window;

/// Almacén clave/valor usado para el token de sesión
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove(&self, key: &str);
}

/// localStorage del navegador (vía gloo-storage)
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// gloo-storage hace panic si localStorage no existe, hay que comprobarlo antes
    pub fn is_available() -> bool {
        window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .is_some()
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(key).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        LocalStorage::set(key, value)
            .map_err(|e| format!("Error guardando en localStorage: {}", e))
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(key);
    }
}

/// Almacén en memoria: tests y navegadores sin localStorage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("auth_token"), None);

        storage.set("auth_token", "abc").unwrap();
        assert_eq!(storage.get("auth_token").as_deref(), Some("abc"));

        storage.remove("auth_token");
        assert_eq!(storage.get("auth_token"), None);
        // Borrar dos veces no es un error
        storage.remove("auth_token");
    }
}
