//! Client-side mirror of key/value settings with the same optimistic edit pattern as
//! [`crate::app_store`].

use std::collections::BTreeMap;

use platform_host::{ConfigMap, WALLPAPER_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigEditId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigStore {
    configs: ConfigMap,
    snapshots: BTreeMap<ConfigEditId, ConfigMap>,
    next_edit_id: u64,
}

impl ConfigStore {
    pub fn configs(&self) -> &ConfigMap {
        &self.configs
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.configs.get(key).map(String::as_str)
    }

    /// Wallpaper URL, if one is configured and non-empty.
    pub fn wallpaper(&self) -> Option<&str> {
        self.get(WALLPAPER_KEY).filter(|url| !url.trim().is_empty())
    }

    pub fn replace_all(&mut self, configs: ConfigMap) {
        self.configs = configs;
    }

    /// Merges `key = value` locally and snapshots the previous map.
    pub fn begin_update(&mut self, key: &str, value: &str) -> ConfigEditId {
        let id = ConfigEditId(self.next_edit_id);
        self.next_edit_id += 1;
        self.snapshots.insert(id, self.configs.clone());
        self.configs.insert(key.to_string(), value.to_string());
        id
    }

    pub fn commit(&mut self, id: ConfigEditId) {
        self.snapshots.remove(&id);
    }

    pub fn rollback(&mut self, id: ConfigEditId) -> bool {
        match self.snapshots.remove(&id) {
            Some(snapshot) => {
                self.configs = snapshot;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn update_then_rollback_restores_previous_value() {
        let mut store = ConfigStore::default();
        store.replace_all(ConfigMap::from([(
            WALLPAPER_KEY.to_string(),
            "https://img.test/old.jpg".to_string(),
        )]));

        let edit = store.begin_update(WALLPAPER_KEY, "https://img.test/new.jpg");
        assert_eq!(store.wallpaper(), Some("https://img.test/new.jpg"));

        assert!(store.rollback(edit));
        assert_eq!(store.wallpaper(), Some("https://img.test/old.jpg"));
    }

    #[test]
    fn blank_wallpaper_counts_as_unset() {
        let mut store = ConfigStore::default();
        let edit = store.begin_update(WALLPAPER_KEY, "  ");
        store.commit(edit);
        assert_eq!(store.wallpaper(), None);
        assert_eq!(store.get(WALLPAPER_KEY), Some("  "));
    }
}
