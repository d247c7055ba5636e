//! Initial data for an empty repository.

use platform_host::{AppIcon, LOCK_PASSWORD_KEY, WALLPAPER_KEY};
use thiserror::Error;

use crate::{
    auth::{hash_password, BcryptError},
    store::{NewApp, Repository, StoreError},
};

pub const DEFAULT_SEED_PASSWORD: &str = "1234";
pub const DEFAULT_WALLPAPER: &str = "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b";

const DEFAULT_APPS: [(&str, &str, &str); 3] = [
    ("Google", "https://www.google.com/search?igu=1", "search"),
    ("VS Code", "https://vscode.dev", "monitor"),
    ("GitHub", "https://github.com", "github"),
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to hash lock password: {0}")]
    Hash(#[from] BcryptError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub apps_created: usize,
}

/// Inserts the default apps when none exist, then (re)writes the lock password hash and the
/// default wallpaper.
pub fn seed(repo: &Repository, password: &str) -> Result<SeedReport, SeedError> {
    let hash = hash_password(password)?;
    let mut apps_created = 0;
    if repo.list_apps()?.is_empty() {
        for (row, (name, launch_url, icon)) in (1..).zip(DEFAULT_APPS) {
            repo.create_app(NewApp {
                name: name.to_string(),
                launch_url: launch_url.to_string(),
                icon: AppIcon::parse(icon),
                grid_row: row,
                grid_col: 1,
            })?;
            apps_created += 1;
        }
    }
    repo.upsert_config(LOCK_PASSWORD_KEY, &hash)?;
    repo.upsert_config(WALLPAPER_KEY, DEFAULT_WALLPAPER)?;
    Ok(SeedReport { apps_created })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::auth::verify_password;

    #[test]
    fn seeding_twice_keeps_one_set_of_apps() {
        let repo = Repository::in_memory();

        assert_eq!(seed(&repo, "1234").expect("seed").apps_created, 3);
        assert_eq!(seed(&repo, "5678").expect("reseed").apps_created, 0);

        let apps = repo.list_apps().expect("list");
        assert_eq!(
            apps.iter()
                .map(|a| (a.name.as_str(), a.grid_row, a.grid_col))
                .collect::<Vec<_>>(),
            vec![("Google", 1, 1), ("VS Code", 2, 1), ("GitHub", 3, 1)]
        );

        let stored = repo
            .get_config(LOCK_PASSWORD_KEY)
            .expect("get")
            .expect("password stored");
        assert!(verify_password("5678", &stored));
        assert!(!verify_password("1234", &stored));
    }
}
