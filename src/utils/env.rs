//! Service URL lookup: process env → `.env` in the working directory.

use log::debug;
use std::path::Path;

use crate::utils::config::PackagePaths;

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Read the recognition service URL from `COALESCER_FACEBOX_URL`, loading `dir/.env` if the
/// variable is not already set.
pub fn facebox_url_from_env(dir: &Path) -> Option<String> {
    let key = PackagePaths::get().env_facebox_url();
    if let Some(url) = non_empty_var(key) {
        debug!("{} found in environment", key);
        return Some(url);
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Some(url) = non_empty_var(key) {
            debug!("{} found in {}", key, env_path.display());
            return Some(url);
        }
    }
    None
}
