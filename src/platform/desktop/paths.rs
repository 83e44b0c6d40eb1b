use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "datalens", "datalens")
        .ok_or_else(|| anyhow!("unable to resolve application directories"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::tests::unique_test_dir;

    #[test]
    fn default_config_path_uses_datalens_directory() {
        let config_path = default_config_path().expect("config path should resolve");

        assert_eq!(
            config_path.file_name().and_then(|name| name.to_str()),
            Some("config.toml")
        );
        assert!(
            config_path.to_string_lossy().contains("datalens"),
            "config path should live under the datalens directory"
        );
    }

    #[test]
    fn ensure_webview_data_dir_creates_webview2_subdir() {
        let temp_dir = unique_test_dir("webview-data-dir");
        fs::create_dir_all(&temp_dir).expect("should create temp dir");

        let webview_dir =
            ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

        assert_eq!(webview_dir, temp_dir.join("webview2"));
        assert!(webview_dir.is_dir(), "webview2 directory should exist");

        fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
    }
}
