use std::path::{Path, PathBuf};

/// Key/value file holding the persisted theme preference.
///
/// The file has one `key=value` pair per line; only `theme` is used today.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

const THEME_KEY: &str = "theme";

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        content.lines().find_map(|line| {
            let (key, value) = line.split_once('=')?;
            if key.trim() == THEME_KEY {
                let value = value.trim();
                if value.is_empty() { None } else { Some(value.to_string()) }
            } else {
                None
            }
        })
    }

    pub fn save(&self, value: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, format!("{}={}\n", THEME_KEY, value))?;
        Ok(())
    }
}
