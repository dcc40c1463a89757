use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use voicetube_core::config::AppConfig;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> anyhow::Result<AppConfig> {
        let bytes = fs::read(&self.path)
            .with_context(|| format!("read config: {}", self.path.display()))?;
        let cfg: AppConfig = serde_json::from_slice(&bytes).context("decode config JSON")?;
        cfg.validate()
            .with_context(|| format!("invalid config: {}", self.path.display()))?;
        Ok(cfg)
    }

    /// Missing file means first run; a present but broken file is still an error.
    pub fn load_or_default(&self) -> anyhow::Result<AppConfig> {
        if !self.path.exists() {
            log::info!(
                "no config at {}, using defaults",
                self.path.display()
            );
            return Ok(AppConfig::default());
        }
        self.load()
    }

    pub fn save(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        cfg.validate().context("refusing to save invalid config")?;
        let json = serde_json::to_vec_pretty(cfg).context("encode config JSON")?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config directory: {}", parent.display()))?;
        }

        // Write beside the target, then swap it in.
        let staged = self.path.with_extension("json.tmp");
        fs::write(&staged, json)
            .with_context(|| format!("stage config: {}", staged.display()))?;
        self.swap_in(&staged)
            .with_context(|| format!("save config: {}", self.path.display()))
    }

    fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    /// Moves `staged` over the config file. The previous config is parked
    /// beside it until the move succeeds and put back if it does not.
    fn swap_in(&self, staged: &Path) -> anyhow::Result<()> {
        let previous = self.backup_path();
        let had_previous = self.path.exists();

        if had_previous {
            let _ = fs::remove_file(&previous);
            fs::rename(&self.path, &previous).with_context(|| {
                format!("park previous config at {}", previous.display())
            })?;
        }

        match fs::rename(staged, &self.path) {
            Ok(()) => {
                if had_previous {
                    let _ = fs::remove_file(&previous);
                }
                Ok(())
            }
            Err(e) => {
                if had_previous {
                    let _ = fs::rename(&previous, &self.path);
                }
                let _ = fs::remove_file(staged);
                Err(anyhow::Error::new(e))
                    .with_context(|| format!("install staged config {}", staged.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("nested").join("config.json"));

        let mut cfg = AppConfig::default();
        cfg.search.max_results = 6;
        cfg.voice.rate = 1.2;
        cfg.api_key_present = true;

        store.save(&cfg).unwrap();
        // Saving twice exercises the replace path.
        store.save(&cfg).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, cfg);
        assert!(!store.backup_path().exists());
    }

    #[test]
    fn failed_swap_keeps_previous_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("config.json"));
        let mut cfg = AppConfig::default();
        cfg.search.max_results = 7;
        store.save(&cfg).unwrap();

        // Nothing was staged, so the move fails.
        let err = store.swap_in(&dir.path().join("missing.tmp")).unwrap_err();
        assert!(format!("{err:#}").contains("install staged config"));
        assert_eq!(store.load().unwrap(), cfg);
        assert!(!store.backup_path().exists());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("config.json"));
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default().unwrap(), AppConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"search":{"max_results":0}}"#).unwrap();

        let err = ConfigStore::at_path(path).load_or_default().unwrap_err();
        assert!(format!("{err:#}").contains("max_results"));
    }

    #[test]
    fn refuses_to_save_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at_path(dir.path().join("config.json"));
        let mut cfg = AppConfig::default();
        cfg.search.timeout_ms = 0;
        assert!(store.save(&cfg).is_err());
        assert!(!store.path().exists());
    }
}
