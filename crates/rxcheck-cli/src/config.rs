// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use rxcheck_app::DEFAULT_SCROLL_THRESHOLD;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const APP_NAME: &str = "rxcheck";

const DEFAULT_INVOICE_COUNT: usize = 2;
const DEFAULT_ITEMS_PER_INVOICE: usize = 3;
const DEFAULT_SEED: u64 = 20_260_106;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub demo: Demo,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            demo: Demo::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub show_image_viewer: Option<bool>,
    pub scroll_threshold: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Demo {
    pub seed: Option<u64>,
    pub invoice_count: Option<usize>,
    pub items_per_invoice: Option<usize>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("RXCHECK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set RXCHECK_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and place values under [ui] and [demo]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(threshold) = self.ui.scroll_threshold
            && threshold <= 0
        {
            bail!(
                "ui.scroll_threshold in {} must be positive, got {}",
                path.display(),
                threshold
            );
        }

        if let Some(count) = self.demo.invoice_count
            && count == 0
        {
            bail!(
                "demo.invoice_count in {} must be at least 1",
                path.display()
            );
        }

        if let Some(count) = self.demo.items_per_invoice
            && count == 0
        {
            bail!(
                "demo.items_per_invoice in {} must be at least 1",
                path.display()
            );
        }

        Ok(())
    }

    pub fn show_image_viewer(&self) -> bool {
        self.ui.show_image_viewer.unwrap_or(true)
    }

    pub fn scroll_threshold(&self) -> i64 {
        self.ui.scroll_threshold.unwrap_or(DEFAULT_SCROLL_THRESHOLD)
    }

    pub fn seed(&self) -> u64 {
        self.demo.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn invoice_count(&self) -> usize {
        self.demo.invoice_count.unwrap_or(DEFAULT_INVOICE_COUNT)
    }

    pub fn items_per_invoice(&self) -> usize {
        self.demo
            .items_per_invoice
            .unwrap_or(DEFAULT_ITEMS_PER_INVOICE)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# rxcheck config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\nshow_image_viewer = true\n# Proximity threshold (layout units) for the active-invoice switch\nscroll_threshold = {}\n\n[demo]\nseed = {}\ninvoice_count = {}\nitems_per_invoice = {}\n",
            path.display(),
            DEFAULT_SCROLL_THRESHOLD,
            DEFAULT_SEED,
            DEFAULT_INVOICE_COUNT,
            DEFAULT_ITEMS_PER_INVOICE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use rxcheck_app::DEFAULT_SCROLL_THRESHOLD;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert!(config.show_image_viewer());
        assert_eq!(config.scroll_threshold(), DEFAULT_SCROLL_THRESHOLD);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nshow_image_viewer = false\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ui] and [demo]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nshow_image_viewer = false\nscroll_threshold = 320\n[demo]\nseed = 7\ninvoice_count = 4\nitems_per_invoice = 2\n",
        )?;
        let config = Config::load(&path)?;
        assert!(!config.show_image_viewer());
        assert_eq!(config.scroll_threshold(), 320);
        assert_eq!(config.seed(), 7);
        assert_eq!(config.invoice_count(), 4);
        assert_eq!(config.items_per_invoice(), 2);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 9\n")?;
        let error = Config::load(&path).expect_err("v9 config should fail");
        assert!(error.to_string().contains("unsupported config version 9"));
        Ok(())
    }

    #[test]
    fn non_positive_threshold_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nscroll_threshold = 0\n")?;
        let error = Config::load(&path).expect_err("zero threshold should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn empty_demo_counts_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[demo]\ninvoice_count = 0\n")?;
        let error = Config::load(&path).expect_err("zero invoices should fail");
        assert!(error.to_string().contains("at least 1"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("RXCHECK_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("RXCHECK_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("RXCHECK_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_includes_required_sections() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[demo]"));
        Ok(())
    }
}
