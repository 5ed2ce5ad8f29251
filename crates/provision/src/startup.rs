//! Startup provisioning
//!
//! Runs once before the plugin takes commands: checks the theme flags,
//! refreshes the copywriting corpus and makes sure every data file the
//! fortune handlers read exists.

use fortune_core::config::{FortuneConfig, RemoteSources, ThemeFlags};
use fortune_core::{FortuneError, Result};
use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::download::Downloader;
use crate::json_io;
use crate::layout::ResourceLayout;
use crate::migrate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopywritingStatus {
    /// Downloaded and written; carries the upstream `version` if present.
    Refreshed { version: Option<String> },
    /// Download failed, the local copy was kept.
    KeptLocal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    Existing,
    Created,
    Migrated,
    Downloaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub enabled_themes: Vec<&'static str>,
    pub copywriting: CopywritingStatus,
    pub fortune_data: FileSource,
    pub group_rules: FileSource,
    pub specific_rules: FileSource,
}

pub struct Provisioner<D> {
    layout: ResourceLayout,
    flags: ThemeFlags,
    remote: RemoteSources,
    downloader: D,
}

impl<D: Downloader> Provisioner<D> {
    pub fn new(config: &FortuneConfig, downloader: D) -> Self {
        Self {
            layout: ResourceLayout::new(&config.settings.fortune_path),
            flags: config.flags.clone(),
            remote: config.remote.clone(),
            downloader,
        }
    }

    pub fn layout(&self) -> &ResourceLayout {
        &self.layout
    }

    pub async fn run(&self) -> Result<ProvisionReport> {
        fs::create_dir_all(&self.layout.root)
            .await
            .map_err(|e| FortuneError::io(&self.layout.root, e))?;

        self.flags.ensure_any_enabled()?;
        json_io::write_pretty(&self.layout.flags, &self.flags).await?;

        let copywriting = self.refresh_copywriting().await?;
        let fortune_data = self.ensure_fortune_data().await?;
        let group_rules = self.ensure_group_rules().await?;
        let specific_rules = self.ensure_specific_rules().await?;

        Ok(ProvisionReport {
            enabled_themes: self.flags.enabled_themes(),
            copywriting,
            fortune_data,
            group_rules,
            specific_rules,
        })
    }

    async fn refresh_copywriting(&self) -> Result<CopywritingStatus> {
        let path = &self.layout.copywriting;

        let Some(docs) = self.downloader.fetch_json(&self.remote.copywriting_url).await? else {
            if !path.exists() {
                return Err(FortuneError::ResourceMissing { path: path.clone() });
            }
            return Ok(CopywritingStatus::KeptLocal);
        };

        let version = docs.get("version").map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        json_io::write_pretty(path, &docs).await?;

        info!(
            "Got the latest copywriting docs from repo, version: {}",
            version.as_deref().unwrap_or("None")
        );
        Ok(CopywritingStatus::Refreshed { version })
    }

    async fn ensure_fortune_data(&self) -> Result<FileSource> {
        if self.layout.fortune_data.exists() {
            return Ok(FileSource::Existing);
        }

        warn!("fortune_data.json is missing, initialized one...");
        json_io::write_empty_object(&self.layout.fortune_data).await?;
        Ok(FileSource::Created)
    }

    async fn ensure_group_rules(&self) -> Result<FileSource> {
        let dest = &self.layout.group_rules;
        if dest.exists() {
            return Ok(FileSource::Existing);
        }

        if self.layout.legacy_setting.exists()
            && migrate::migrate_group_rules(&self.layout.legacy_setting, dest).await?
        {
            info!("Group themes in legacy fortune_setting.json migrated to group_rules.json");
            return Ok(FileSource::Migrated);
        }

        json_io::write_empty_object(dest).await?;
        info!("No group themes in legacy fortune_setting.json, initialized group_rules.json");
        Ok(FileSource::Created)
    }

    async fn ensure_specific_rules(&self) -> Result<FileSource> {
        let dest = &self.layout.specific_rules;
        if dest.exists() {
            return Ok(FileSource::Existing);
        }

        if self.layout.legacy_setting.exists()
            && migrate::migrate_specific_rules(&self.layout.legacy_setting, dest).await?
        {
            info!("Specific rules in legacy fortune_setting.json migrated to specific_rules.json");
            return Ok(FileSource::Migrated);
        }

        match self.downloader.fetch_json(&self.remote.specific_rules_url).await? {
            Some(rules) => {
                json_io::write_pretty(dest, &rules).await?;
                info!("Downloaded specific_rules.json from repo");
                Ok(FileSource::Downloaded)
            }
            None => {
                json_io::write_empty_object(dest).await?;
                info!("No specific rules in legacy fortune_setting.json, initialized specific_rules.json");
                Ok(FileSource::Created)
            }
        }
    }
}
