use std::collections::BTreeMap;
use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::warn;

use crate::error::FortuneError;
use crate::{path_utils, themes};

pub const DEFAULT_COPYWRITING_URL: &str = "https://raw.fastgit.org/MinatoAquaCrews/nonebot_plugin_fortune/beta/nonebot_plugin_fortune/resource/fortune/copywriting.json";
pub const DEFAULT_SPECIFIC_RULES_URL: &str = "https://raw.fastgit.org/MinatoAquaCrews/nonebot_plugin_fortune/beta/nonebot_plugin_fortune/resource/specific_rules.json";

#[derive(Debug, Deserialize, Clone)]
pub struct PluginSettings {
    /// Resource root; every provisioned file lives under it.
    pub fortune_path: PathBuf,
}

/// Where the startup refresh pulls its JSON from.
#[derive(Debug, Deserialize, Clone)]
pub struct RemoteSources {
    pub copywriting_url: String,
    pub specific_rules_url: String,
}

impl Default for RemoteSources {
    fn default() -> Self {
        Self {
            copywriting_url: DEFAULT_COPYWRITING_URL.to_string(),
            specific_rules_url: DEFAULT_SPECIFIC_RULES_URL.to_string(),
        }
    }
}

/// Per-theme enable flags keyed `<theme_id>_flag`. Only consulted by random drawing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ThemeFlags(BTreeMap<String, bool>);

impl Default for ThemeFlags {
    fn default() -> Self {
        Self(
            themes::flagged_theme_ids()
                .map(|id| (themes::flag_key(id), true))
                .collect(),
        )
    }
}

impl ThemeFlags {
    /// Reads one flag per catalog theme; a missing key means enabled.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut flags = Self::default();
        for id in themes::flagged_theme_ids() {
            let key = themes::flag_key(id);
            match cfg.get_bool(&key) {
                Ok(enabled) => flags.set(id, enabled),
                Err(ConfigError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(flags)
    }

    pub fn set(&mut self, theme_id: &str, enabled: bool) {
        self.0.insert(themes::flag_key(theme_id), enabled);
    }

    pub fn is_enabled(&self, theme_id: &str) -> bool {
        self.0.get(&themes::flag_key(theme_id)).copied().unwrap_or(false)
    }

    pub fn any_enabled(&self) -> bool {
        self.0.values().any(|enabled| *enabled)
    }

    /// Fails when no theme is left for random drawing.
    pub fn ensure_any_enabled(&self) -> Result<(), FortuneError> {
        if self.any_enabled() {
            Ok(())
        } else {
            warn!("Fortune themes ALL disabled! Please check!");
            Err(FortuneError::AllThemesDisabled)
        }
    }

    /// Enabled theme ids in catalog order.
    pub fn enabled_themes(&self) -> Vec<&'static str> {
        themes::flagged_theme_ids()
            .filter(|id| self.is_enabled(id))
            .collect()
    }

    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.0
    }

    /// Flags in `themes::FLAG_ORDER`, followed by any key outside it.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        let ordered = themes::FLAG_ORDER.iter().filter_map(|id| {
            self.0
                .get_key_value(&themes::flag_key(id))
                .map(|(key, enabled)| (key.as_str(), *enabled))
        });
        let rest = self
            .0
            .iter()
            .filter(|(key, _)| {
                !themes::FLAG_ORDER
                    .iter()
                    .any(|id| themes::flag_key(id) == **key)
            })
            .map(|(key, enabled)| (key.as_str(), *enabled));
        ordered.chain(rest)
    }
}

impl Serialize for ThemeFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, enabled) in self.iter() {
            map.serialize_entry(key, &enabled)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone)]
pub struct FortuneConfig {
    pub settings: PluginSettings,
    pub flags: ThemeFlags,
    pub remote: RemoteSources,
}

impl FortuneConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // 1. Try standard dotenv discovery from current dir
        if dotenvy::dotenv().is_err() {
            // 2. Fallback: the .env under the resolved FORTUNE_ROOT
            let path = path_utils::get_app_root().join(".env");
            if path.exists() {
                let _ = dotenvy::from_path(&path);
            }
        }

        let cfg = Self::builder()?
            .add_source(File::with_name("fortune").required(false))
            .add_source(Environment::default())
            .build()?;

        Self::from_config(&cfg)
    }

    /// Builder pre-seeded with every default; callers stack sources on top.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let remote = RemoteSources::default();
        let mut builder = Config::builder()
            .set_default(
                "fortune_path",
                path_utils::default_resource_dir().to_string_lossy().to_string(),
            )?
            .set_default("copywriting_url", remote.copywriting_url)?
            .set_default("specific_rules_url", remote.specific_rules_url)?;

        for id in themes::flagged_theme_ids() {
            builder = builder.set_default(themes::flag_key(id), true)?;
        }
        Ok(builder)
    }

    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut settings: PluginSettings = cfg.clone().try_deserialize()?;
        settings.fortune_path = path_utils::get_path(&settings.fortune_path.to_string_lossy());
        let remote: RemoteSources = cfg.clone().try_deserialize()?;

        Ok(Self {
            settings,
            flags: ThemeFlags::from_config(cfg)?,
            remote,
        })
    }
}
