use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use fortune_core::config::{FortuneConfig, PluginSettings, RemoteSources, ThemeFlags};
use fortune_core::{FortuneError, themes};
use fortune_provision::{
    CopywritingStatus, Downloader, FileSource, Provisioner, ResourceLayout, json_io,
};
use serde_json::{Value, json};

const COPYWRITING_URL: &str = "https://example.invalid/copywriting.json";
const SPECIFIC_RULES_URL: &str = "https://example.invalid/specific_rules.json";

/// Serves canned documents; any URL without one behaves like a failed request.
#[derive(Default)]
struct FakeDownloader {
    documents: HashMap<String, Value>,
    requests: Mutex<Vec<String>>,
}

impl FakeDownloader {
    fn offline() -> Self {
        Self::default()
    }

    fn with(mut self, url: &str, doc: Value) -> Self {
        self.documents.insert(url.to_string(), doc);
        self
    }

    fn requested(&self, url: &str) -> bool {
        self.requests.lock().unwrap().iter().any(|u| u == url)
    }
}

#[async_trait]
impl Downloader for &FakeDownloader {
    async fn fetch_json(&self, url: &str) -> fortune_core::Result<Option<Value>> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self.documents.get(url).cloned())
    }
}

fn config_for(root: &Path, flags: ThemeFlags) -> FortuneConfig {
    FortuneConfig {
        settings: PluginSettings {
            fortune_path: root.to_path_buf(),
        },
        flags,
        remote: RemoteSources {
            copywriting_url: COPYWRITING_URL.to_string(),
            specific_rules_url: SPECIFIC_RULES_URL.to_string(),
        },
    }
}

fn copywriting_doc() -> Value {
    json!({
        "version": "0.4.10",
        "copywriting": [
            {"good-luck": "大吉", "rank": 8, "content": ["会起风的日子，无论干什么都会很顺利的一天。"]}
        ]
    })
}

async fn write(path: &Path, value: Value) {
    json_io::write_pretty(path, &value).await.unwrap();
}

#[tokio::test]
async fn test_fresh_root_is_fully_provisioned() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("nested").join("resource");
    let downloader = FakeDownloader::default()
        .with(COPYWRITING_URL, copywriting_doc())
        .with(SPECIFIC_RULES_URL, json!({"大吉": ["pcr"]}));
    let config = config_for(&root, ThemeFlags::default());

    let report = Provisioner::new(&config, &downloader).run().await.unwrap();
    let layout = ResourceLayout::new(&root);

    assert!(root.is_dir());
    assert!(layout.flags.exists());
    assert_eq!(
        report.copywriting,
        CopywritingStatus::Refreshed {
            version: Some("0.4.10".to_string())
        }
    );
    assert_eq!(json_io::read_json(&layout.copywriting).await.unwrap(), copywriting_doc());
    assert_eq!(report.fortune_data, FileSource::Created);
    assert_eq!(json_io::read_json(&layout.fortune_data).await.unwrap(), json!({}));
    assert_eq!(report.group_rules, FileSource::Created);
    assert_eq!(json_io::read_json(&layout.group_rules).await.unwrap(), json!({}));
    assert_eq!(report.specific_rules, FileSource::Downloaded);
    assert_eq!(
        json_io::read_json(&layout.specific_rules).await.unwrap(),
        json!({"大吉": ["pcr"]})
    );
    assert_eq!(report.enabled_themes.len(), themes::flagged_theme_ids().count());
}

#[tokio::test]
async fn test_flags_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut flags = ThemeFlags::default();
    flags.set("genshin", false);
    flags.set("hololive", false);
    let downloader = FakeDownloader::default().with(COPYWRITING_URL, copywriting_doc());
    let config = config_for(dir.path(), flags.clone());

    let report = Provisioner::new(&config, &downloader).run().await.unwrap();

    let raw = std::fs::read_to_string(dir.path().join("fortune_config.json")).unwrap();
    assert!(raw.starts_with("{\n    \"amazing_grace_flag\": true,\n    \"arknights_flag\": true,"));

    let written = json_io::read_json(&dir.path().join("fortune_config.json")).await.unwrap();
    let parsed: ThemeFlags = serde_json::from_value(written).unwrap();
    assert_eq!(parsed, flags);
    assert!(!report.enabled_themes.contains(&"genshin"));
    assert!(report.enabled_themes.contains(&"pcr"));
}

#[tokio::test]
async fn test_all_disabled_aborts_before_writing_flags() {
    let dir = tempfile::tempdir().unwrap();
    let mut flags = ThemeFlags::default();
    for id in themes::flagged_theme_ids() {
        flags.set(id, false);
    }
    let downloader = FakeDownloader::default().with(COPYWRITING_URL, copywriting_doc());
    let config = config_for(dir.path(), flags);

    let err = Provisioner::new(&config, &downloader).run().await.unwrap_err();

    assert!(matches!(err, FortuneError::AllThemesDisabled));
    assert!(!dir.path().join("fortune_config.json").exists());
    assert!(!downloader.requested(COPYWRITING_URL));
}

#[tokio::test]
async fn test_offline_keeps_existing_copywriting() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ResourceLayout::new(dir.path());
    let stale = json!({"version": "0.4.1", "copywriting": []});
    write(&layout.copywriting, stale).await;
    let before = std::fs::read(&layout.copywriting).unwrap();

    let downloader = FakeDownloader::offline();
    let config = config_for(dir.path(), ThemeFlags::default());
    let report = Provisioner::new(&config, &downloader).run().await.unwrap();

    assert_eq!(report.copywriting, CopywritingStatus::KeptLocal);
    assert_eq!(std::fs::read(&layout.copywriting).unwrap(), before);
}

#[tokio::test]
async fn test_offline_without_copywriting_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let downloader = FakeDownloader::offline();
    let config = config_for(dir.path(), ThemeFlags::default());

    let err = Provisioner::new(&config, &downloader).run().await.unwrap_err();

    assert!(matches!(err, FortuneError::ResourceMissing { .. }));
    assert!(!dir.path().join("fortune_data.json").exists());
}

#[tokio::test]
async fn test_existing_fortune_data_is_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ResourceLayout::new(dir.path());
    let raw = "{\"u1\": [{\"date\": \"2022-05-01\", \"theme\": \"pcr\"}]}";
    std::fs::write(&layout.fortune_data, raw).unwrap();

    let downloader = FakeDownloader::default().with(COPYWRITING_URL, copywriting_doc());
    let config = config_for(dir.path(), ThemeFlags::default());
    let report = Provisioner::new(&config, &downloader).run().await.unwrap();

    assert_eq!(report.fortune_data, FileSource::Existing);
    assert_eq!(std::fs::read_to_string(&layout.fortune_data).unwrap(), raw);
}

#[tokio::test]
async fn test_legacy_settings_are_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ResourceLayout::new(dir.path());
    write(
        &layout.legacy_setting,
        json!({"group_rule": {"g1": "themeA"}, "specific_rule": {}}),
    )
    .await;

    let downloader = FakeDownloader::default().with(COPYWRITING_URL, copywriting_doc());
    let config = config_for(dir.path(), ThemeFlags::default());
    let report = Provisioner::new(&config, &downloader).run().await.unwrap();

    assert_eq!(report.group_rules, FileSource::Migrated);
    assert_eq!(
        json_io::read_json(&layout.group_rules).await.unwrap(),
        json!({"g1": "themeA"})
    );
    // empty specific_rule falls through to the download, which fails here
    assert_eq!(report.specific_rules, FileSource::Created);
    assert!(downloader.requested(SPECIFIC_RULES_URL));
    assert_eq!(json_io::read_json(&layout.specific_rules).await.unwrap(), json!({}));
    assert!(layout.legacy_setting.exists());
}

#[tokio::test]
async fn test_migrated_specific_rules_skip_download() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ResourceLayout::new(dir.path());
    write(
        &layout.legacy_setting,
        json!({"specific_rule": {"114514": ["大吉"]}}),
    )
    .await;

    let downloader = FakeDownloader::default()
        .with(COPYWRITING_URL, copywriting_doc())
        .with(SPECIFIC_RULES_URL, json!({"remote": true}));
    let config = config_for(dir.path(), ThemeFlags::default());
    let report = Provisioner::new(&config, &downloader).run().await.unwrap();

    assert_eq!(report.group_rules, FileSource::Created);
    assert_eq!(report.specific_rules, FileSource::Migrated);
    assert!(!downloader.requested(SPECIFIC_RULES_URL));
    assert_eq!(
        json_io::read_json(&layout.specific_rules).await.unwrap(),
        json!({"114514": ["大吉"]})
    );
}

#[tokio::test]
async fn test_existing_rules_are_never_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let layout = ResourceLayout::new(dir.path());
    std::fs::write(&layout.group_rules, "{\"g9\": \"touhou\"}").unwrap();
    std::fs::write(&layout.specific_rules, "{\"s9\": []}").unwrap();
    write(
        &layout.legacy_setting,
        json!({"group_rule": {"g1": "pcr"}, "specific_rule": {"s1": ["a"]}}),
    )
    .await;

    let downloader = FakeDownloader::default().with(COPYWRITING_URL, copywriting_doc());
    let config = config_for(dir.path(), ThemeFlags::default());

    for _ in 0..2 {
        let report = Provisioner::new(&config, &downloader).run().await.unwrap();
        assert_eq!(report.group_rules, FileSource::Existing);
        assert_eq!(report.specific_rules, FileSource::Existing);
    }

    assert_eq!(std::fs::read_to_string(&layout.group_rules).unwrap(), "{\"g9\": \"touhou\"}");
    assert_eq!(std::fs::read_to_string(&layout.specific_rules).unwrap(), "{\"s9\": []}");
    assert!(!downloader.requested(SPECIFIC_RULES_URL));
}

#[tokio::test]
async fn test_copywriting_without_version_still_refreshes() {
    let dir = tempfile::tempdir().unwrap();
    let downloader = FakeDownloader::default().with(COPYWRITING_URL, json!({"copywriting": []}));
    let config = config_for(dir.path(), ThemeFlags::default());

    let report = Provisioner::new(&config, &downloader).run().await.unwrap();

    assert_eq!(report.copywriting, CopywritingStatus::Refreshed { version: None });
}
