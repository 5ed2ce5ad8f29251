use std::path::{Path, PathBuf};

/// Files under the resource root.
#[derive(Debug, Clone)]
pub struct ResourceLayout {
    pub root: PathBuf,
    pub flags: PathBuf,
    pub copywriting: PathBuf,
    pub fortune_data: PathBuf,
    pub legacy_setting: PathBuf,
    pub group_rules: PathBuf,
    pub specific_rules: PathBuf,
}

impl ResourceLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            flags: root.join("fortune_config.json"),
            copywriting: root.join("fortune").join("copywriting.json"),
            fortune_data: root.join("fortune_data.json"),
            legacy_setting: root.join("fortune_setting.json"),
            group_rules: root.join("group_rules.json"),
            specific_rules: root.join("specific_rules.json"),
        }
    }
}
