//! Legacy settings migration
//!
//! Releases before 0.4 kept group rules and specific rules together in
//! `fortune_setting.json`. These helpers split one key out into its own file.

use std::path::Path;

use fortune_core::Result;
use serde_json::Value;

use crate::json_io;

pub const GROUP_RULE_KEY: &str = "group_rule";
pub const SPECIFIC_RULE_KEY: &str = "specific_rule";

/// Copies `group_rule` from the legacy file into `dest`.
/// Returns false (and writes `{}`) when the key is missing or empty.
pub async fn migrate_group_rules(legacy: &Path, dest: &Path) -> Result<bool> {
    migrate_rule(legacy, dest, GROUP_RULE_KEY).await
}

/// Copies `specific_rule` from the legacy file into `dest`.
/// Returns false (and writes `{}`) when the key is missing or empty.
pub async fn migrate_specific_rules(legacy: &Path, dest: &Path) -> Result<bool> {
    migrate_rule(legacy, dest, SPECIFIC_RULE_KEY).await
}

async fn migrate_rule(legacy: &Path, dest: &Path, key: &str) -> Result<bool> {
    let setting = json_io::read_json(legacy).await?;

    match setting.get(key).filter(|rules| !is_empty(rules)) {
        Some(rules) => {
            json_io::write_pretty(dest, rules).await?;
            Ok(true)
        }
        None => {
            json_io::write_empty_object(dest).await?;
            Ok(false)
        }
    }
}

/// Loose emptiness: null, false, 0, "", [] and {} all count.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
