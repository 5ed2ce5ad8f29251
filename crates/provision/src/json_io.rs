//! JSON file helpers shared by the provisioner and the migrator.
//! Output is 4-space indented UTF-8 with non-ASCII written as-is.

use std::path::Path;

use fortune_core::{FortuneError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use tokio::fs;

const INDENT: &[u8] = b"    ";

pub fn to_pretty_bytes<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Overwrites `path` with `value`, creating parent directories as needed.
pub async fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_pretty_bytes(value).map_err(|e| FortuneError::json(path, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| FortuneError::io(parent, e))?;
    }

    fs::write(path, bytes).await.map_err(|e| FortuneError::io(path, e))
}

pub async fn write_empty_object(path: &Path) -> Result<()> {
    write_pretty(path, &Value::Object(Map::new())).await
}

pub async fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| FortuneError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| FortuneError::json(path, e))
}
