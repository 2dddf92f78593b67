//! Input and output helpers shared by the commands

use crate::error::{BuildInfoError, BuildInfoResult};
use crate::metadata::Metadata;
use crate::record::BuildInfo;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Read a file, or stdin when `input` is `-`
pub async fn read_input(input: &str) -> BuildInfoResult<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .map_err(|e| BuildInfoError::io("reading stdin", e))?;
        return Ok(buf);
    }
    read_file(Path::new(input)).await
}

async fn read_file(path: &Path) -> BuildInfoResult<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| BuildInfoError::io(format!("reading {}", path.display()), e))
}

/// Load exporter metadata: a JSON object of metadata key to record.
///
/// Null entries are treated as absent records.
pub async fn load_metadata(path: Option<&Path>) -> BuildInfoResult<Metadata> {
    let Some(path) = path else {
        return Ok(Metadata::new());
    };

    let content = read_file(path).await?;
    let entries: BTreeMap<String, Value> = serde_json::from_slice(&content)
        .map_err(|e| BuildInfoError::json(format!("metadata file {}", path.display()), e))?;

    let mut metadata = Metadata::new();
    for (key, value) in entries {
        if value.is_null() {
            continue;
        }
        let record = serde_json::to_vec(&value)
            .map_err(|e| BuildInfoError::json(format!("metadata entry {:?}", key), e))?;
        metadata.insert(key, record);
    }

    debug!("Loaded {} metadata entries from {}", metadata.len(), path.display());
    Ok(metadata)
}

/// Load a JSON object of string to string
pub async fn load_string_map(path: &Path) -> BuildInfoResult<BTreeMap<String, String>> {
    let content = read_file(path).await?;
    serde_json::from_slice(&content)
        .map_err(|e| BuildInfoError::json(path.display().to_string(), e))
}

/// Render a JSON record for the terminal
pub fn render_record(dt: &[u8], pretty: bool) -> BuildInfoResult<String> {
    let bi: BuildInfo =
        serde_json::from_slice(dt).map_err(|e| BuildInfoError::json("build info", e))?;
    render(&bi, pretty)
}

/// Render a record for the terminal
pub fn render(bi: &BuildInfo, pretty: bool) -> BuildInfoResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(bi)
    } else {
        serde_json::to_string(bi)
    };
    rendered.map_err(|e| BuildInfoError::json("build info", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn metadata_skips_null_entries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(
            &path,
            r#"{"meta": {"frontend": "dockerfile.v0"}, "other": null}"#,
        )
        .unwrap();

        let metadata = load_metadata(Some(&path)).await.unwrap();
        assert_eq!(metadata.len(), 1);
        let bi: BuildInfo = serde_json::from_slice(&metadata["meta"]).unwrap();
        assert_eq!(bi.frontend, "dockerfile.v0");
    }

    #[tokio::test]
    async fn metadata_absent_path_is_empty() {
        assert!(load_metadata(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn metadata_must_be_object() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metadata.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(load_metadata(Some(&path)).await.unwrap_err().is_decode());
    }

    #[test]
    fn render_compact_and_pretty() {
        let dt = br#"{"frontend":"dockerfile.v0"}"#;
        assert_eq!(
            render_record(dt, false).unwrap(),
            r#"{"frontend":"dockerfile.v0"}"#
        );
        assert!(render_record(dt, true).unwrap().contains("\n"));
    }
}
