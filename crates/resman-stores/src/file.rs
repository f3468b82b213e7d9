//! Reading and rewriting JSON resource files.
//!
//! A resource file is one JSON array of record objects, pretty-printed with
//! four-space indentation. Writes always replace the whole file.

use std::path::{Path, PathBuf};

use resman_core::error::{ErrorCode, ResmanError, ResmanResult};
use resman_core::types::Resource;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const TMP_SUFFIX: &str = "tmp";

/// Read every record of a resource file.
pub async fn read_resources(path: &Path) -> ResmanResult<Vec<Resource>> {
    let data = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&data)?)
}

/// Serialize records the way resource files are laid out on disk.
pub fn to_pretty_json(resources: &[Resource]) -> ResmanResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    resources.serialize(&mut serializer)?;
    Ok(buffer)
}

/// Replace the contents of `path` with `resources`.
///
/// The data goes to a sibling temporary file first and is then renamed over
/// the target, so readers never observe a partially written file.
pub async fn write_resources(path: &Path, resources: &[Resource]) -> ResmanResult<()> {
    let data = to_pretty_json(resources)?;
    let tmp = tmp_path(path)?;
    tokio::fs::write(&tmp, &data).await?;
    if let Err(err) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(err.into());
    }
    Ok(())
}

fn tmp_path(path: &Path) -> ResmanResult<PathBuf> {
    let name = path.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        ResmanError::Validation {
            message: format!("'{}' does not name a file", path.display()),
            code: ErrorCode::ValInvalidPath,
        }
    })?;
    Ok(path.with_file_name(format!(".{}.{}", name, TMP_SUFFIX)))
}

/// Resolve a caller-supplied file name inside `dir`.
///
/// Only bare file names are accepted: no separators, no `..`, nothing
/// absolute.
pub fn resolve_json_path(dir: &Path, filename: &str) -> ResmanResult<PathBuf> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\'])
        || Path::new(filename).is_absolute();
    if invalid {
        return Err(ResmanError::Validation {
            message: format!("'{}' is not a valid resource file name", filename),
            code: ErrorCode::ValInvalidPath,
        });
    }
    Ok(dir.join(filename))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_four_space_indent() {
        let r = Resource::from_value(json!({"id": "a", "resource_version": "1.0.0"})).unwrap();
        let text = String::from_utf8(to_pretty_json(&[r]).unwrap()).unwrap();
        assert_eq!(
            text,
            "[\n    {\n        \"id\": \"a\",\n        \"resource_version\": \"1.0.0\"\n    }\n]"
        );
    }

    #[test]
    fn test_resolve_json_path() {
        let dir = Path::new("database");
        assert_eq!(
            resolve_json_path(dir, "resources.json").unwrap(),
            PathBuf::from("database/resources.json")
        );
        assert!(resolve_json_path(dir, "../etc/passwd").is_err());
        assert!(resolve_json_path(dir, "nested/file.json").is_err());
        assert!(resolve_json_path(dir, "").is_err());
        assert!(resolve_json_path(dir, "..").is_err());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resources.json");
        let records = vec![
            Resource::from_value(json!({"id": "a", "resource_version": "1.0.0"})).unwrap(),
            Resource::from_value(json!({"id": "b", "resource_version": "2.0.0", "tags": ["x"]})).unwrap(),
        ];
        write_resources(&path, &records).await.unwrap();
        assert_eq!(read_resources(&path).await.unwrap(), records);
        assert!(!dir.path().join(".resources.json.tmp").exists());
    }
}
