use std::path::Path;

use changeset_version::parse_version;
use semver::Version;
use serde_json::Value;

use crate::error::ManifestError;

fn read_document(path: &Path) -> Result<Value, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// # Errors
///
/// Returns an error if the file cannot be read or parsed, has no string
/// `version` field, or the version is not `major.minor.patch`.
pub fn read_package_version(path: &Path) -> Result<Version, ManifestError> {
    let doc = read_document(path)?;

    let version_str = doc
        .get("version")
        .and_then(Value::as_str)
        .ok_or_else(|| ManifestError::MissingField {
            path: path.to_path_buf(),
            field: "version".to_string(),
        })?;

    parse_version(version_str).map_err(|source| ManifestError::InvalidVersion {
        path: path.to_path_buf(),
        version: version_str.to_string(),
        source,
    })
}

/// Rewrites the `version` field, keeping every other key in its original order.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or written, or is not a
/// JSON object.
pub fn write_package_version(path: &Path, version: &Version) -> Result<(), ManifestError> {
    let mut doc = read_document(path)?;

    let object = doc
        .as_object_mut()
        .ok_or_else(|| ManifestError::MissingField {
            path: path.to_path_buf(),
            field: "version (document is not an object)".to_string(),
        })?;
    object.insert("version".to_string(), Value::String(version.to_string()));

    let mut rendered = serde_json::to_string_pretty(&doc).map_err(|source| ManifestError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    rendered.push('\n');

    std::fs::write(path, rendered).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_version() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"name": "skills", "version": "1.4.0"}"#).expect("write");

        assert_eq!(
            read_package_version(&path).expect("read"),
            Version::new(1, 4, 0)
        );
    }

    #[test]
    fn missing_version_is_an_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"name": "skills"}"#).expect("write");

        let err = read_package_version(&path).expect_err("should fail");
        assert!(matches!(err, ManifestError::MissingField { .. }));
    }

    #[test]
    fn prerelease_version_is_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"version": "1.0.0-beta.1"}"#).expect("write");

        let err = read_package_version(&path).expect_err("should fail");
        assert!(matches!(err, ManifestError::InvalidVersion { .. }));
    }

    #[test]
    fn write_keeps_key_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("package.json");
        std::fs::write(
            &path,
            r#"{"name": "skills", "version": "1.0.0", "private": true}"#,
        )
        .expect("write");

        write_package_version(&path, &Version::new(1, 1, 0)).expect("write version");

        let content = std::fs::read_to_string(&path).expect("read");
        assert_eq!(
            content,
            "{\n  \"name\": \"skills\",\n  \"version\": \"1.1.0\",\n  \"private\": true\n}\n"
        );
    }
}
