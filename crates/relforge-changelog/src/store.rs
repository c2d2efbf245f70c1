//! On-disk changelog I/O: load the previous changelog (if any), and
//! rewrite it only when the freshly serialized bytes differ from what is
//! already there, so an unchanged build leaves file mtimes untouched.

use std::fs;
use std::path::Path;

use relforge_relational::{deserialize, serialize, Changelog, ChangelogError};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Changelog(#[from] ChangelogError),
    #[error("failed to read `{path}`")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write `{path}`")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub fn load(path: &Path) -> Result<Option<Changelog>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Some(deserialize(&content)?))
}

/// Writes `changelog` to `path`, but only if the serialized bytes differ
/// from what is already on disk. Returns whether a write happened.
pub fn write_if_changed(path: &Path, changelog: &Changelog) -> Result<bool, StoreError> {
    let xml = serialize(changelog)?;
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == xml {
            return Ok(false);
        }
    }
    fs::write(path, xml).map_err(|source| StoreError::Write {
        path: path.display().to_string(),
        source,
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relforge_relational::Model;

    #[test]
    fn write_if_changed_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.xml");
        let changelog = Changelog::new("pgsql", "", Model::new(1));

        assert!(write_if_changed(&path, &changelog).unwrap());
        assert!(!write_if_changed(&path, &changelog).unwrap());
    }

    #[test]
    fn load_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.xml");
        assert!(load(&path).unwrap().is_none());
    }
}
