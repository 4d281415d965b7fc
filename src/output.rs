use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::{Association, Assignment};

/// Caption → asset path, in first-insertion order. Re-inserting a caption
/// replaces its path (last write wins).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageMapping {
    entries: Vec<(String, String)>,
}

impl ImageMapping {
    pub fn from_associations(associations: &[Association], url_prefix: &str) -> Self {
        let prefix = url_prefix.trim_end_matches('/');
        let mut mapping = Self::default();
        for assoc in associations {
            let path = if prefix.is_empty() {
                assoc.asset_filename.clone()
            } else {
                format!("{prefix}/{}", assoc.asset_filename)
            };
            mapping.insert(assoc.context.trim(), path);
        }
        mapping
    }

    pub fn insert(&mut self, key: &str, path: String) {
        if let Some(existing) = self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            log::debug!("Caption {key:?} already mapped to {} — replacing with {path}", existing.1);
            existing.1 = path;
        } else {
            self.entries.push((key.to_string(), path));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as a JS module declaring `INVESTOR_IMAGES`.
    pub fn to_js(&self) -> Result<String, Error> {
        let mut js = String::from("const INVESTOR_IMAGES = {\n");
        for (key, path) in self.iter() {
            let key = serde_json::to_string(key)?;
            let path = serde_json::to_string(path)?;
            let _ = writeln!(js, "  {key}: {path},");
        }
        js.push_str("};\n");
        Ok(js)
    }
}

pub fn write_image_mapping(path: &Path, mapping: &ImageMapping) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, mapping.to_js()?)?;
    Ok(())
}

pub fn assignments_json(assignments: &[Assignment]) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(assignments)?)
}

pub fn write_assignments(path: &Path, assignments: &[Assignment]) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut json = assignments_json(assignments)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}

/// Remove generated `.webp` assets and the mapping file. Missing files and
/// directories are not errors. Returns what was removed.
pub fn clean_outputs(asset_dir: &Path, mapping_path: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut removed = Vec::new();
    match std::fs::read_dir(asset_dir) {
        Ok(entries) => {
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "webp"))
                .collect();
            paths.sort();
            for path in paths {
                std::fs::remove_file(&path)?;
                log::info!("Deleted {}", path.display());
                removed.push(path);
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    match std::fs::remove_file(mapping_path) {
        Ok(()) => {
            log::info!("Deleted {}", mapping_path.display());
            removed.push(mapping_path.to_path_buf());
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    Ok(removed)
}
