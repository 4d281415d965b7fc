use std::collections::HashMap;
use std::io::{Read, Seek};

use crate::error::Error;
use crate::package::Package;

pub(crate) const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";

/// Parse a relationship manifest into `rid -> asset filename`, keeping only
/// image relationships that point inside the package.
pub fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>, Error> {
    let mut rels = HashMap::new();
    let content = String::from_utf8_lossy(xml);
    if content.trim().is_empty() {
        return Ok(rels);
    }
    let xml = roxmltree::Document::parse(&content)?;
    for node in xml.root_element().children().filter(|n| n.is_element()) {
        let (Some(id), Some(rel_type), Some(target)) = (
            node.attribute("Id"),
            node.attribute("Type"),
            node.attribute("Target"),
        ) else {
            continue;
        };
        if !rel_type.contains("image") {
            continue;
        }
        if node.attribute("TargetMode") == Some("External") {
            log::debug!("Skipping external image relationship {id} -> {target}");
            continue;
        }
        let filename = target.rsplit('/').next().unwrap_or(target);
        rels.insert(id.to_string(), filename.to_string());
    }
    Ok(rels)
}

/// Image relationships of `word/document.xml`. A package without a manifest
/// simply has no images to associate.
pub fn read_relationships<R: Read + Seek>(
    package: &mut Package<R>,
) -> Result<HashMap<String, String>, Error> {
    match package.read(DOCUMENT_RELS) {
        Ok(bytes) => parse_relationships(&bytes),
        Err(Error::NotFound(_)) => {
            log::warn!("No {DOCUMENT_RELS} in package — no images can be associated");
            Ok(HashMap::new())
        }
        Err(e) => Err(e),
    }
}
