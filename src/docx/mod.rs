mod context;
mod rels;
mod tokens;

use std::collections::HashMap;
use std::io::{Read, Seek};

pub use context::{ContextAssociator, DEFAULT_WINDOW, associate};
pub use rels::{parse_relationships, read_relationships};
pub use tokens::{Tokens, tokenize};

use crate::error::Error;
use crate::model::Association;
use crate::package::Package;

pub(crate) const DOCUMENT_XML: &str = "word/document.xml";
pub(crate) const MEDIA_DIR: &str = "word/media/";

/// Caption every resolvable body image with its preceding text, in document
/// order. `asset_filename` is the package's own filename for the asset.
pub fn associate_images<R: Read + Seek>(
    package: &mut Package<R>,
    window: usize,
) -> Result<Vec<Association>, Error> {
    let rels = read_relationships(package)?;
    associate_with(package, &rels, window)
}

fn associate_with<R: Read + Seek>(
    package: &mut Package<R>,
    rels: &HashMap<String, String>,
    window: usize,
) -> Result<Vec<Association>, Error> {
    let body = package.read(DOCUMENT_XML)?;
    let mut associator = ContextAssociator::with_window(rels, window);
    for token in tokenize(&body) {
        associator.push(token);
    }
    Ok(associator.finish())
}
