use std::io::{Read, Seek};
use std::path::Path;

use image::DynamicImage;

use crate::docx::MEDIA_DIR;
use crate::error::Error;
use crate::package::Package;

/// Re-encodes an embedded asset for the front-end.
pub trait AssetEncoder {
    /// Extension of the encoded files, without the dot.
    fn extension(&self) -> &str;

    fn encode(&self, name: &str, data: &[u8]) -> Result<Vec<u8>, Error>;
}

/// Shrinks images to fit a bounding box (aspect ratio kept, never enlarged)
/// and writes them as lossy WebP.
#[derive(Clone, Copy, Debug)]
pub struct WebpThumbnailer {
    pub max_width: u32,
    pub max_height: u32,
    /// Lossy WebP quality, 0-100.
    pub quality: u8,
}

impl Default for WebpThumbnailer {
    fn default() -> Self {
        Self {
            max_width: 200,
            max_height: 200,
            quality: 80,
        }
    }
}

impl WebpThumbnailer {
    pub fn fit(&self, img: DynamicImage) -> DynamicImage {
        if img.width() <= self.max_width && img.height() <= self.max_height {
            img
        } else {
            img.thumbnail(self.max_width, self.max_height)
        }
    }
}

impl AssetEncoder for WebpThumbnailer {
    fn extension(&self) -> &str {
        "webp"
    }

    fn encode(&self, name: &str, data: &[u8]) -> Result<Vec<u8>, Error> {
        let decode_err = |source| Error::AssetDecode {
            name: name.to_string(),
            source,
        };
        let img = image::load_from_memory(data).map_err(decode_err)?;
        let rgba = self.fit(img).to_rgba8();
        let quality = f32::from(self.quality.min(100));
        let encoded = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height())
            .encode(quality);
        Ok(encoded.to_vec())
    }
}

/// `image3.png` → `image3.webp`
pub fn output_name(filename: &str, extension: &str) -> String {
    Path::new(filename)
        .with_extension(extension)
        .to_string_lossy()
        .into_owned()
}

/// Encode every asset under `word/media/` into `out_dir`. Assets that cannot be
/// read or decoded are logged and skipped. Returns the written file names in
/// package order.
pub fn write_assets<R: Read + Seek>(
    package: &mut Package<R>,
    encoder: &dyn AssetEncoder,
    out_dir: &Path,
) -> Result<Vec<String>, Error> {
    std::fs::create_dir_all(out_dir)?;
    let media: Vec<String> = package
        .entries()
        .into_iter()
        .filter(|name| name.starts_with(MEDIA_DIR) && !name.ends_with('/'))
        .collect();

    let mut written = Vec::new();
    for entry in media {
        let filename = entry.rsplit('/').next().unwrap_or(&entry).to_string();
        let data = match package.read(&entry) {
            Ok(data) => data,
            Err(e @ Error::NotFound(_)) => {
                log::warn!("{e} — skipping asset");
                continue;
            }
            Err(e) => return Err(e),
        };
        let encoded = match encoder.encode(&filename, &data) {
            Ok(bytes) => bytes,
            Err(e @ Error::AssetDecode { .. }) => {
                log::warn!("{e} — skipping asset");
                continue;
            }
            Err(e) => return Err(e),
        };
        let out_name = output_name(&filename, encoder.extension());
        std::fs::write(out_dir.join(&out_name), &encoded)?;
        log::debug!("Wrote {out_name} ({} bytes from {} bytes)", encoded.len(), data.len());
        written.push(out_name);
    }
    Ok(written)
}
