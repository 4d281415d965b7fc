pub mod assets;
pub mod docx;
mod error;
pub mod model;
pub mod output;
pub mod package;
pub mod xlsx;

pub use assets::{AssetEncoder, WebpThumbnailer};
pub use error::Error;
pub use model::{Assignment, Association, Cell, Field, HeaderBinding, Token};
pub use output::ImageMapping;
pub use package::Package;

use std::collections::HashSet;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct ImageOptions {
    pub asset_dir: PathBuf,
    pub mapping_path: PathBuf,
    /// Prefix of the asset paths written into the mapping file.
    pub url_prefix: String,
    pub window: usize,
    pub encoder: WebpThumbnailer,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets/investors"),
            mapping_path: PathBuf::from("assets/investor_images.js"),
            url_prefix: "assets/investors".into(),
            window: docx::DEFAULT_WINDOW,
            encoder: WebpThumbnailer::default(),
        }
    }
}

pub struct ImageReport {
    pub assets: Vec<String>,
    /// Associations whose asset was written, renamed to the output file names.
    pub associations: Vec<Association>,
    pub mapping: ImageMapping,
}

pub struct SheetReport {
    pub sheet_name: String,
    pub binding: HeaderBinding,
    pub assignments: Vec<Assignment>,
}

pub fn extract_images(input: &Path, opts: &ImageOptions) -> Result<ImageReport, Error> {
    let mut package = Package::open(input)?;
    extract_images_from(&mut package, opts)
}

pub fn extract_images_from<R: Read + Seek>(
    package: &mut Package<R>,
    opts: &ImageOptions,
) -> Result<ImageReport, Error> {
    let t0 = Instant::now();

    // Everything fatal (manifest, body) happens before the first file is written.
    let found = docx::associate_images(package, opts.window)?;
    let t_assoc = t0.elapsed();

    let assets = assets::write_assets(package, &opts.encoder, &opts.asset_dir)?;
    let t_assets = t0.elapsed();
    log::info!("Extracted {} images to {}", assets.len(), opts.asset_dir.display());

    let written: HashSet<&str> = assets.iter().map(String::as_str).collect();
    let extension = opts.encoder.extension();
    let associations: Vec<Association> = found
        .into_iter()
        .filter_map(|a| {
            let out_name = assets::output_name(&a.asset_filename, extension);
            if !written.contains(out_name.as_str()) {
                log::warn!(
                    "Image {} captioned {:?} was not extracted — left out of the mapping",
                    a.asset_filename,
                    a.context
                );
                return None;
            }
            Some(Association {
                context: a.context,
                asset_filename: out_name,
            })
        })
        .collect();

    let mapping = ImageMapping::from_associations(&associations, &opts.url_prefix);
    output::write_image_mapping(&opts.mapping_path, &mapping)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: associate={:.1}ms, assets={:.1}ms, write={:.1}ms, total={:.1}ms ({} associations, {} mapping keys)",
        t_assoc.as_secs_f64() * 1000.0,
        (t_assets - t_assoc).as_secs_f64() * 1000.0,
        (t_total - t_assets).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        associations.len(),
        mapping.len(),
    );

    Ok(ImageReport {
        assets,
        associations,
        mapping,
    })
}

pub fn extract_assignments_from(input: &Path) -> Result<SheetReport, Error> {
    let t0 = Instant::now();

    let sheet = xlsx::read_rows(input)?;
    let (binding, assignments) = xlsx::parse_assignments(&sheet.rows)?;

    let mut bound: Vec<(&str, usize)> = binding
        .columns
        .iter()
        .map(|(field, col)| (field.name(), *col))
        .collect();
    bound.sort_by_key(|&(_, col)| col);
    log::info!("Header row {}: {:?}", binding.header_row, bound);

    log::info!(
        "Timing: parse={:.1}ms ({} rows, {} assignments)",
        t0.elapsed().as_secs_f64() * 1000.0,
        sheet.rows.len(),
        assignments.len(),
    );

    Ok(SheetReport {
        sheet_name: sheet.sheet_name,
        binding,
        assignments,
    })
}
