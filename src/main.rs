use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use roster_extract::output::{assignments_json, clean_outputs, write_assignments};
use roster_extract::{ImageOptions, WebpThumbnailer};

#[derive(Parser)]
#[command(version, about = "Extract captioned images from DOCX files and meeting assignments from spreadsheets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encode embedded images and map each to the text preceding it
    Images {
        /// Input DOCX file
        input: PathBuf,
        /// Directory the encoded images are written to
        #[arg(long, default_value = "assets/investors")]
        asset_dir: PathBuf,
        /// Mapping file (JS module declaring INVESTOR_IMAGES)
        #[arg(long, default_value = "assets/investor_images.js")]
        mapping: PathBuf,
        /// Path prefix used for images inside the mapping
        #[arg(long, default_value = "assets/investors")]
        url_prefix: String,
        /// Number of preceding text fragments used as a caption
        #[arg(long, default_value_t = 5)]
        window: usize,
        /// Maximum width/height of encoded images
        #[arg(long, default_value_t = 200)]
        max_size: u32,
    },
    /// Read meeting assignments from a spreadsheet as JSON
    Sheet {
        /// Input workbook (.xlsx, .xls, .ods)
        input: PathBuf,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete generated images and the mapping file
    Clean {
        #[arg(long, default_value = "assets/investors")]
        asset_dir: PathBuf,
        #[arg(long, default_value = "assets/investor_images.js")]
        mapping: PathBuf,
    },
}

fn run(cli: Cli) -> Result<(), roster_extract::Error> {
    match cli.command {
        Command::Images {
            input,
            asset_dir,
            mapping,
            url_prefix,
            window,
            max_size,
        } => {
            let opts = ImageOptions {
                asset_dir,
                mapping_path: mapping,
                url_prefix,
                window,
                encoder: WebpThumbnailer {
                    max_width: max_size,
                    max_height: max_size,
                    ..WebpThumbnailer::default()
                },
            };
            let report = roster_extract::extract_images(&input, &opts)?;
            println!(
                "Generated {} with {} images.",
                opts.mapping_path.display(),
                report.associations.len()
            );
        }
        Command::Sheet { input, output } => {
            let report = roster_extract::extract_assignments_from(&input)?;
            match output {
                Some(path) => {
                    write_assignments(&path, &report.assignments)?;
                    println!(
                        "Wrote {} assignments from sheet {:?} to {}",
                        report.assignments.len(),
                        report.sheet_name,
                        path.display()
                    );
                }
                None => println!("{}", assignments_json(&report.assignments)?),
            }
        }
        Command::Clean { asset_dir, mapping } => {
            let removed = clean_outputs(&asset_dir, &mapping)?;
            println!("Removed {} files", removed.len());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
