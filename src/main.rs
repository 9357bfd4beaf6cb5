use anyhow::Context;
use pixel_lessons::image_pipeline::{
    LessonConfig, LessonPipeline, ImageCrateReader, StandardTiffWriter, TiffCompression,
};
use pixel_lessons::logger;

use tracing::{error, info};

const USAGE: &str = "usage: pixel_lessons [input_image] [output_dir] [--tiff] [--verbose]";

fn main() -> anyhow::Result<()> {
    let mut tiff = false;
    let mut verbose = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--tiff" => tiff = true,
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }
    if positional.len() > 2 {
        anyhow::bail!("{}", USAGE);
    }

    if verbose {
        logger::init_with_default("debug");
    } else {
        logger::init();
    }

    info!("Starting pixel_lessons...");

    let mut builder = LessonConfig::builder().compression(TiffCompression::Lzw);
    if let Some(input) = positional.first() {
        builder = builder.input_path(input);
    }
    if let Some(output) = positional.get(1) {
        builder = builder.output_dir(output);
    }
    let config = builder.build();

    info!("Input: {}", config.input_path.display());
    info!("Output directory: {}", config.output_dir.display());
    info!("Window format: {}", if tiff { "tiff" } else { "png" });

    let result = if tiff {
        LessonPipeline::with_custom(ImageCrateReader, StandardTiffWriter, config).run_file()
    } else {
        LessonPipeline::new(config).run_file()
    };

    match result.context("lesson run failed") {
        Ok(report) => {
            info!(
                completed = report.completed.len(),
                skipped = report.skipped.len(),
                "Lessons finished"
            );
            for lesson in &report.skipped {
                info!("Skipped lesson {}: {}", lesson.number(), lesson.title());
            }
        }
        Err(e) => error!("{:#}", e),
    }

    Ok(())
}
