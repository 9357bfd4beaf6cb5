use std::io::{Cursor, Write};
use std::sync::{Arc, Mutex};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::display::{DisplayFormat, DisplayImage};
use crate::image_pipeline::lessons::Lesson;
use crate::image_pipeline::output::{LessonConfig, Presenter, RasterWriter};
use crate::image_pipeline::pipeline::LessonPipeline;
use crate::image_pipeline::raster::{Raster, RasterReader, ReadMode};

fn gradient(width: usize, height: usize, channels: usize) -> Raster {
    let data = (0..width * height * channels).map(|i| (i * 7 % 256) as u8).collect();
    Raster {
        width,
        height,
        channels,
        data,
    }
}

struct MockReader {
    should_fail: bool,
    width: usize,
    height: usize,
    channels: usize,
    truncate_by: usize,
    reads: Arc<Mutex<Vec<ReadMode>>>,
}

impl MockReader {
    fn ok(width: usize, height: usize) -> Self {
        Self {
            should_fail: false,
            width,
            height,
            channels: 3,
            truncate_by: 0,
            reads: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl RasterReader for MockReader {
    fn read_raster(&self, _data: &[u8], mode: ReadMode) -> Result<Raster> {
        self.reads.lock().unwrap().push(mode);
        if self.should_fail {
            return Err(ConversionError::DecodeError("Mock decode error".to_string()));
        }
        let mut raster = gradient(self.width, self.height, self.channels);
        let len = raster.data.len().saturating_sub(self.truncate_by);
        raster.data.truncate(len);
        Ok(raster)
    }
}

struct MockWriter {
    should_fail: bool,
    written: Arc<Mutex<Vec<(DisplayFormat, usize, usize)>>>,
}

impl RasterWriter for MockWriter {
    fn extension(&self) -> &'static str {
        "mock"
    }

    fn write_image(&self, image: &DisplayImage, output: &mut dyn Write, _config: &LessonConfig) -> Result<()> {
        if self.should_fail {
            return Err(ConversionError::EncodeError("Mock encode error".to_string()));
        }
        output.write_all(&image.to_packed())?;
        self.written
            .lock()
            .unwrap()
            .push((image.format(), image.width(), image.height()));
        Ok(())
    }
}

#[derive(Default)]
struct RecordingPresenter {
    windows: Vec<(String, DisplayFormat)>,
    statuses: Vec<String>,
}

impl Presenter for RecordingPresenter {
    fn show(&mut self, window: &str, image: &DisplayImage) -> Result<()> {
        self.windows.push((window.to_string(), image.format()));
        Ok(())
    }

    fn set_status(&mut self, text: &str) {
        self.statuses.push(text.to_string());
    }
}

fn mock_writer() -> (MockWriter, Arc<Mutex<Vec<(DisplayFormat, usize, usize)>>>) {
    let written = Arc::new(Mutex::new(Vec::new()));
    (
        MockWriter {
            should_fail: false,
            written: written.clone(),
        },
        written,
    )
}

#[test]
fn test_runs_every_input_lesson() {
    let (writer, _) = mock_writer();
    let pipeline = LessonPipeline::with_custom(MockReader::ok(16, 12), writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();

    let report = pipeline.run(b"fake image data", &mut presenter).unwrap();

    assert_eq!(report.completed.len(), 11);
    assert!(report.skipped.is_empty());
    assert!(!report.completed.contains(&Lesson::Imwrite));
    assert_eq!(report.completed.first(), Some(&Lesson::Imread));
    assert_eq!(report.completed.last(), Some(&Lesson::ContrastStretch));
    assert_eq!(presenter.statuses.len(), 11);
}

#[test]
fn test_windows_are_prefixed_by_lesson() {
    let (writer, _) = mock_writer();
    let pipeline = LessonPipeline::with_custom(MockReader::ok(8, 8), writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();
    pipeline.run(b"fake", &mut presenter).unwrap();

    let names: Vec<&str> = presenter.windows.iter().map(|(n, _)| n.as_str()).collect();
    assert!(names.contains(&"02 normal step"));
    assert!(names.contains(&"02 wrong step"));
    assert!(names.contains(&"06 Gamma Result"));
    assert!(names.contains(&"10 Inverted"));
    assert!(names.iter().all(|n| !n.starts_with("01")));
}

#[test]
fn test_color_lessons_display_as_rgb() {
    let (writer, _) = mock_writer();
    let pipeline = LessonPipeline::with_custom(MockReader::ok(8, 8), writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();
    pipeline.run(b"fake", &mut presenter).unwrap();

    let format_of = |name: &str| {
        presenter
            .windows
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| *f)
    };
    assert_eq!(format_of("09 Original"), Some(DisplayFormat::Rgb888));
    assert_eq!(format_of("11 Binary"), Some(DisplayFormat::Grayscale8));
    assert_eq!(format_of("02 wrong step"), Some(DisplayFormat::Grayscale8));
}

#[test]
fn test_reader_failure() {
    let (writer, _) = mock_writer();
    let reader = MockReader {
        should_fail: true,
        ..MockReader::ok(8, 8)
    };
    let pipeline = LessonPipeline::with_custom(reader, writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();

    let result = pipeline.run(b"fake", &mut presenter);

    assert!(matches!(result, Err(ConversionError::DecodeError(_))));
    assert!(presenter.windows.is_empty());
}

#[test]
fn test_dimension_validation() {
    let (writer, _) = mock_writer();
    let config = LessonConfig::builder()
        .validate_dimensions(true)
        .max_dimension(Some(4))
        .build();
    let pipeline = LessonPipeline::with_custom(MockReader::ok(8, 8), writer, config);
    let mut presenter = RecordingPresenter::default();

    let result = pipeline.run(b"fake", &mut presenter);

    assert!(matches!(result, Err(ConversionError::InvalidDimensions(8, 8))));
}

#[test]
fn test_dimension_validation_disabled() {
    let (writer, _) = mock_writer();
    let config = LessonConfig::builder()
        .validate_dimensions(false)
        .max_dimension(Some(4))
        .build();
    let pipeline = LessonPipeline::with_custom(MockReader::ok(8, 8), writer, config);
    let mut presenter = RecordingPresenter::default();

    assert!(pipeline.run(b"fake", &mut presenter).is_ok());
}

#[test]
fn test_input_is_decoded_once() {
    let (writer, _) = mock_writer();
    let reader = MockReader::ok(8, 8);
    let reads = reader.reads.clone();
    let pipeline = LessonPipeline::with_custom(reader, writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();

    pipeline.run(b"fake", &mut presenter).unwrap();

    assert_eq!(reads.lock().unwrap().as_slice(), &[ReadMode::Unchanged]);
}

#[test]
fn test_bgra_input_runs_every_lesson() {
    let (writer, _) = mock_writer();
    let reader = MockReader {
        channels: 4,
        ..MockReader::ok(8, 8)
    };
    let pipeline = LessonPipeline::with_custom(reader, writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();

    let report = pipeline.run(b"fake", &mut presenter).unwrap();

    assert_eq!(report.completed.len(), 11);
    let canvas = presenter
        .windows
        .iter()
        .find(|(n, _)| n == "03 OpenCV Named Window")
        .map(|(_, f)| *f);
    assert_eq!(canvas, Some(DisplayFormat::Rgba8888));
}

#[test]
fn test_truncated_raster_from_reader_is_layout_error() {
    let (writer, _) = mock_writer();
    let reader = MockReader {
        truncate_by: 5,
        ..MockReader::ok(8, 8)
    };
    let pipeline = LessonPipeline::with_custom(reader, writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();

    let result = pipeline.run(b"fake", &mut presenter);

    assert!(matches!(result, Err(ConversionError::InvalidLayout { .. })));
    assert!(presenter.windows.is_empty());
}

#[test]
fn test_two_channel_input_is_unsupported() {
    let (writer, _) = mock_writer();
    let reader = MockReader {
        channels: 2,
        ..MockReader::ok(8, 8)
    };
    let pipeline = LessonPipeline::with_custom(reader, writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();

    let result = pipeline.run(b"fake", &mut presenter);

    assert!(matches!(result, Err(ConversionError::UnsupportedFormat { channels: 2, .. })));
}

#[test]
fn test_imwrite_encodes_gradient() {
    let (writer, written) = mock_writer();
    let pipeline = LessonPipeline::with_custom(MockReader::ok(8, 8), writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();
    let mut output = Cursor::new(Vec::new());

    pipeline.run_imwrite(&mut output, &mut presenter).unwrap();

    assert_eq!(
        written.lock().unwrap().as_slice(),
        &[(DisplayFormat::Rgba8888, 640, 480)]
    );
    assert_eq!(output.get_ref().len(), 640 * 480 * 4);
    // first pixel is BGRA [0, 0, 255, 200] reordered to RGBA
    assert_eq!(&output.get_ref()[..4], &[255, 0, 0, 200]);
    assert_eq!(presenter.statuses, vec!["Saved: generated_from_imwrite.mock".to_string()]);
}

#[test]
fn test_writer_failure() {
    let written = Arc::new(Mutex::new(Vec::new()));
    let writer = MockWriter {
        should_fail: true,
        written: written.clone(),
    };
    let pipeline = LessonPipeline::with_custom(MockReader::ok(8, 8), writer, LessonConfig::default());
    let mut presenter = RecordingPresenter::default();
    let mut output = Cursor::new(Vec::new());

    let result = pipeline.run_imwrite(&mut output, &mut presenter);

    assert!(matches!(result, Err(ConversionError::EncodeError(_))));
    assert!(written.lock().unwrap().is_empty());
    assert!(presenter.windows.is_empty());
}

#[test]
fn test_run_file_missing_input_still_writes_generated_image() {
    let dir = tempfile::tempdir().unwrap();
    let config = LessonConfig::builder()
        .input_path(dir.path().join("missing.jpg"))
        .output_dir(dir.path().join("out"))
        .build();
    let pipeline = LessonPipeline::new(config);

    let result = pipeline.run_file();

    assert!(matches!(result, Err(ConversionError::InputReadError(_))));
    assert!(dir.path().join("out").join("generated_from_imwrite.png").exists());
}

#[test]
fn test_run_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("input.png");
    let image = image::RgbImage::from_fn(24, 16, |x, y| {
        image::Rgb([(x * 10) as u8, (y * 15) as u8, 128])
    });
    image.save(&input_path).unwrap();

    let config = LessonConfig::builder()
        .input_path(&input_path)
        .output_dir(dir.path().join("out"))
        .build();
    let pipeline = LessonPipeline::new(config);

    let report = pipeline.run_file().unwrap();

    assert_eq!(report.completed, Lesson::ALL.to_vec());
    let out = dir.path().join("out");
    assert!(out.join("generated_from_imwrite.png").exists());
    assert!(out.join("02_wrong_step.png").exists());
    assert!(out.join("12_contrast_stretched.png").exists());
}

#[test]
fn test_config_access() {
    let mut pipeline = LessonPipeline::new(LessonConfig::default());
    assert_eq!(pipeline.config().wrong_step_padding, 16);

    let config = LessonConfig::builder().wrong_step_padding(32).build();
    pipeline.set_config(config);
    assert_eq!(pipeline.config().wrong_step_padding, 32);
}
