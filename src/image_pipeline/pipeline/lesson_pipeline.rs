use tracing::{info, instrument, warn};
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::image_pipeline::{
    common::error::{ConversionError, Result},
    display::{DisplayImage, to_display_image},
    lessons::{
        self, BoundarySession, CanvasSession, GammaSession, Lesson, MorphologyMode,
        MorphologySession, boundary::BOUNDARY_WINDOW, canvas::CANVAS_WINDOW,
        gamma::GAMMA_WINDOW, imread, imwrite, morphology::MORPHOLOGY_WINDOW, show_raster,
    },
    output::{DirectoryPresenter, LessonConfig, PngWriter, Presenter, RasterWriter},
    raster::{ImageCrateReader, Raster, RasterReader, ReadMode},
};

/// What a run did, lesson by lesson.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LessonReport {
    pub completed: Vec<Lesson>,
    pub skipped: Vec<Lesson>,
}

/// The three shapes the lessons read the input in.
struct DecodedInput {
    unchanged: Raster,
    color: Raster,
    gray: Raster,
}

impl DecodedInput {
    /// Color and gray come from the one decoded raster.
    fn derive(unchanged: Raster) -> Result<Self> {
        Ok(Self {
            color: unchanged.to_color()?,
            gray: unchanged.to_grayscale()?,
            unchanged,
        })
    }
}

pub struct LessonPipeline<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: LessonConfig,
}

impl LessonPipeline<ImageCrateReader, PngWriter> {
    pub fn new(config: LessonConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            writer: PngWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> LessonPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: LessonConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(ConversionError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Generates the gradient test card, encodes it into `output` and shows it.
    #[instrument(skip(self, output, presenter))]
    pub fn run_imwrite(&self, output: &mut dyn Write, presenter: &mut dyn Presenter) -> Result<()> {
        let raster = imwrite::generate_gradient(imwrite::GRADIENT_WIDTH, imwrite::GRADIENT_HEIGHT);
        let image = to_display_image(&raster.as_buffer()?)?;

        {
            let _span = tracing::info_span!("encode_generated").entered();
            self.writer.write_image(&image, output, &self.config)?;
        }

        presenter.show(imwrite::GENERATED_WINDOW, &image)?;
        presenter.set_status(&format!(
            "Saved: {}.{}",
            imwrite::GENERATED_WINDOW,
            self.writer.extension()
        ));
        Ok(())
    }

    /// Runs every lesson that needs an input image against `input_data`.
    #[instrument(skip(self, input_data, presenter), fields(input_size = input_data.len()))]
    pub fn run(&self, input_data: &[u8], presenter: &mut dyn Presenter) -> Result<LessonReport> {
        info!("Starting lessons");

        let unchanged = {
            let _span = tracing::info_span!("decode_input").entered();
            let raster = self.reader.read_raster(input_data, ReadMode::Unchanged)?;
            raster.as_buffer()?;
            raster
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = unchanged.width,
                height = unchanged.height
            ).entered();
            self.validate_dimensions(unchanged.width, unchanged.height)?;
        }

        let input = {
            let _span = tracing::info_span!("derive_color_and_gray", channels = unchanged.channels).entered();
            DecodedInput::derive(unchanged)?
        };

        let mut report = LessonReport::default();
        for lesson in Lesson::ALL.into_iter().filter(|l| l.needs_input()) {
            let _span = tracing::info_span!("lesson", number = lesson.number(), title = lesson.title()).entered();
            let mut scoped = ScopedPresenter::new(&mut *presenter, lesson);
            if self.run_lesson(lesson, &input, &mut scoped)? {
                report.completed.push(lesson);
            } else {
                report.skipped.push(lesson);
            }
        }

        info!(
            completed = report.completed.len(),
            skipped = report.skipped.len(),
            "Lessons complete"
        );
        Ok(report)
    }

    /// Returns `false` when the lesson had to be skipped.
    fn run_lesson(&self, lesson: Lesson, input: &DecodedInput, presenter: &mut dyn Presenter) -> Result<bool> {
        let source = self.config.input_path.display().to_string();
        match lesson {
            Lesson::Imwrite => return Ok(false),
            Lesson::Imread => {
                let Some(session) = imread::load_or_report(
                    &input.gray,
                    &source,
                    self.config.wrong_step_padding,
                    presenter,
                )?
                else {
                    return Ok(false);
                };
                presenter.show("normal step", session.correct())?;
                presenter.show("wrong step", session.wrong_step())?;
                presenter.set_status(&session.status());
            }
            Lesson::NamedWindow => {
                let image = to_display_image(&input.unchanged.as_buffer()?)?;
                let mut session = CanvasSession::new(&image, format!("Shown: {}", source))?;
                session.set_thickness(self.config.brush_thickness);
                presenter.show(CANVAS_WINDOW, &session.display_image())?;
                presenter.set_status(&session.status());
            }
            Lesson::Morphology => {
                let mut session = MorphologySession::new(input.unchanged.clone());
                session.set_erode_size(self.config.erode_size);
                session.set_dilate_size(self.config.dilate_size);
                for mode in MorphologyMode::ALL {
                    session.set_mode(mode);
                    let window = format!("{} {}", MORPHOLOGY_WINDOW, mode.label());
                    show_raster(presenter, &window, &session.render()?)?;
                }
                presenter.set_status(&format!(
                    "Shown: {}\nerode={} dilate={}",
                    source,
                    session.erode_size(),
                    session.dilate_size()
                ));
            }
            Lesson::ErosionBoundary => {
                let mut session = BoundarySession::new(&input.unchanged)?;
                session.set_erode_size(self.config.boundary_erode_size);
                show_raster(presenter, BOUNDARY_WINDOW, &session.render()?)?;
                presenter.set_status(&format!(
                    "Boundary shown: {}\nerode={}",
                    source,
                    session.erode_size()
                ));
            }
            Lesson::GrayTransform => {
                let session = GammaSession::new(input.color.to_grayscale()?, self.config.gamma_slider);
                show_raster(presenter, lessons::point::ORIGINAL_WINDOW, &input.color)?;
                show_raster(presenter, GAMMA_WINDOW, &session.render())?;
                presenter.set_status(&session.status());
            }
            Lesson::Histogram => lessons::point::histogram(&input.color, presenter)?,
            Lesson::Truncation => {
                lessons::point::truncation(&input.color, self.config.truncation_threshold, presenter)?
            }
            Lesson::ColorAdjust => {
                lessons::point::color_adjust(&input.color, self.config.color_adjust, presenter)?
            }
            Lesson::Invert => lessons::point::inversion(&input.color, presenter)?,
            Lesson::Threshold => {
                lessons::point::threshold(&input.color, self.config.binary_threshold, presenter)?
            }
            Lesson::ContrastStretch => lessons::point::stretch(&input.color, presenter)?,
        }
        Ok(true)
    }

    /// Runs the whole course with the configured input and output directory.
    ///
    /// The generated image lesson runs first and does not depend on the input file,
    /// so its output exists even when reading the input fails.
    #[instrument(skip(self))]
    pub fn run_file(&self) -> Result<LessonReport> {
        let input_path = &self.config.input_path;
        let mut presenter = DirectoryPresenter::new(&self.writer, &self.config)?;

        info!(
            input = %input_path.display(),
            output = %self.config.output_dir.display(),
            "Running lessons"
        );

        let generated_path = self.config.output_dir.join(format!(
            "{}.{}",
            imwrite::GENERATED_WINDOW,
            self.writer.extension()
        ));
        {
            let _span = tracing::info_span!("create_output_file").entered();
            let file = File::create(&generated_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", generated_path.display(), e))
            })?;
            let mut output = BufWriter::new(file);
            let mut scoped = ScopedPresenter::new(&mut presenter, Lesson::Imwrite);
            self.run_imwrite(&mut output, &mut scoped)?;
            output.flush()?;
        }

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let mut report = self.run(&input_data, &mut presenter)?;
        report.completed.insert(0, Lesson::Imwrite);
        Ok(report)
    }

    pub fn config(&self) -> &LessonConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LessonConfig) {
        self.config = config;
    }
}

/// Prefixes window names with the lesson number so lessons never overwrite each
/// other's windows.
pub struct ScopedPresenter<'a> {
    inner: &'a mut dyn Presenter,
    prefix: String,
}

impl<'a> ScopedPresenter<'a> {
    pub fn new(inner: &'a mut dyn Presenter, lesson: Lesson) -> Self {
        Self {
            inner,
            prefix: format!("{:02}", lesson.number()),
        }
    }
}

impl Presenter for ScopedPresenter<'_> {
    fn show(&mut self, window: &str, image: &DisplayImage) -> Result<()> {
        self.inner.show(&format!("{} {}", self.prefix, window), image)
    }

    fn set_status(&mut self, text: &str) {
        self.inner.set_status(text);
    }
}
