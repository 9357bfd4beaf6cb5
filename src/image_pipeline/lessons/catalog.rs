/// Every lesson, in teaching order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lesson {
    Imwrite,
    Imread,
    NamedWindow,
    Morphology,
    ErosionBoundary,
    GrayTransform,
    Histogram,
    Truncation,
    ColorAdjust,
    Invert,
    Threshold,
    ContrastStretch,
}

impl Lesson {
    pub const ALL: [Lesson; 12] = [
        Lesson::Imwrite,
        Lesson::Imread,
        Lesson::NamedWindow,
        Lesson::Morphology,
        Lesson::ErosionBoundary,
        Lesson::GrayTransform,
        Lesson::Histogram,
        Lesson::Truncation,
        Lesson::ColorAdjust,
        Lesson::Invert,
        Lesson::Threshold,
        Lesson::ContrastStretch,
    ];

    /// 1-based position in the course.
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|&l| l == self).map_or(0, |i| i + 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            Lesson::Imwrite => "imwrite: generate and save an image",
            Lesson::Imread => "imread: read and display an image",
            Lesson::NamedWindow => "namedWindow: window display and mouse drawing",
            Lesson::Morphology => "Trackbars: erosion and dilation",
            Lesson::ErosionBoundary => "Erosion: boundary extraction",
            Lesson::GrayTransform => "Point operations: gamma transform",
            Lesson::Histogram => "Point operations: histogram equalization",
            Lesson::Truncation => "Point operations: truncation",
            Lesson::ColorAdjust => "Point operations: saturation and colour",
            Lesson::Invert => "Point operations: inversion",
            Lesson::Threshold => "Point operations: binarization",
            Lesson::ContrastStretch => "Point operations: contrast stretching",
        }
    }

    /// Whether the lesson works on an image loaded from disk.
    pub fn needs_input(self) -> bool {
        !matches!(self, Lesson::Imwrite)
    }
}
