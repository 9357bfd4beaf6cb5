//! Mouse drawing on a displayed image.
//!
//! The windowing side forwards pointer events to a [`MouseHandler`] synchronously;
//! the handler owns all drawing state, so nothing outlives the session.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::display::DisplayImage;

pub const CANVAS_WINDOW: &str = "OpenCV Named Window";
pub const MIN_BRUSH_THICKNESS: u32 = 1;
pub const MAX_BRUSH_THICKNESS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEvent {
    Move,
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    MiddleDown,
    MiddleUp,
    LeftDoubleClick,
    RightDoubleClick,
    MiddleDoubleClick,
}

impl MouseEvent {
    pub fn describe(self) -> &'static str {
        match self {
            MouseEvent::Move => "move",
            MouseEvent::LeftDown => "left button down",
            MouseEvent::LeftUp => "left button up",
            MouseEvent::RightDown => "right button down",
            MouseEvent::RightUp => "right button up",
            MouseEvent::MiddleDown => "middle button down",
            MouseEvent::MiddleUp => "middle button up",
            MouseEvent::LeftDoubleClick => "left double click",
            MouseEvent::RightDoubleClick => "right double click",
            MouseEvent::MiddleDoubleClick => "middle double click",
        }
    }
}

pub trait MouseHandler {
    fn on_mouse(&mut self, event: MouseEvent, x: i32, y: i32, flags: u32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushColor {
    Red,
    Green,
    Blue,
}

impl BrushColor {
    pub fn rgba(self) -> Rgba<u8> {
        match self {
            BrushColor::Red => Rgba([255, 0, 0, 255]),
            BrushColor::Green => Rgba([0, 255, 0, 255]),
            BrushColor::Blue => Rgba([0, 0, 255, 255]),
        }
    }
}

pub struct CanvasSession {
    original: RgbaImage,
    canvas: RgbaImage,
    brush: BrushColor,
    thickness: u32,
    drawing: bool,
    last_point: (i32, i32),
    base_status: String,
    mouse_status: Option<String>,
}

impl CanvasSession {
    pub fn new(image: &DisplayImage, base_status: impl Into<String>) -> Result<Self> {
        let original = image.to_rgba_image()?;
        Ok(Self {
            canvas: original.clone(),
            original,
            brush: BrushColor::Red,
            thickness: 2,
            drawing: false,
            last_point: (0, 0),
            base_status: base_status.into(),
            mouse_status: None,
        })
    }

    pub fn set_brush(&mut self, brush: BrushColor) {
        self.brush = brush;
    }

    pub fn brush(&self) -> BrushColor {
        self.brush
    }

    /// Clamped to `1..=10`.
    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.clamp(MIN_BRUSH_THICKNESS, MAX_BRUSH_THICKNESS);
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Throws away every stroke.
    pub fn reset(&mut self) {
        self.canvas = self.original.clone();
        self.drawing = false;
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn display_image(&self) -> DisplayImage {
        DisplayImage::from_rgba_image(self.canvas.clone())
    }

    pub fn status(&self) -> String {
        match &self.mouse_status {
            Some(mouse) if self.base_status.is_empty() => mouse.clone(),
            Some(mouse) => format!("{}\n{}", self.base_status, mouse),
            None => self.base_status.clone(),
        }
    }

    /// Pins a pointer position to the canvas plus one brush radius on each side, so a
    /// stroke never walks further than the canvas is wide.
    fn clamp_point(&self, (x, y): (i32, i32)) -> (i32, i32) {
        let radius = (self.thickness / 2) as i32;
        let max_x = i32::try_from(self.canvas.width()).unwrap_or(i32::MAX).saturating_sub(1);
        let max_y = i32::try_from(self.canvas.height()).unwrap_or(i32::MAX).saturating_sub(1);
        (
            x.clamp(-radius, max_x.saturating_add(radius)),
            y.clamp(-radius, max_y.saturating_add(radius)),
        )
    }

    fn stroke(&mut self, from: (i32, i32), to: (i32, i32)) {
        let (from, to) = (self.clamp_point(from), self.clamp_point(to));
        let color = self.brush.rgba();
        if self.thickness <= 1 {
            draw_line_segment_mut(
                &mut self.canvas,
                (from.0 as f32, from.1 as f32),
                (to.0 as f32, to.1 as f32),
                color,
            );
            return;
        }

        // stamp discs along the segment for a round-capped thick line
        let radius = (self.thickness / 2) as i32;
        let (x0, y0) = (from.0 as i64, from.1 as i64);
        let (dx, dy) = (to.0 as i64 - x0, to.1 as i64 - y0);
        let steps = dx.abs().max(dy.abs()).max(1);
        for i in 0..=steps {
            // both ends are clamped, so the interpolated point fits back into i32
            let x = (x0 + dx * i / steps) as i32;
            let y = (y0 + dy * i / steps) as i32;
            draw_filled_circle_mut(&mut self.canvas, (x, y), radius, color);
        }
    }
}

impl MouseHandler for CanvasSession {
    fn on_mouse(&mut self, event: MouseEvent, x: i32, y: i32, flags: u32) {
        self.mouse_status = Some(format!(
            "Mouse event: {}  x={}  y={}  flags={}",
            event.describe(),
            x,
            y,
            flags
        ));

        match event {
            MouseEvent::LeftDown => {
                self.drawing = true;
                self.last_point = (x, y);
            }
            MouseEvent::Move if self.drawing => {
                let from = self.last_point;
                self.stroke(from, (x, y));
                self.last_point = (x, y);
            }
            MouseEvent::LeftUp => self.drawing = false,
            _ => {}
        }
    }
}
