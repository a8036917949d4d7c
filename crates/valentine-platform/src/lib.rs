//! Platform abstraction traits so `valentine-core` stays host-agnostic.
//!
//! The confetti engine talks to three collaborators: a drawing surface, a
//! per-frame callback scheduler, and a viewport-size provider. Each is a
//! trait here; `recording` holds the in-memory reference implementations
//! used by the demo binary and the test suites.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

mod recording;

pub use recording::{DrawCommand, FixedViewport, ManualScheduler, RecordingSurface};

/// Current visible drawing area, in CSS-pixel-like units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// RGBA color with components in [0, 1]. Serialized as a `#RRGGBB` /
/// `#RRGGBBAA` hex string, the form the palette is written in.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color must have 6 or 8 hex digits: {0:?}")]
    BadLength(String),
    #[error("invalid hex digit in color {0:?}")]
    BadDigit(String),
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(hex.to_owned()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::BadLength(hex.to_owned()));
        }
        // Length was counted in bytes; reject non-ASCII before slicing by
        // byte index.
        if !digits.is_ascii() {
            return Err(ColorParseError::BadDigit(hex.to_owned()));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::BadDigit(hex.to_owned()))
        };
        let r = byte(0..2)? as f32 / 255.0;
        let g = byte(2..4)? as f32 / 255.0;
        let b = byte(4..6)? as f32 / 255.0;
        let a = if digits.len() == 8 {
            byte(6..8)? as f32 / 255.0
        } else {
            1.0
        };
        Ok(Self { r, g, b, a })
    }

    pub fn to_hex(self) -> String {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        if self.a >= 1.0 {
            format!(
                "#{:02X}{:02X}{:02X}",
                quantize(self.r),
                quantize(self.g),
                quantize(self.b)
            )
        } else {
            format!(
                "#{:02X}{:02X}{:02X}{:02X}",
                quantize(self.r),
                quantize(self.g),
                quantize(self.b),
                quantize(self.a)
            )
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgba::from_hex(&hex).map_err(D::Error::custom)
    }
}

/// Translate + rotate applied around the local origin, scoped to one draw
/// call. Rotation is radians, clockwise in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawTransform {
    pub translate: Vec2,
    pub rotation: f32,
}

impl DrawTransform {
    pub fn at(translate: Vec2, rotation: f32) -> Self {
        Self { translate, rotation }
    }
}

/// Fill color and global opacity for a single draw call. Opacity must not
/// leak into other draw calls or later frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintStyle {
    pub color: Rgba,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Vec2),
    CubicTo { c1: Vec2, c2: Vec2, to: Vec2 },
    Close,
}

/// A fillable path built from move/cubic segments, in local coordinates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Vec2::new(x, y)));
        self
    }

    pub fn cubic_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            c1: Vec2::new(c1x, c1y),
            c2: Vec2::new(c2x, c2y),
            to: Vec2::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Every on-curve and control point in the path, in insertion order.
    pub fn points(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.commands.iter().flat_map(|command| match command {
            PathCommand::MoveTo(p) => vec![*p],
            PathCommand::CubicTo { c1, c2, to } => vec![*c1, *c2, *to],
            PathCommand::Close => vec![],
        })
    }
}

/// Opaque registration handle for a scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// A drawing surface the engine renders into. Fill operations take the
/// per-call transform and paint style; `resize` implicitly clears any
/// drawn content.
pub trait DrawSurface {
    fn resize(&mut self, viewport: Viewport);
    fn clear(&mut self);
    fn fill_circle(&mut self, transform: DrawTransform, style: PaintStyle, radius: f32);
    /// Axis-aligned (pre-transform) rectangle centered on the local origin.
    fn fill_rect(&mut self, transform: DrawTransform, style: PaintStyle, half_extent: Vec2);
    fn fill_polygon(&mut self, transform: DrawTransform, style: PaintStyle, points: &[Vec2]);
    fn fill_path(&mut self, transform: DrawTransform, style: PaintStyle, path: &Path);
}

/// Per-frame callback scheduler. Each scheduled handle fires at most once;
/// `cancel` discards a handle that has not fired yet.
pub trait FrameScheduler {
    fn schedule_next_frame(&mut self) -> FrameHandle;
    fn cancel(&mut self, handle: FrameHandle);
}

/// Source of the current viewport dimensions.
pub trait ViewportProvider {
    fn viewport(&self) -> Viewport;
}

// The engine runs single-threaded and frame-driven, so collaborators are
// shared with the host through Rc<RefCell<_>> rather than Send + Sync
// trait objects.

impl<S: DrawSurface> DrawSurface for Rc<RefCell<S>> {
    fn resize(&mut self, viewport: Viewport) {
        self.borrow_mut().resize(viewport);
    }

    fn clear(&mut self) {
        self.borrow_mut().clear();
    }

    fn fill_circle(&mut self, transform: DrawTransform, style: PaintStyle, radius: f32) {
        self.borrow_mut().fill_circle(transform, style, radius);
    }

    fn fill_rect(&mut self, transform: DrawTransform, style: PaintStyle, half_extent: Vec2) {
        self.borrow_mut().fill_rect(transform, style, half_extent);
    }

    fn fill_polygon(&mut self, transform: DrawTransform, style: PaintStyle, points: &[Vec2]) {
        self.borrow_mut().fill_polygon(transform, style, points);
    }

    fn fill_path(&mut self, transform: DrawTransform, style: PaintStyle, path: &Path) {
        self.borrow_mut().fill_path(transform, style, path);
    }
}

impl<F: FrameScheduler> FrameScheduler for Rc<RefCell<F>> {
    fn schedule_next_frame(&mut self) -> FrameHandle {
        self.borrow_mut().schedule_next_frame()
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.borrow_mut().cancel(handle);
    }
}

impl<V: ViewportProvider> ViewportProvider for Rc<RefCell<V>> {
    fn viewport(&self) -> Viewport {
        self.borrow().viewport()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parse_round_trips_palette_form() {
        let gold = Rgba::from_hex("#FFD700").unwrap();
        assert_eq!(gold.to_hex(), "#FFD700");
        assert!((gold.g - 215.0 / 255.0).abs() < 1e-6);
        assert_eq!(gold.a, 1.0);
    }

    #[test]
    fn hex_parse_accepts_alpha_digits() {
        let translucent = Rgba::from_hex("#FF149380").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(translucent.to_hex(), "#FF149380");
    }

    #[test]
    fn hex_parse_rejects_malformed_input() {
        assert_eq!(
            Rgba::from_hex("FFD700"),
            Err(ColorParseError::MissingHash("FFD700".into()))
        );
        assert_eq!(
            Rgba::from_hex("#FFD7"),
            Err(ColorParseError::BadLength("#FFD7".into()))
        );
        assert_eq!(
            Rgba::from_hex("#GGD700"),
            Err(ColorParseError::BadDigit("#GGD700".into()))
        );
    }

    #[test]
    fn hex_parse_rejects_multibyte_input_of_matching_byte_length() {
        // "€€" is six bytes, so it passes the length check; it must come
        // back as a digit error rather than hitting a char boundary.
        assert_eq!(
            Rgba::from_hex("#€€"),
            Err(ColorParseError::BadDigit("#€€".into()))
        );
        assert_eq!(
            Rgba::from_hex("#FF00€€€€"),
            Err(ColorParseError::BadLength("#FF00€€€€".into()))
        );
    }

    #[test]
    fn path_collects_all_points() {
        let path = Path::new()
            .move_to(0.0, 1.0)
            .cubic_to(1.0, 1.0, 2.0, 2.0, 3.0, 3.0)
            .close();
        let points: Vec<Vec2> = path.points().collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Vec2::new(0.0, 1.0));
        assert_eq!(points[3], Vec2::new(3.0, 3.0));
    }
}
