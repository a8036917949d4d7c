//! In-memory reference implementations of the platform traits.
//!
//! `RecordingSurface` models surface *content*: fills append commands,
//! `clear`/`resize` wipe them. Monotonic counters survive wipes so tests
//! can assert that nothing was drawn after a `stop`.

use glam::Vec2;
use tracing::trace;

use crate::{
    DrawSurface, DrawTransform, FrameHandle, FrameScheduler, PaintStyle, Path, Viewport,
    ViewportProvider,
};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Circle {
        transform: DrawTransform,
        style: PaintStyle,
        radius: f32,
    },
    Rect {
        transform: DrawTransform,
        style: PaintStyle,
        half_extent: Vec2,
    },
    Polygon {
        transform: DrawTransform,
        style: PaintStyle,
        points: Vec<Vec2>,
    },
    Path {
        transform: DrawTransform,
        style: PaintStyle,
        path: Path,
    },
}

/// Command-recording draw surface.
#[derive(Debug)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
    clear_count: u64,
    fill_count: u64,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            clear_count: 0,
            fill_count: 0,
        }
    }

    /// Commands currently visible on the surface (since the last clear).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Total clears ever issued, including those implied by `resize`.
    pub fn clear_count(&self) -> u64 {
        self.clear_count
    }

    /// Total fill operations ever issued.
    pub fn fill_count(&self) -> u64 {
        self.fill_count
    }

    fn push(&mut self, command: DrawCommand) {
        self.fill_count += 1;
        self.commands.push(command);
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        trace!(width = viewport.width, height = viewport.height, "surface resized");
        self.viewport = viewport;
        self.clear_count += 1;
        self.commands.clear();
    }

    fn clear(&mut self) {
        self.clear_count += 1;
        self.commands.clear();
    }

    fn fill_circle(&mut self, transform: DrawTransform, style: PaintStyle, radius: f32) {
        self.push(DrawCommand::Circle {
            transform,
            style,
            radius,
        });
    }

    fn fill_rect(&mut self, transform: DrawTransform, style: PaintStyle, half_extent: Vec2) {
        self.push(DrawCommand::Rect {
            transform,
            style,
            half_extent,
        });
    }

    fn fill_polygon(&mut self, transform: DrawTransform, style: PaintStyle, points: &[Vec2]) {
        self.push(DrawCommand::Polygon {
            transform,
            style,
            points: points.to_vec(),
        });
    }

    fn fill_path(&mut self, transform: DrawTransform, style: PaintStyle, path: &Path) {
        self.push(DrawCommand::Path {
            transform,
            style,
            path: path.clone(),
        });
    }
}

/// Frame scheduler pumped explicitly by the host: each `take_due` hands
/// back the oldest still-registered handle exactly once.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending handle, removed from the registration list so it
    /// cannot fire twice.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule_next_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
    }
}

/// Viewport provider backed by a plain value; `set` simulates a
/// viewport-change event from the host environment.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport {
    viewport: Viewport,
}

impl FixedViewport {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn set(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;

    fn style() -> PaintStyle {
        PaintStyle {
            color: Rgba::new(1.0, 0.0, 0.0, 1.0),
            alpha: 1.0,
        }
    }

    #[test]
    fn clear_wipes_content_but_keeps_totals() {
        let mut surface = RecordingSurface::new(Viewport::new(100.0, 100.0));
        surface.fill_circle(DrawTransform::at(Vec2::ZERO, 0.0), style(), 4.0);
        assert_eq!(surface.commands().len(), 1);

        surface.clear();
        assert!(surface.commands().is_empty());
        assert_eq!(surface.fill_count(), 1);
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn resize_updates_viewport_and_clears() {
        let mut surface = RecordingSurface::new(Viewport::new(100.0, 100.0));
        surface.fill_rect(DrawTransform::at(Vec2::ZERO, 0.0), style(), Vec2::splat(2.0));
        surface.resize(Viewport::new(640.0, 480.0));
        assert_eq!(surface.viewport(), Viewport::new(640.0, 480.0));
        assert!(surface.commands().is_empty());
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn scheduler_fires_each_handle_once_in_order() {
        let mut scheduler = ManualScheduler::new();
        let first = scheduler.schedule_next_frame();
        let second = scheduler.schedule_next_frame();
        assert_ne!(first, second);
        assert_eq!(scheduler.take_due(), Some(first));
        assert_eq!(scheduler.take_due(), Some(second));
        assert_eq!(scheduler.take_due(), None);
    }

    #[test]
    fn cancelled_handle_never_fires() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule_next_frame();
        scheduler.cancel(handle);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(scheduler.take_due(), None);
    }
}
