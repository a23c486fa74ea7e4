//! Scroll-bound progress source.

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Maps the position of a tall scroll section to a progress value in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct ScrollProgress {
    section_height: f32,
    viewport: Viewport,
    /// Top edge of the section relative to the viewport; negative once
    /// scrolled past.
    section_top: f32,
    progress: f32,
}

impl ScrollProgress {
    pub fn new(section_height: f32, viewport: Viewport) -> Self {
        Self {
            section_height,
            viewport,
            section_top: 0.0,
            progress: 0.0,
        }
    }

    /// Distance the section can scroll while pinned, floored at one pixel.
    pub fn scrollable_range(&self) -> f32 {
        (self.section_height - self.viewport.height).max(1.0)
    }

    pub fn scrolled(&self) -> f32 {
        (-self.section_top).clamp(0.0, self.scrollable_range())
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_section_top(&mut self, section_top: f32) -> f32 {
        self.section_top = section_top;
        self.recompute()
    }

    pub fn resize(&mut self, viewport: Viewport, section_height: f32) -> f32 {
        self.viewport = viewport;
        self.section_height = section_height;
        self.recompute()
    }

    fn recompute(&mut self) -> f32 {
        let progress = self.scrolled() / self.scrollable_range();
        self.progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.progress
    }
}
