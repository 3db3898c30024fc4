//! Visual state of the drill-down overlay: resizable width, vertical offset
//! below the navigation bar, and the slide-in transition.
//!
//! None of this feeds back into history, focus or tab state.

use greenroom_core::config::OverlayConfig;
use greenroom_tui_adapter::render::Rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLayout {
    width: usize,
    min_width: usize,
    max_width: usize,
    width_step: usize,
    top_offset: usize,
}

impl OverlayLayout {
    #[must_use]
    pub fn from_config(config: &OverlayConfig) -> Self {
        let mut layout = Self {
            width: config.default_width,
            min_width: config.min_width,
            max_width: config.max_width.max(config.min_width),
            width_step: config.width_step.max(1),
            top_offset: config.nav_bar_height,
        };
        layout.set_width(config.default_width);
        layout
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn top_offset(&self) -> usize {
        self.top_offset
    }

    pub fn set_width(&mut self, width: usize) {
        self.width = width.clamp(self.min_width, self.max_width);
    }

    pub fn grow(&mut self) {
        self.set_width(self.width.saturating_add(self.width_step));
    }

    pub fn shrink(&mut self) {
        self.set_width(self.width.saturating_sub(self.width_step));
    }

    /// Recompute the vertical offset after the navigation bar re-laid out.
    pub fn set_nav_bar_height(&mut self, rows: usize) {
        self.top_offset = rows;
    }

    /// Overlay rect on `screen`, pushed right by `slide` cells mid-transition.
    #[must_use]
    pub fn place(&self, screen: Rect, slide: usize) -> Rect {
        screen.right_anchored(self.width, self.top_offset, slide)
    }
}

/// Ease-out cubic: fast start, smooth deceleration.
fn ease_out_cubic(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Tick-driven slide-in, restarted whenever the shown entry changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideTransition {
    total_ticks: u32,
    elapsed: u32,
    reduced_motion: bool,
}

impl SlideTransition {
    #[must_use]
    pub fn new(total_ticks: u32, reduced_motion: bool) -> Self {
        Self {
            total_ticks,
            elapsed: total_ticks,
            reduced_motion,
        }
    }

    #[must_use]
    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(config.slide_ticks, config.reduced_motion)
    }

    pub fn restart(&mut self) {
        self.elapsed = if self.reduced_motion { self.total_ticks } else { 0 };
    }

    /// Advance one tick; returns whether the transition is still running.
    pub fn tick(&mut self) -> bool {
        if self.elapsed < self.total_ticks {
            self.elapsed += 1;
        }
        self.is_active()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.elapsed < self.total_ticks
    }

    /// Cells the overlay is still displaced to the right, out of `width`.
    #[must_use]
    pub fn offset(&self, width: usize) -> usize {
        if !self.is_active() {
            return 0;
        }
        let t = f64::from(self.elapsed) / f64::from(self.total_ticks);
        let remaining = 1.0 - ease_out_cubic(t);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let cells = (width as f64 * remaining).round() as usize;
        cells.min(width)
    }
}

#[cfg(test)]
mod tests {
    use greenroom_core::config::OverlayConfig;
    use greenroom_tui_adapter::render::Rect;

    use super::{OverlayLayout, SlideTransition};

    fn config() -> OverlayConfig {
        OverlayConfig {
            default_width: 40,
            min_width: 32,
            max_width: 48,
            width_step: 6,
            nav_bar_height: 3,
            reduced_motion: false,
            slide_ticks: 4,
        }
    }

    #[test]
    fn width_is_clamped_while_resizing() {
        let mut layout = OverlayLayout::from_config(&config());
        layout.grow();
        assert_eq!(layout.width(), 46);
        layout.grow();
        assert_eq!(layout.width(), 48);
        for _ in 0..10 {
            layout.shrink();
        }
        assert_eq!(layout.width(), 32);
    }

    #[test]
    fn default_width_outside_bounds_is_clamped() {
        let mut cfg = config();
        cfg.default_width = 500;
        assert_eq!(OverlayLayout::from_config(&cfg).width(), 48);
    }

    #[test]
    fn placement_sits_below_nav_bar_on_the_right() {
        let mut layout = OverlayLayout::from_config(&config());
        let screen = Rect::new(0, 0, 100, 30);
        assert_eq!(layout.place(screen, 0), Rect::new(60, 3, 40, 27));

        layout.set_nav_bar_height(1);
        assert_eq!(layout.place(screen, 0).y, 1);
    }

    #[test]
    fn slide_eases_in_and_settles() {
        let mut slide = SlideTransition::new(4, false);
        assert_eq!(slide.offset(40), 0);
        slide.restart();
        let mut offsets = vec![slide.offset(40)];
        while slide.tick() {
            offsets.push(slide.offset(40));
        }
        offsets.push(slide.offset(40));
        assert_eq!(offsets.first(), Some(&40));
        assert_eq!(offsets.last(), Some(&0));
        assert!(offsets.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[test]
    fn reduced_motion_is_instant() {
        let mut slide = SlideTransition::new(6, true);
        slide.restart();
        assert!(!slide.is_active());
        assert_eq!(slide.offset(64), 0);
    }
}
