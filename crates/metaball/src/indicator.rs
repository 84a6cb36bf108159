use crate::circle::Circle;
use crate::layout::{Bounds, DotLayout};
use crate::metaball::Metaball;
use crate::pager::PageEvent;
use crate::plan::{Ink, RenderPlan};
use crate::settings::IndicatorSettings;

/// Render state of a page indicator: a row of dots and a cursor that blends
/// into whichever dot is connected to it.
///
/// Every entry point is a state transition followed by the recompute it
/// implies; `frame` is a pure read.
#[derive(Debug, Clone)]
pub struct Indicator {
    settings: IndicatorSettings,
    dot_count: usize,
    bounds: Bounds,
    layout: DotLayout,
    cursor: Circle,
    progress: f32,
    connected_index: i32,
    metaball: Metaball,
}

impl Indicator {
    pub fn new(settings: IndicatorSettings) -> Self {
        let settings = settings.sanitized();
        let mut indicator = Self {
            settings,
            dot_count: settings.dot_count(),
            bounds: Bounds {
                padding: settings.padding,
                ..Default::default()
            },
            layout: DotLayout::default(),
            cursor: Circle::default(),
            progress: 0.0,
            connected_index: 0,
            metaball: Metaball::new(settings.tuning(), 0.0),
        };
        indicator.relayout();
        indicator
    }

    /// Applies new tunables. The dot count is left alone: once a page source
    /// is attached it owns the count.
    pub fn reconfigure(&mut self, settings: IndicatorSettings) {
        self.settings = settings.sanitized();
        self.bounds.padding = self.settings.padding;
        self.metaball.tuning = self.settings.tuning();
        self.relayout();
    }

    pub fn on_bounds_changed(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.relayout();
    }

    /// Negative counts are treated as zero.
    pub fn on_count_changed(&mut self, count: i32) {
        let count = usize::try_from(count).unwrap_or_else(|_| {
            log::warn!("Ignoring negative dot count {}", count);
            0
        });
        if count != self.dot_count {
            self.dot_count = count;
            self.relayout();
        }
    }

    pub fn on_progress_changed(&mut self, progress: f32) {
        if !progress.is_finite() {
            log::warn!("Ignoring non-finite progress {}", progress);
            return;
        }
        self.progress = progress;
        self.move_cursor();
    }

    pub fn on_connection_changed(&mut self, index: i32) {
        if index != self.connected_index {
            log::debug!("Cursor connected to dot {}", index);
        }
        self.connected_index = index;
    }

    pub fn on_scrolled(&mut self, page: i32, offset: f32) {
        self.on_progress_changed(page as f32 + offset);
    }

    pub fn on_selection_changed(&mut self, page: i32) {
        self.on_connection_changed(page);
    }

    pub fn apply(&mut self, event: &PageEvent) {
        match *event {
            PageEvent::Scrolled { page, offset } => self.on_scrolled(page, offset),
            PageEvent::Selected(page) => self.on_selection_changed(page),
            PageEvent::CountChanged(count) => self.on_count_changed(count),
        }
    }

    pub fn settings(&self) -> &IndicatorSettings {
        &self.settings
    }

    pub fn dot_count(&self) -> usize {
        self.dot_count
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn connected_index(&self) -> i32 {
        self.connected_index
    }

    /// The connected dot, if the index points at one.
    pub fn connection(&self) -> Option<usize> {
        usize::try_from(self.connected_index)
            .ok()
            .filter(|&i| i < self.dot_count)
    }

    pub fn cursor(&self) -> Circle {
        self.cursor
    }

    pub fn dots(&self) -> &[Circle] {
        &self.layout.dots
    }

    pub fn preferred_size(&self) -> (f32, f32) {
        DotLayout::preferred_size(self.dot_count, self.settings.dot_radius)
    }

    /// Draw list for the current state.
    pub fn frame(&self) -> RenderPlan {
        let connected = self.connection();
        let mut plan = RenderPlan::new();
        for (i, dot) in self.layout.dots.iter().enumerate() {
            if connected == Some(i) {
                plan.append(self.metaball.blend(&self.cursor, dot));
            } else {
                plan.fill_circle(*dot, Ink::Unselected);
            }
        }
        plan
    }

    fn relayout(&mut self) {
        self.layout
            .update(&self.bounds, self.dot_count, self.settings.dot_radius);
        self.metaball.max_length = self.layout.spacing;
        log::debug!(
            "Laid out {} dots in {}x{}, spacing {}",
            self.dot_count,
            self.bounds.width,
            self.bounds.height,
            self.layout.spacing
        );
        self.move_cursor();
    }

    fn move_cursor(&mut self) {
        let center = self.layout.cursor_center(self.progress);
        self.cursor = Circle::new(center.x, center.y, self.layout.cursor_radius);
    }
}
