use crate::config::{Config, PaintMode};
use metaball::animation::{GLIDE_DURATION, Glide, Sweep};
use metaball::{Bounds, Indicator, Pager, PagerLink, RenderPlan};
use palette::Srgba;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Color and paint overrides from the config. `None` colors follow the theme.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DotStyle {
    pub paint_mode: PaintMode,
    pub selected: Option<Srgba<f64>>,
    pub unselected: Option<Srgba<f64>>,
}

impl DotStyle {
    pub fn from_config(config: &Config) -> Self {
        Self {
            paint_mode: config.paint_mode,
            selected: config.selected_color.map(|c| c.0),
            unselected: config.unselected_color.map(|c| c.0),
        }
    }
}

/// Everything the window shows: the indicator, the pager feeding it and any
/// running animation.
pub struct State {
    pub indicator: Rc<RefCell<Indicator>>,
    pub style: DotStyle,
    pager: Pager,
    link: Option<PagerLink>,
    glide: Option<(Glide, Instant)>,
    sweep_started: Option<Instant>,
    sweep_duration: Duration,
    animate: bool,
}

impl State {
    pub fn new(config: &Config, now: Instant) -> Self {
        let indicator = Rc::new(RefCell::new(Indicator::new(config.indicator)));
        let pager = Pager::new(indicator.borrow().dot_count());

        let mut state = Self {
            indicator,
            style: DotStyle::from_config(config),
            pager,
            link: None,
            glide: None,
            sweep_started: None,
            sweep_duration: config.sweep_duration(),
            animate: config.animate,
        };
        state.attach();
        state.set_sweep(config.animate, now);
        state
    }

    /// (Re)links the indicator to the pager, dropping any previous link.
    pub fn attach(&mut self) {
        if let Some(link) = self.link.take() {
            link.detach(&mut self.pager);
        }
        self.link = Some(PagerLink::attach(&mut self.pager, self.indicator.clone()));
    }

    pub fn detach(&mut self) {
        if let Some(link) = self.link.take() {
            link.detach(&mut self.pager);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.link.is_some()
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn reconfigure(&mut self, config: &Config) {
        self.indicator.borrow_mut().reconfigure(config.indicator);
        self.style = DotStyle::from_config(config);
        self.sweep_duration = config.sweep_duration();
        self.animate = config.animate;
    }

    /// Restarts the sweep when `animate` is configured.
    pub fn on_shown(&mut self, now: Instant) {
        if self.animate {
            self.set_sweep(true, now);
        }
    }

    pub fn on_hidden(&mut self, now: Instant) {
        self.set_sweep(false, now);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        let mut indicator = self.indicator.borrow_mut();
        let padding = indicator.settings().padding;
        indicator.on_bounds_changed(Bounds::new(width, height, padding));
    }

    pub fn set_count(&mut self, count: i32) {
        let count = usize::try_from(count).unwrap_or_else(|_| {
            log::warn!("Ignoring negative page count {}", count);
            0
        });
        self.glide = None;
        self.pager.set_count(count);
    }

    /// Selects `page` and glides the pager there.
    pub fn go_to_page(&mut self, page: i32, now: Instant) {
        let target = usize::try_from(page).unwrap_or(0).min(self.pager.last_page());
        self.sweep_started = None;
        self.pager.select(target);
        self.glide = Some((
            Glide::new(self.pager.position(), target as f32, GLIDE_DURATION),
            now,
        ));
    }

    pub fn step(&mut self, delta: i32, now: Instant) {
        let current = i32::try_from(self.pager.current()).unwrap_or(i32::MAX);
        self.go_to_page(current.saturating_add(delta), now);
    }

    /// Raw scroll signal, bypassing the pager. Offsets outside [0, 1) are
    /// passed through and extrapolate.
    pub fn scroll(&mut self, page: i32, offset: f32) {
        self.indicator.borrow_mut().on_scrolled(page, offset);
    }

    /// Raw selection signal, bypassing the pager.
    pub fn select(&mut self, page: i32) {
        self.indicator.borrow_mut().on_selection_changed(page);
    }

    pub fn set_sweep(&mut self, on: bool, now: Instant) {
        self.sweep_started = on.then_some(now);
        if on {
            self.glide = None;
        }
    }

    pub fn toggle_sweep(&mut self, now: Instant) {
        self.set_sweep(!self.is_sweeping(), now);
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweep_started.is_some()
    }

    /// Advances running animations. Returns whether anything moved.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(started) = self.sweep_started {
            let mut indicator = self.indicator.borrow_mut();
            let sweep = Sweep::new(indicator.dot_count(), self.sweep_duration);
            let progress = sweep.progress_at(now.saturating_duration_since(started));
            indicator.on_progress_changed(progress);
            return true;
        }

        let Some((glide, started)) = self.glide else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started);
        self.pager.scroll_to(glide.position_at(elapsed));
        if glide.is_finished(elapsed) {
            self.glide = None;
        }
        true
    }

    pub fn frame(&self) -> RenderPlan {
        self.indicator.borrow().frame()
    }

    pub fn preferred_size(&self) -> (f32, f32) {
        self.indicator.borrow().preferred_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaball::IndicatorSettings;

    fn config(dot_count: i32) -> Config {
        Config {
            indicator: IndicatorSettings {
                dot_count,
                dot_radius: 10.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn state(dot_count: i32) -> (State, Instant) {
        let now = Instant::now();
        let mut state = State::new(&config(dot_count), now);
        state.resize(400.0, 100.0);
        (state, now)
    }

    #[test]
    fn test_new_state_is_linked_to_pager() {
        let (state, _) = state(4);
        assert!(state.is_attached());
        assert_eq!(state.pager().count(), 4);
        assert_eq!(state.indicator.borrow().dot_count(), 4);
        assert_eq!(state.frame().len(), 4);
    }

    #[test]
    fn test_glide_moves_cursor_and_selects_target() {
        let (mut state, now) = state(4);
        state.go_to_page(2, now);
        assert_eq!(state.indicator.borrow().connected_index(), 2);

        assert!(state.tick(now + Duration::from_millis(150)));
        let midway = state.indicator.borrow().progress();
        assert!((midway - 1.0).abs() < 1e-3);

        assert!(state.tick(now + Duration::from_millis(400)));
        assert_eq!(state.indicator.borrow().progress(), 2.0);
        assert!(!state.tick(now + Duration::from_millis(500)));
    }

    #[test]
    fn test_step_is_clamped_to_pages() {
        let (mut state, now) = state(3);
        state.step(-1, now);
        assert_eq!(state.pager().current(), 0);

        state.step(5, now);
        assert_eq!(state.pager().current(), 2);
    }

    #[test]
    fn test_sweep_drives_progress_until_stopped() {
        let (mut state, now) = state(4);
        state.set_sweep(true, now);

        assert!(state.tick(now + Duration::from_millis(1250)));
        assert!((state.indicator.borrow().progress() - 1.5).abs() < 1e-3);

        state.toggle_sweep(now);
        assert!(!state.is_sweeping());
        assert!(!state.tick(now + Duration::from_millis(2000)));
        assert!((state.indicator.borrow().progress() - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_showing_restarts_configured_sweep() {
        let now = Instant::now();
        let mut state = State::new(
            &Config {
                animate: true,
                ..config(4)
            },
            now,
        );
        assert!(state.is_sweeping());

        state.on_hidden(now);
        assert!(!state.is_sweeping());
        state.on_shown(now + Duration::from_secs(1));
        assert!(state.is_sweeping());
    }

    #[test]
    fn test_showing_without_animate_stays_still() {
        let (mut state, now) = state(4);
        state.on_shown(now);
        assert!(!state.is_sweeping());
    }

    #[test]
    fn test_count_change_flows_through_pager() {
        let (mut state, _) = state(3);
        state.set_count(5);
        assert_eq!(state.indicator.borrow().dot_count(), 5);

        state.set_count(-2);
        assert_eq!(state.pager().count(), 0);
        assert!(state.frame().is_empty());
    }

    #[test]
    fn test_raw_signals_bypass_pager() {
        let (mut state, _) = state(3);
        state.scroll(4, 0.5);
        state.select(-1);

        let indicator = state.indicator.borrow();
        assert_eq!(indicator.progress(), 4.5);
        assert_eq!(indicator.connection(), None);
        assert_eq!(state.pager().current(), 0);
    }

    #[test]
    fn test_detach_stops_following_pager() {
        let (mut state, now) = state(4);
        state.detach();
        state.go_to_page(3, now);
        assert_eq!(state.indicator.borrow().connected_index(), 0);

        state.attach();
        assert_eq!(state.indicator.borrow().connected_index(), 3);
        assert_eq!(state.pager().listener_count(), 1);
    }
}
