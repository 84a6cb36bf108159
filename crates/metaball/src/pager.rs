//! Page source and the subscription that keeps an indicator in step with it.

use crate::indicator::Indicator;
use derive_more::Display;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// `page` plus `offset` in [0, 1) is the continuous scroll position.
    Scrolled { page: i32, offset: f32 },
    Selected(i32),
    CountChanged(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct SubscriptionId(u64);

crate::impl_scalar_newtype!(SubscriptionId, u64);

type Listener = Box<dyn FnMut(&PageEvent)>;

/// A row of pages with a continuous scroll position.
///
/// Listeners are called synchronously, in subscription order, and stay
/// registered until they are explicitly unsubscribed.
pub struct Pager {
    count: usize,
    current: usize,
    position: f32,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: SubscriptionId,
}

impl Pager {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            current: 0,
            position: 0.0,
            listeners: Vec::new(),
            next_id: SubscriptionId::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn last_page(&self) -> usize {
        self.count.saturating_sub(1)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PageEvent) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id = SubscriptionId::new(id.get() + 1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.emit(PageEvent::CountChanged(as_page(count)));

        let last = self.last_page();
        if self.current > last {
            self.select(last);
        }
        if self.position > last as f32 {
            self.scroll_to(last as f32);
        }
    }

    /// Moves the scroll position, clamped to the first and last page.
    pub fn scroll_to(&mut self, position: f32) {
        if position.is_nan() {
            return;
        }
        let position = position.clamp(0.0, self.last_page() as f32);
        self.position = position;

        let page = position.floor();
        self.emit(PageEvent::Scrolled {
            page: page as i32,
            offset: position - page,
        });
    }

    /// Makes `page` current. Only a change of page is announced.
    pub fn select(&mut self, page: usize) {
        let page = page.min(self.last_page());
        if page != self.current {
            self.current = page;
            self.emit(PageEvent::Selected(as_page(page)));
        }
    }

    fn emit(&mut self, event: PageEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}

impl fmt::Debug for Pager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("count", &self.count)
            .field("current", &self.current)
            .field("position", &self.position)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn as_page(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

/// Keeps an [`Indicator`] mirroring a [`Pager`] until detached.
#[derive(Debug)]
pub struct PagerLink {
    id: SubscriptionId,
}

impl PagerLink {
    /// Copies the pager's count and current page into `indicator`, then
    /// forwards every later page event to it.
    pub fn attach(pager: &mut Pager, indicator: Rc<RefCell<Indicator>>) -> Self {
        {
            let mut target = indicator.borrow_mut();
            target.on_count_changed(as_page(pager.count()));
            target.on_connection_changed(as_page(pager.current()));
            target.on_progress_changed(pager.current() as f32);
        }

        let id = pager.subscribe(move |event| indicator.borrow_mut().apply(event));
        log::debug!("Indicator attached to pager as listener {}", id);
        Self { id }
    }

    pub fn detach(self, pager: &mut Pager) -> bool {
        log::debug!("Detaching pager listener {}", self.id);
        pager.unsubscribe(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::IndicatorSettings;

    fn recorder(pager: &mut Pager) -> (SubscriptionId, Rc<RefCell<Vec<PageEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        let id = pager.subscribe(move |e| sink.borrow_mut().push(*e));
        (id, events)
    }

    #[test]
    fn test_scroll_reports_page_and_offset() {
        let mut pager = Pager::new(4);
        let (_, events) = recorder(&mut pager);

        pager.scroll_to(1.25);
        pager.scroll_to(9.0);
        pager.scroll_to(-3.0);

        assert_eq!(
            *events.borrow(),
            vec![
                PageEvent::Scrolled {
                    page: 1,
                    offset: 0.25
                },
                PageEvent::Scrolled {
                    page: 3,
                    offset: 0.0
                },
                PageEvent::Scrolled {
                    page: 0,
                    offset: 0.0
                },
            ]
        );
    }

    #[test]
    fn test_select_announces_only_changes() {
        let mut pager = Pager::new(3);
        let (_, events) = recorder(&mut pager);

        pager.select(0);
        pager.select(2);
        pager.select(2);
        pager.select(7);

        assert_eq!(*events.borrow(), vec![PageEvent::Selected(2)]);
        assert_eq!(pager.current(), 2);
    }

    #[test]
    fn test_shrinking_count_moves_current_page() {
        let mut pager = Pager::new(5);
        pager.select(4);
        pager.scroll_to(4.0);
        let (_, events) = recorder(&mut pager);

        pager.set_count(2);

        assert_eq!(pager.current(), 1);
        assert_eq!(pager.position(), 1.0);
        assert_eq!(
            *events.borrow(),
            vec![
                PageEvent::CountChanged(2),
                PageEvent::Selected(1),
                PageEvent::Scrolled {
                    page: 1,
                    offset: 0.0
                },
            ]
        );
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut pager = Pager::new(3);
        let (id, events) = recorder(&mut pager);

        pager.select(1);
        assert!(pager.unsubscribe(id));
        assert!(!pager.unsubscribe(id));
        pager.select(2);

        assert_eq!(*events.borrow(), vec![PageEvent::Selected(1)]);
        assert_eq!(pager.listener_count(), 0);
    }

    #[test]
    fn test_subscription_ids_are_distinct() {
        let mut pager = Pager::new(2);
        let (first, _) = recorder(&mut pager);
        let (second, _) = recorder(&mut pager);
        assert_ne!(first, second);
        assert_eq!(second.get(), first.get() + 1);
    }

    #[test]
    fn test_nan_scroll_is_ignored() {
        let mut pager = Pager::new(3);
        pager.scroll_to(1.5);
        let (_, events) = recorder(&mut pager);

        pager.scroll_to(f32::NAN);
        assert_eq!(pager.position(), 1.5);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_link_populates_and_follows_pager() {
        let mut pager = Pager::new(4);
        pager.select(2);
        let indicator = Rc::new(RefCell::new(Indicator::new(IndicatorSettings::default())));

        let link = PagerLink::attach(&mut pager, indicator.clone());
        {
            let ind = indicator.borrow();
            assert_eq!(ind.dot_count(), 4);
            assert_eq!(ind.connected_index(), 2);
            assert_eq!(ind.progress(), 2.0);
        }

        pager.scroll_to(2.5);
        pager.select(3);
        pager.set_count(6);
        {
            let ind = indicator.borrow();
            assert_eq!(ind.progress(), 2.5);
            assert_eq!(ind.connected_index(), 3);
            assert_eq!(ind.dot_count(), 6);
        }

        assert!(link.detach(&mut pager));
        pager.select(0);
        assert_eq!(indicator.borrow().connected_index(), 3);
    }
}
