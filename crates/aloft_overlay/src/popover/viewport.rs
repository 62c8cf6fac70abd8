//! Throttled scroll/resize tracking and off-screen detection.

use std::time::Duration;

use aloft_geometry::{AnchorRect, Viewport};

use crate::config::{PopoverConfig, ScrollContainer};
use crate::layer::LayerId;
use crate::listener::{ListenerGuard, ListenerKey, ListenerRegistry};
use crate::timer::{earliest, Throttle};

/// What triggered a placement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Scroll; also runs the off-screen check.
    Scroll,
    /// Resize.
    Resize,
}

/// Watches the viewport for one instance.
///
/// Subscriptions exist only between [`attach`](Self::attach) and
/// [`detach`](Self::detach).
#[derive(Debug)]
pub struct ViewportMonitor {
    scroll: Throttle,
    resize: Throttle,
    guards: Vec<ListenerGuard>,
    off_screen: bool,
}

impl ViewportMonitor {
    /// Creates a detached monitor with the config's throttle windows.
    #[must_use]
    pub fn new(config: &PopoverConfig) -> Self {
        Self {
            scroll: Throttle::new(config.scroll_throttle),
            resize: Throttle::new(config.resize_throttle),
            guards: Vec::with_capacity(2),
            off_screen: false,
        }
    }

    /// Subscribes to scroll on `container` and to viewport resize.
    pub fn attach(
        &mut self,
        registry: &ListenerRegistry,
        layer: LayerId,
        container: ScrollContainer,
    ) {
        if self.is_attached() {
            return;
        }
        self.guards.push(registry.subscribe(ListenerKey::Scroll(container), layer));
        self.guards.push(registry.subscribe(ListenerKey::Resize, layer));
    }

    /// Releases every subscription and forgets throttle history.
    pub fn detach(&mut self) {
        self.guards.clear();
        self.scroll.reset();
        self.resize.reset();
        self.off_screen = false;
    }

    /// Returns true while subscribed.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.guards.is_empty()
    }

    /// Records a scroll. Returns true if a pass should run now.
    pub fn on_scroll(&mut self, now: Duration) -> bool {
        self.is_attached() && self.scroll.hit(now)
    }

    /// Records a resize. Returns true if a pass should run now.
    pub fn on_resize(&mut self, now: Duration) -> bool {
        self.is_attached() && self.resize.hit(now)
    }

    /// Fires trailing throttle runs that came due.
    ///
    /// A due scroll run wins over a due resize run since it covers both.
    pub fn poll(&mut self, now: Duration) -> Option<PassKind> {
        let scroll = self.scroll.poll(now);
        let resize = self.resize.poll(now);
        if scroll {
            Some(PassKind::Scroll)
        } else if resize {
            Some(PassKind::Resize)
        } else {
            None
        }
    }

    /// Earliest pending trailing run.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        earliest(self.scroll.deadline(), self.resize.deadline())
    }

    /// Updates the off-screen latch for a fresh anchor measurement.
    ///
    /// Returns true only on the transition into off-screen; staying off
    /// screen returns false until the anchor comes back.
    pub fn check_off_screen(&mut self, anchor: &AnchorRect, viewport: Viewport) -> bool {
        let outside = !viewport.contains_point(anchor.left(), anchor.top());
        let entered = outside && !self.off_screen;
        self.off_screen = outside;
        entered
    }
}
