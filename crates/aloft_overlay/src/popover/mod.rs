//! # Popover Lifecycle
//!
//! One [`Popover`] per floating panel. It owns the state machine, the grace
//! timer, the viewport monitor and the click-away gate, and drives a
//! [`LayerRenderer`] it borrows for each call.
//!
//! ## Ordering guarantees
//!
//! - No placement before the panel is mounted and measurable.
//! - A close during `opening` aborts straight to `closed`; nothing is
//!   placed or shown.
//! - A reopen during `closing` cancels the grace timer and never
//!   unmounts.
//! - Reaching `closed` releases every listener and timer.

mod click_away;
mod state;
mod viewport;

pub use click_away::{ClickAwayGate, GateVerdict};
pub use state::{CloseReason, PopoverState};
pub use viewport::{PassKind, ViewportMonitor};

use std::sync::Arc;
use std::time::Duration;

use aloft_geometry::{solve, AnchorRect, Origin, Solution, TargetSize, Viewport};

use crate::config::{PopoverConfig, Visibility};
use crate::error::OverlayResult;
use crate::input::{Key, PointerEvent};
use crate::kind::PanelKind;
use crate::layer::{LayerId, LayerRenderer, MountStatus, SurfaceMode};
use crate::listener::{ListenerGuard, ListenerKey, ListenerRegistry};
use crate::measure::{same_element, Measurable};
use crate::timer::{earliest, Timer};

/// Callback invoked when the engine wants the panel closed.
pub type CloseCallback = Box<dyn FnMut(&CloseReason) + Send>;

/// Everything needed to open a panel.
#[derive(Clone)]
pub struct OpenRequest {
    /// Element the panel attaches to.
    pub anchor: Arc<dyn Measurable>,
    /// Attachment point on the anchor.
    pub anchor_origin: Origin,
    /// Attachment point on the panel.
    pub target_origin: Origin,
    /// Resolved configuration, fixed until the next open from `closed`.
    pub config: PopoverConfig,
}

impl OpenRequest {
    /// A request with the kind's default origins and the engine defaults.
    #[must_use]
    pub fn new(anchor: Arc<dyn Measurable>, kind: PanelKind) -> Self {
        let (anchor_origin, target_origin) = kind.default_origins();
        Self {
            anchor,
            anchor_origin,
            target_origin,
            config: PopoverConfig::default(),
        }
    }

    /// Sets both origins.
    #[must_use]
    pub fn with_origins(mut self, anchor_origin: Origin, target_origin: Origin) -> Self {
        self.anchor_origin = anchor_origin;
        self.target_origin = target_origin;
        self
    }

    /// Sets both origins from labels such as `"bottom left"`.
    ///
    /// # Errors
    ///
    /// Fails on any label outside the grid; nothing is coerced.
    pub fn with_origin_labels(
        self,
        anchor_origin: &str,
        target_origin: &str,
    ) -> OverlayResult<Self> {
        Ok(self.with_origins(anchor_origin.parse()?, target_origin.parse()?))
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: PopoverConfig) -> Self {
        self.config = config;
        self
    }
}

/// Lifecycle controller for one floating panel.
pub struct Popover {
    layer: LayerId,
    state: PopoverState,
    viewport: Viewport,
    registry: ListenerRegistry,
    anchor: Option<Arc<dyn Measurable>>,
    panel: Option<Arc<dyn Measurable>>,
    anchor_origin: Origin,
    target_origin: Origin,
    config: PopoverConfig,
    grace: Timer,
    monitor: ViewportMonitor,
    gate: ClickAwayGate,
    escape: Option<ListenerGuard>,
    placement: Option<Solution>,
    mounted: bool,
    on_request_close: Option<CloseCallback>,
}

impl Popover {
    /// Creates a closed instance.
    #[must_use]
    pub fn new(layer: LayerId, viewport: Viewport, registry: ListenerRegistry) -> Self {
        let config = PopoverConfig::default();
        Self {
            layer,
            state: PopoverState::Closed,
            viewport,
            registry,
            anchor: None,
            panel: None,
            anchor_origin: Origin::BOTTOM_LEFT,
            target_origin: Origin::TOP_LEFT,
            config,
            grace: Timer::new(),
            monitor: ViewportMonitor::new(&config),
            gate: ClickAwayGate::new(ClickAwayGate::mode_for(config.use_layer_for_click_away)),
            escape: None,
            placement: None,
            mounted: false,
            on_request_close: None,
        }
    }

    /// Registers the close-request callback.
    pub fn on_request_close(&mut self, callback: impl FnMut(&CloseReason) + Send + 'static) {
        self.on_request_close = Some(Box::new(callback));
    }

    /// This instance's layer.
    #[must_use]
    pub const fn layer(&self) -> LayerId {
        self.layer
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> PopoverState {
        self.state
    }

    /// Configuration of the current (or last) open.
    #[must_use]
    pub const fn config(&self) -> &PopoverConfig {
        &self.config
    }

    /// Viewport the panel is fitted into.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last applied placement. Only meaningful while `open`.
    #[must_use]
    pub fn placement(&self) -> Option<Solution> {
        match self.state {
            PopoverState::Open => self.placement,
            _ => None,
        }
    }

    /// Earliest pending timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        earliest(self.grace.deadline(), self.monitor.next_deadline())
    }

    /// Asks for the panel to be shown.
    ///
    /// From `closed` this mounts and, once measurable, places the panel.
    /// From `closing` it cancels the grace timer and returns to `open`
    /// without remounting. From `opening` or `open` it only swaps in a
    /// different anchor.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::InvalidConfig`](crate::OverlayError) if the
    /// request's config cannot drive the engine.
    pub fn request_open(
        &mut self,
        request: OpenRequest,
        renderer: &mut dyn LayerRenderer,
        now: Duration,
    ) -> OverlayResult<()> {
        request.config.validate()?;

        match self.state {
            PopoverState::Closed => {
                self.anchor = Some(request.anchor);
                self.anchor_origin = request.anchor_origin;
                self.target_origin = request.target_origin;
                self.config = request.config;
                self.monitor = ViewportMonitor::new(&self.config);
                self.gate = ClickAwayGate::new(ClickAwayGate::mode_for(
                    self.config.use_layer_for_click_away,
                ));

                self.transition(PopoverState::Opening, renderer);
                if self.gate.mode() == SurfaceMode::CaptureLayer {
                    // The capture surface goes up with the mount.
                    self.gate.arm(&self.registry, self.layer);
                }
                self.mounted = true;
                match renderer.mount(self.layer, self.gate.mode()) {
                    MountStatus::Ready(panel) => self.mount_completed(panel, renderer, now),
                    MountStatus::Pending => {}
                }
            }
            PopoverState::Opening => {
                self.swap_anchor(request.anchor);
            }
            PopoverState::Open => {
                if self.swap_anchor(request.anchor) {
                    self.run_pass(None, renderer, now);
                }
            }
            PopoverState::Closing => {
                self.grace.cancel();
                self.swap_anchor(request.anchor);
                self.enter_open(renderer);
                self.run_pass(None, renderer, now);
            }
        }
        Ok(())
    }

    /// Reports that the renderer finished mounting this layer.
    ///
    /// Ignored unless `opening`: a close may already have won the race.
    pub fn mount_completed(
        &mut self,
        panel: Arc<dyn Measurable>,
        renderer: &mut dyn LayerRenderer,
        now: Duration,
    ) {
        if self.state != PopoverState::Opening {
            tracing::warn!(
                layer = %self.layer,
                state = %self.state,
                "mount completed outside opening, ignoring"
            );
            return;
        }

        self.panel = Some(panel);
        self.monitor
            .attach(&self.registry, self.layer, self.config.scrollable_container);
        self.run_pass(None, renderer, now);
    }

    /// Asks for the panel to be hidden.
    ///
    /// `reason` is for logs only; callers closing on their own behalf may
    /// pass `None`.
    pub fn request_close(
        &mut self,
        reason: Option<&CloseReason>,
        renderer: &mut dyn LayerRenderer,
        now: Duration,
    ) {
        let reason = reason.map_or("caller", CloseReason::as_str);

        match self.state {
            PopoverState::Closed | PopoverState::Closing => {}
            PopoverState::Opening => {
                tracing::debug!(
                    layer = %self.layer,
                    reason,
                    "closed before placement, aborting open"
                );
                self.finish_close(renderer);
            }
            PopoverState::Open if self.config.animated => {
                tracing::debug!(layer = %self.layer, reason, "closing");
                self.gate.disarm();
                self.escape = None;
                self.grace.arm(now, self.config.close_grace);
                self.transition(PopoverState::Closing, renderer);
            }
            PopoverState::Open => {
                tracing::debug!(layer = %self.layer, reason, "closing without animation");
                self.finish_close(renderer);
            }
        }
    }

    /// Fires due timers: the grace window and trailing throttle runs.
    pub fn tick(&mut self, now: Duration, renderer: &mut dyn LayerRenderer) {
        if self.grace.fire_if_due(now) && self.state == PopoverState::Closing {
            self.finish_close(renderer);
        }
        if let Some(kind) = self.monitor.poll(now) {
            self.run_pass(Some(kind), renderer, now);
        }
    }

    /// Reacts to a scroll on the tracked container.
    pub fn on_scroll(&mut self, now: Duration, renderer: &mut dyn LayerRenderer) {
        if self.monitor.on_scroll(now) {
            self.run_pass(Some(PassKind::Scroll), renderer, now);
        }
    }

    /// Reacts to a viewport resize.
    pub fn on_resize(
        &mut self,
        viewport: Viewport,
        now: Duration,
        renderer: &mut dyn LayerRenderer,
    ) {
        self.viewport = viewport;
        if self.monitor.on_resize(now) {
            self.run_pass(Some(PassKind::Resize), renderer, now);
        }
    }

    /// Runs a pointer event through the click-away gate.
    pub fn on_pointer(
        &mut self,
        event: &PointerEvent,
        renderer: &mut dyn LayerRenderer,
        now: Duration,
    ) -> GateVerdict {
        match self.state {
            PopoverState::Open => {}
            PopoverState::Opening if self.gate.is_armed() => return GateVerdict::Blocked,
            _ => return GateVerdict::Unarmed,
        }

        let panel = self.panel.as_ref().and_then(|panel| panel.bounding_box());
        let verdict = self.gate.evaluate(panel, event);
        match verdict {
            GateVerdict::Outside { close: true, .. } => {
                self.raise(CloseReason::ClickAway, renderer, now);
            }
            GateVerdict::Unmeasured => {
                tracing::warn!(layer = %self.layer, "panel not measurable, click-away skipped");
            }
            _ => {}
        }
        verdict
    }

    /// Reacts to a key press. Returns true if the key was handled.
    pub fn on_key(&mut self, key: Key, renderer: &mut dyn LayerRenderer, now: Duration) -> bool {
        if key != Key::Escape || self.escape.is_none() || self.state != PopoverState::Open {
            return false;
        }
        self.raise(CloseReason::Escape, renderer, now);
        true
    }

    /// Cancels every timer, drops every listener and unmounts.
    pub fn teardown(&mut self, renderer: &mut dyn LayerRenderer) {
        self.finish_close(renderer);
        self.on_request_close = None;
    }

    /// Replaces the anchor if a different element was supplied.
    fn swap_anchor(&mut self, anchor: Arc<dyn Measurable>) -> bool {
        let changed = self
            .anchor
            .as_ref()
            .map_or(true, |current| !same_element(current, &anchor));
        if changed {
            tracing::debug!(layer = %self.layer, "anchor replaced");
            self.anchor = Some(anchor);
        }
        changed
    }

    /// Measures, places, and runs the off-screen check on scroll passes.
    fn run_pass(
        &mut self,
        trigger: Option<PassKind>,
        renderer: &mut dyn LayerRenderer,
        now: Duration,
    ) {
        if self.state == PopoverState::Closed || self.panel.is_none() {
            return;
        }

        let Some(anchor) = self.place(renderer) else {
            return;
        };
        tracing::trace!(layer = %self.layer, ?trigger, "placement pass");

        match self.state {
            PopoverState::Opening => self.enter_open(renderer),
            PopoverState::Open
                if trigger == Some(PassKind::Scroll) && self.config.auto_close_when_off_screen =>
            {
                if self.monitor.check_off_screen(&anchor, self.viewport) {
                    self.raise(CloseReason::OffScreen, renderer, now);
                }
            }
            _ => {}
        }
    }

    /// One placement pass. Returns the anchor measurement it used.
    fn place(&mut self, renderer: &mut dyn LayerRenderer) -> Option<AnchorRect> {
        let (anchor, size) = match self.measure() {
            Ok(measured) => measured,
            Err(err) => {
                tracing::warn!(layer = %self.layer, %err, "placement deferred");
                return None;
            }
        };

        let solution = solve(
            &anchor,
            size,
            self.anchor_origin,
            self.target_origin,
            self.viewport,
            self.config.can_auto_position,
        );
        renderer.place(self.layer, &solution);
        self.placement = Some(solution);
        Some(anchor)
    }

    fn measure(&self) -> OverlayResult<(AnchorRect, TargetSize)> {
        let anchor = self
            .anchor
            .as_ref()
            .and_then(|anchor| anchor.bounding_box())
            .unwrap_or_default();
        let panel = self
            .panel
            .as_ref()
            .and_then(|panel| panel.bounding_box())
            .unwrap_or_default();

        Ok((AnchorRect::capture(anchor)?, TargetSize::capture(panel)?))
    }

    /// Hands a close reason to the caller, closing too when self-managed.
    fn raise(&mut self, reason: CloseReason, renderer: &mut dyn LayerRenderer, now: Duration) {
        tracing::debug!(layer = %self.layer, %reason, "requesting close");
        if let Some(callback) = self.on_request_close.as_mut() {
            callback(&reason);
        }
        if self.config.visibility == Visibility::SelfManaged {
            self.request_close(Some(&reason), renderer, now);
        }
    }

    fn enter_open(&mut self, renderer: &mut dyn LayerRenderer) {
        self.gate.arm(&self.registry, self.layer);
        if self.config.close_on_escape && self.escape.is_none() {
            self.escape = Some(self.registry.subscribe(ListenerKey::Key, self.layer));
        }
        self.transition(PopoverState::Open, renderer);
    }

    fn finish_close(&mut self, renderer: &mut dyn LayerRenderer) {
        self.grace.cancel();
        self.monitor.detach();
        self.gate.disarm();
        self.escape = None;
        self.panel = None;
        self.placement = None;
        if self.mounted {
            self.mounted = false;
            renderer.unmount(self.layer);
        }
        if self.state != PopoverState::Closed {
            self.transition(PopoverState::Closed, renderer);
        }
    }

    fn transition(&mut self, to: PopoverState, renderer: &mut dyn LayerRenderer) {
        tracing::debug!(layer = %self.layer, from = %self.state, %to, "transition");
        self.state = to;
        renderer.transition(self.layer, to);
    }
}
