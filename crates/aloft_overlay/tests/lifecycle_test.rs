//! # Popover Lifecycle Tests
//!
//! Drives a single `Popover` through its state machine against a
//! recording renderer.

mod common;

use aloft_geometry::{BoundingBox, GeometryError, Placement, Viewport};
use aloft_overlay::{
    CloseReason, GateVerdict, Key, LayerId, ListenerKey, ListenerRegistry, MeasuredBox,
    OpenRequest, OverlayError, PanelKind, PointerEvent, Popover, PopoverConfig, PopoverState,
    ScrollContainer, SurfaceMode, Visibility,
};
use common::{anchor, close_log, ms, panel, Call, Recorder};

const LAYER: LayerId = LayerId(1);

fn popover(registry: &ListenerRegistry) -> Popover {
    Popover::new(LAYER, Viewport::new(1024.0, 768.0), registry.clone())
}

fn request(anchor: &MeasuredBox, config: PopoverConfig) -> OpenRequest {
    OpenRequest::new(anchor.handle(), PanelKind::Popover).with_config(config)
}

// ============================================================================
// OPENING
// ============================================================================

#[test]
fn test_open_places_below_anchor() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();

    assert_eq!(popover.state(), PopoverState::Open);
    let solution = popover.placement().unwrap();
    assert_eq!(solution.placement, Placement::new(120.0, 50.0));
    assert_eq!(solution.max_height, 768.0);
    assert_eq!(
        renderer.transitions(LAYER),
        vec![PopoverState::Opening, PopoverState::Open]
    );
    assert_eq!(renderer.calls[1], Call::Mount(LAYER, SurfaceMode::CaptureLayer));

    // Scroll, resize, pointer and escape listeners are live.
    assert_eq!(registry.len(), 4);
    assert!(registry.is_subscribed(ListenerKey::Scroll(ScrollContainer::Viewport), LAYER));
}

#[test]
fn test_open_flips_above_when_viewport_is_short() {
    let registry = ListenerRegistry::new();
    let mut popover = Popover::new(LAYER, Viewport::new(1024.0, 150.0), registry.clone());
    let mut renderer = Recorder::with_panel(LAYER, &panel());

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();

    assert_eq!(popover.placement().unwrap().placement, Placement::new(20.0, 50.0));
}

#[test]
fn test_deferred_measurement_waits_in_opening() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::default();

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();
    assert_eq!(popover.state(), PopoverState::Opening);

    let late = MeasuredBox::detached();
    popover.mount_completed(late.handle(), &mut renderer, ms(5));
    assert_eq!(popover.state(), PopoverState::Opening);
    assert_eq!(renderer.places(LAYER), 0);
    assert!(popover.placement().is_none());

    late.set(BoundingBox::new(0.0, 0.0, 200.0, 80.0));
    popover.on_resize(Viewport::new(1024.0, 768.0), ms(10), &mut renderer);
    assert_eq!(popover.state(), PopoverState::Open);
    assert_eq!(renderer.places(LAYER), 1);
}

#[test]
fn test_close_during_opening_aborts() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::default();

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();
    popover.request_close(None, &mut renderer, ms(1));

    assert_eq!(popover.state(), PopoverState::Closed);
    assert_eq!(renderer.unmounts(LAYER), 1);

    // A mount that lands after the abort changes nothing.
    popover.mount_completed(panel().handle(), &mut renderer, ms(2));
    assert_eq!(popover.state(), PopoverState::Closed);
    assert_eq!(renderer.places(LAYER), 0);
    assert!(registry.is_empty());
}

#[test]
fn test_invalid_config_rejected() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::default();
    let config = PopoverConfig {
        scroll_throttle: ms(0),
        ..PopoverConfig::default()
    };

    assert!(popover
        .request_open(request(&anchor(), config), &mut renderer, ms(0))
        .is_err());
    assert_eq!(popover.state(), PopoverState::Closed);
    assert!(renderer.calls.is_empty());
}

#[test]
fn test_bad_origin_label_fails_before_mount() {
    let registry = ListenerRegistry::new();
    let popover = popover(&registry);
    let renderer = Recorder::with_panel(LAYER, &panel());

    let err = OpenRequest::new(anchor().handle(), PanelKind::Popover)
        .with_origin_labels("bottom centre", "top left")
        .err();

    assert_eq!(
        err,
        Some(OverlayError::Geometry(GeometryError::InvalidOrigin {
            axis: "horizontal",
            value: "centre".into(),
        }))
    );
    assert_eq!(popover.state(), PopoverState::Closed);
    assert!(renderer.calls.is_empty());
    assert!(registry.is_empty());

    let request = OpenRequest::new(anchor().handle(), PanelKind::Popover)
        .with_origin_labels("bottom left", "top-left")
        .unwrap();
    assert_eq!(request.anchor_origin, aloft_geometry::Origin::BOTTOM_LEFT);
}

#[test]
fn test_capture_surface_blocks_while_opening() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::default();
    let (log, callback) = close_log();
    popover.on_request_close(callback);

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();
    assert_eq!(popover.state(), PopoverState::Opening);

    let verdict = popover.on_pointer(&PointerEvent::click(500.0, 500.0), &mut renderer, ms(5));
    assert_eq!(verdict, GateVerdict::Blocked);
    assert!(log.lock().is_empty());
    assert_eq!(popover.state(), PopoverState::Opening);

    popover.request_close(None, &mut renderer, ms(6));
    assert!(registry.is_empty());
}

#[test]
fn test_passive_surface_ignores_pointer_while_opening() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::default();
    let config = PopoverConfig {
        use_layer_for_click_away: false,
        ..PopoverConfig::default()
    };

    popover
        .request_open(request(&anchor(), config), &mut renderer, ms(0))
        .unwrap();

    let verdict = popover.on_pointer(&PointerEvent::click(500.0, 500.0), &mut renderer, ms(5));
    assert_eq!(verdict, GateVerdict::Unarmed);
    assert!(!registry.is_subscribed(ListenerKey::Pointer, LAYER));
}

#[test]
fn test_reopen_with_new_anchor_replaces() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();

    let other = MeasuredBox::attached(BoundingBox::new(300.0, 400.0, 40.0, 20.0));
    popover
        .request_open(request(&other, PopoverConfig::default()), &mut renderer, ms(10))
        .unwrap();

    assert_eq!(popover.placement().unwrap().placement, Placement::new(320.0, 400.0));
    assert_eq!(renderer.count(|c| matches!(c, Call::Mount(..))), 1);
}

// ============================================================================
// CLOSING
// ============================================================================

#[test]
fn test_animated_close_waits_for_grace() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();
    popover.request_close(Some(&CloseReason::from("itemSelected")), &mut renderer, ms(100));

    assert_eq!(popover.state(), PopoverState::Closing);
    assert!(popover.placement().is_none());
    assert_eq!(popover.next_deadline(), Some(ms(600)));

    popover.tick(ms(599), &mut renderer);
    assert_eq!(popover.state(), PopoverState::Closing);
    assert_eq!(renderer.unmounts(LAYER), 0);

    popover.tick(ms(600), &mut renderer);
    assert_eq!(popover.state(), PopoverState::Closed);
    assert_eq!(renderer.unmounts(LAYER), 1);
    assert!(registry.is_empty());
    assert_eq!(popover.next_deadline(), None);
}

#[test]
fn test_reopen_during_closing_keeps_mount() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());
    let anchor = anchor();

    popover
        .request_open(request(&anchor, PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();
    popover.request_close(None, &mut renderer, ms(100));
    popover
        .request_open(request(&anchor, PopoverConfig::default()), &mut renderer, ms(200))
        .unwrap();

    assert_eq!(popover.state(), PopoverState::Open);
    assert_eq!(popover.next_deadline(), None);

    popover.tick(ms(1_000), &mut renderer);
    assert_eq!(popover.state(), PopoverState::Open);
    assert_eq!(renderer.unmounts(LAYER), 0);
    assert_eq!(renderer.count(|c| matches!(c, Call::Mount(..))), 1);
    assert!(registry.is_subscribed(ListenerKey::Pointer, LAYER));
}

#[test]
fn test_unanimated_close_skips_closing() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());
    let config = PopoverConfig {
        animated: false,
        ..PopoverConfig::default()
    };

    popover
        .request_open(request(&anchor(), config), &mut renderer, ms(0))
        .unwrap();
    popover.request_close(None, &mut renderer, ms(10));

    assert_eq!(
        renderer.transitions(LAYER),
        vec![PopoverState::Opening, PopoverState::Open, PopoverState::Closed]
    );
    assert_eq!(popover.next_deadline(), None);
    assert_eq!(renderer.unmounts(LAYER), 1);
}

#[test]
fn test_teardown_releases_everything() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();
    popover.request_close(None, &mut renderer, ms(10));
    popover.teardown(&mut renderer);

    assert_eq!(popover.state(), PopoverState::Closed);
    assert_eq!(popover.next_deadline(), None);
    assert_eq!(renderer.unmounts(LAYER), 1);
    assert!(registry.is_empty());
}

// ============================================================================
// CLOSE REQUESTS
// ============================================================================

#[test]
fn test_off_screen_requested_once() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());
    let (log, callback) = close_log();
    popover.on_request_close(callback);
    let anchor = anchor();

    popover
        .request_open(request(&anchor, PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();

    anchor.scroll_by(0.0, 150.0);
    popover.on_scroll(ms(100), &mut renderer);
    assert_eq!(*log.lock(), vec![CloseReason::OffScreen]);

    // Still off screen: leading run, then a trailing run.
    popover.on_scroll(ms(200), &mut renderer);
    popover.on_scroll(ms(210), &mut renderer);
    popover.tick(ms(250), &mut renderer);
    assert_eq!(log.lock().len(), 1);

    // Controlled visibility: the caller decides.
    assert_eq!(popover.state(), PopoverState::Open);
}

#[test]
fn test_scroll_keeps_panel_attached() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());
    let anchor = anchor();

    popover
        .request_open(request(&anchor, PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();

    anchor.scroll_by(0.0, 40.0);
    popover.on_scroll(ms(100), &mut renderer);
    assert_eq!(popover.placement().unwrap().placement, Placement::new(80.0, 50.0));

    anchor.scroll_by(0.0, 10.0);
    popover.on_scroll(ms(120), &mut renderer);
    assert_eq!(popover.placement().unwrap().placement, Placement::new(80.0, 50.0));
    assert_eq!(popover.next_deadline(), Some(ms(150)));

    popover.tick(ms(150), &mut renderer);
    assert_eq!(popover.placement().unwrap().placement, Placement::new(70.0, 50.0));
}

#[test]
fn test_click_away_in_self_managed_mode_closes() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let panel = panel();
    let mut renderer = Recorder::with_panel(LAYER, &panel);
    let (log, callback) = close_log();
    popover.on_request_close(callback);
    let config = PopoverConfig {
        visibility: Visibility::SelfManaged,
        animated: false,
        ..PopoverConfig::default()
    };

    popover
        .request_open(request(&anchor(), config), &mut renderer, ms(0))
        .unwrap();

    let inside = popover.on_pointer(&PointerEvent::click(10.0, 10.0), &mut renderer, ms(5));
    assert_eq!(inside, GateVerdict::Inside);
    assert_eq!(popover.state(), PopoverState::Open);

    let outside = popover.on_pointer(&PointerEvent::touch(500.0, 500.0), &mut renderer, ms(6));
    assert_eq!(
        outside,
        GateVerdict::Outside {
            close: true,
            swallowed: true
        }
    );
    assert_eq!(*log.lock(), vec![CloseReason::ClickAway]);
    assert_eq!(popover.state(), PopoverState::Closed);
}

#[test]
fn test_prevented_click_is_ignored() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());
    let (log, callback) = close_log();
    popover.on_request_close(callback);

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();
    popover.on_pointer(&PointerEvent::click(500.0, 500.0).prevented(), &mut renderer, ms(5));

    assert!(log.lock().is_empty());
}

#[test]
fn test_escape_requests_close() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());
    let (log, callback) = close_log();
    popover.on_request_close(callback);

    popover
        .request_open(request(&anchor(), PopoverConfig::default()), &mut renderer, ms(0))
        .unwrap();

    assert!(!popover.on_key(Key::Enter, &mut renderer, ms(1)));
    assert!(popover.on_key(Key::Escape, &mut renderer, ms(2)));
    assert_eq!(*log.lock(), vec![CloseReason::Escape]);
}

#[test]
fn test_tooltip_preset_ignores_escape() {
    let registry = ListenerRegistry::new();
    let mut popover = popover(&registry);
    let mut renderer = Recorder::with_panel(LAYER, &panel());
    let config = PopoverConfig::default().with_layer(&PanelKind::Tooltip.preset());
    let anchor = MeasuredBox::attached(BoundingBox::new(100.0, 300.0, 40.0, 20.0));
    let request = OpenRequest::new(anchor.handle(), PanelKind::Tooltip).with_config(config);

    popover.request_open(request, &mut renderer, ms(0)).unwrap();

    assert!(!popover.on_key(Key::Escape, &mut renderer, ms(1)));
    assert!(!registry.is_subscribed(ListenerKey::Key, LAYER));
    assert_eq!(renderer.calls[1], Call::Mount(LAYER, SurfaceMode::Passive));
    // Anchor bottom-middle (120, 320) over panel top-middle.
    assert_eq!(popover.placement().unwrap().placement, Placement::new(120.0, 220.0));
}
