//! # Position Solver
//!
//! Pure placement math for floating panels.
//!
//! ```text
//!   anchor box            panel box
//!   ┌────────┐            ┌──────────────┐
//!   │        │            │              │
//!   └●───────┘  ──────►   ●──────────────┤
//!    anchor origin        target origin  │
//!                         └──────────────┘
//! ```
//!
//! The naive placement puts the target origin exactly on the anchor origin.
//! When that runs off the viewport, each axis independently retries two
//! alternate attachment points before giving up and clamping.

use crate::origin::{AxisPoint, Horizontal, Origin, Vertical};
use crate::rect::{AnchorRect, Placement, PositionMap, TargetSize, Viewport};

/// How the anchor and target origins relate on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapMode {
    /// One of the two points is the median; the panel may slide freely.
    Auto,
    /// Both points name the same edge; the panel covers the anchor.
    Inclusive,
    /// The points name opposite edges; the panel sits beside the anchor.
    Exclusive,
}

/// Ordered retry plan for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackAxis<P> {
    /// Anchor point the candidates attach to.
    pub anchor_point: P,
    /// Panel points to try, most preferred first.
    pub candidates: [P; 2],
}

/// Retry plan for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fallback {
    /// Vertical plan.
    pub vertical: FallbackAxis<Vertical>,
    /// Horizontal plan.
    pub horizontal: FallbackAxis<Horizontal>,
}

/// A placement ready to apply, with the size cap the panel must respect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final non-negative offset.
    pub placement: Placement,
    /// Widest the panel may render before it must scroll.
    pub max_width: f32,
    /// Tallest the panel may render before it must scroll.
    pub max_height: f32,
}

/// Absolute reference points of an anchor.
#[must_use]
pub fn anchor_position_map(rect: &AnchorRect) -> PositionMap {
    let bounds = rect.bounds();
    let right = bounds.right();
    let bottom = bounds.bottom();

    PositionMap {
        top: bounds.top,
        center: bounds.top + (bottom - bounds.top) / 2.0,
        bottom,
        left: bounds.left,
        middle: bounds.left + (right - bounds.left) / 2.0,
        right,
    }
}

/// Local reference points of a panel, relative to its top-left corner.
#[must_use]
pub fn target_position_map(size: TargetSize) -> PositionMap {
    PositionMap {
        top: 0.0,
        center: size.height / 2.0,
        bottom: size.height,
        left: 0.0,
        middle: size.width / 2.0,
        right: size.width,
    }
}

/// Placement that makes the two origin points coincide.
#[must_use]
pub fn initial_placement(
    anchor: &PositionMap,
    target: &PositionMap,
    anchor_origin: Origin,
    target_origin: Origin,
) -> Placement {
    Placement {
        top: anchor_origin.vertical.select(anchor) - target_origin.vertical.select(target),
        left: anchor_origin.horizontal.select(anchor) - target_origin.horizontal.select(target),
    }
}

/// Classifies how the two points on one axis relate.
#[must_use]
pub fn overlap_mode<P: AxisPoint>(anchor: P, target: P) -> OverlapMode {
    if anchor.is_median() || target.is_median() {
        OverlapMode::Auto
    } else if anchor == target {
        OverlapMode::Inclusive
    } else {
        OverlapMode::Exclusive
    }
}

/// Builds the retry plan for one axis.
///
/// Candidates are the panel edge the target origin does not already use
/// plus the median. The median goes first when the axis is in
/// [`OverlapMode::Auto`], second otherwise. Outside auto mode the anchor
/// attachment flips to its opposite edge so the panel can jump to the
/// other side of the anchor.
#[must_use]
pub fn fallback_for_axis<P: AxisPoint>(anchor: P, target: P) -> FallbackAxis<P> {
    let [lead, trail] = P::EDGES;
    let other_edge = if target == lead { trail } else { lead };

    match overlap_mode(anchor, target) {
        OverlapMode::Auto => FallbackAxis {
            anchor_point: anchor,
            candidates: [P::MEDIAN, other_edge],
        },
        OverlapMode::Inclusive | OverlapMode::Exclusive => FallbackAxis {
            anchor_point: anchor.flip(),
            candidates: [other_edge, P::MEDIAN],
        },
    }
}

/// Builds the retry plan for both axes.
#[must_use]
pub fn fallback_axis(target_origin: Origin, anchor_origin: Origin) -> Fallback {
    Fallback {
        vertical: fallback_for_axis(anchor_origin.vertical, target_origin.vertical),
        horizontal: fallback_for_axis(anchor_origin.horizontal, target_origin.horizontal),
    }
}

/// Corrects one axis of a placement against the viewport limit.
///
/// `extent` is the panel's size on this axis.
fn correct_axis<P: AxisPoint>(
    anchor: &PositionMap,
    target: &PositionMap,
    plan: FallbackAxis<P>,
    current: f32,
    extent: f32,
    limit: f32,
) -> f32 {
    let fits = |offset: f32| offset >= 0.0 && offset + extent <= limit;

    if fits(current) {
        return current;
    }

    let attach = plan.anchor_point.select(anchor);
    if let Some(offset) = plan
        .candidates
        .iter()
        .map(|candidate| attach - candidate.select(target))
        .find(|offset| fits(*offset))
    {
        return offset;
    }

    if extent > limit {
        // Larger than the viewport: pin to the leading edge and let the
        // size cap clip the rest.
        0.0
    } else {
        current.max(0.0)
    }
}

/// Substitutes alternate attachment points when the placement overflows.
///
/// Each axis is corrected independently.
#[must_use]
pub fn apply_auto_position(
    anchor: &PositionMap,
    target: &PositionMap,
    target_origin: Origin,
    anchor_origin: Origin,
    placement: Placement,
    viewport: Viewport,
) -> Placement {
    let plan = fallback_axis(target_origin, anchor_origin);

    Placement {
        top: correct_axis(
            anchor,
            target,
            plan.vertical,
            placement.top,
            target.bottom,
            viewport.height,
        ),
        left: correct_axis(
            anchor,
            target,
            plan.horizontal,
            placement.left,
            target.right,
            viewport.width,
        ),
    }
}

/// Runs a full placement pass for one measurement.
///
/// The result is always non-negative and carries the viewport as the
/// panel's size cap.
#[must_use]
pub fn solve(
    anchor: &AnchorRect,
    size: TargetSize,
    anchor_origin: Origin,
    target_origin: Origin,
    viewport: Viewport,
    auto_position: bool,
) -> Solution {
    let anchor_map = anchor_position_map(anchor);
    let target_map = target_position_map(size);

    let mut placement = initial_placement(&anchor_map, &target_map, anchor_origin, target_origin);
    if auto_position {
        placement = apply_auto_position(
            &anchor_map,
            &target_map,
            target_origin,
            anchor_origin,
            placement,
            viewport,
        );
    }

    Solution {
        placement: Placement::new(placement.top.max(0.0), placement.left.max(0.0)),
        max_width: viewport.width,
        max_height: viewport.height,
    }
}
