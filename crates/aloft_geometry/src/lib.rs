//! # ALOFT Geometry
//!
//! Placement math for anything that floats next to an anchor: menus,
//! dropdown pickers, tooltips rendered as panels.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │ AnchorRect   │──►│ Position     │──►│ Initial      │──►│ Auto        │
//! │ TargetSize   │   │ Maps         │   │ Placement    │   │ Position    │
//! └──────────────┘   └──────────────┘   └──────────────┘   └─────────────┘
//! ```
//!
//! Every function here is pure. Measurements are captured fresh for each
//! pass and thrown away once a [`Solution`] comes out.
//!
//! ## Example
//!
//! ```rust
//! use aloft_geometry::{solve, AnchorRect, BoundingBox, Origin, TargetSize, Viewport};
//!
//! let anchor = AnchorRect::capture(BoundingBox::new(100.0, 50.0, 40.0, 20.0))?;
//! let solution = solve(
//!     &anchor,
//!     TargetSize::new(200.0, 80.0),
//!     Origin::BOTTOM_LEFT,
//!     Origin::TOP_LEFT,
//!     Viewport::new(1024.0, 150.0),
//!     true,
//! );
//! assert_eq!(solution.placement.top, 20.0);
//! # Ok::<(), aloft_geometry::GeometryError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod origin;
pub mod rect;
pub mod solver;

pub use error::{GeometryError, GeometryResult};
pub use origin::{AxisPoint, Horizontal, Origin, Vertical};
pub use rect::{AnchorRect, BoundingBox, Placement, PositionMap, TargetSize, Viewport};
pub use solver::{
    anchor_position_map, apply_auto_position, fallback_axis, fallback_for_axis,
    initial_placement, overlap_mode, solve, target_position_map, Fallback, FallbackAxis,
    OverlapMode, Solution,
};
