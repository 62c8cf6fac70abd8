//! Attachment points on the 3x3 origin grid.
//!
//! Both the anchor and the panel name one point on their own box. The
//! solver lines the two points up.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{GeometryError, GeometryResult};
use crate::rect::PositionMap;

/// Vertical reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Vertical {
    /// Top edge.
    #[default]
    Top,
    /// Vertical median.
    Center,
    /// Bottom edge.
    Bottom,
}

/// Horizontal reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Horizontal {
    /// Left edge.
    #[default]
    Left,
    /// Horizontal median.
    Middle,
    /// Right edge.
    Right,
}

/// A point on one axis of the origin grid.
///
/// Lets the fallback search run the same code for both axes.
pub trait AxisPoint: Copy + Eq + fmt::Debug {
    /// The median point of this axis (`center` or `middle`).
    const MEDIAN: Self;
    /// The two edges of this axis, leading edge first.
    const EDGES: [Self; 2];

    /// Reads this point's coordinate out of a position map.
    fn select(self, map: &PositionMap) -> f32;

    /// Returns the opposite edge. The median maps to itself.
    #[must_use]
    fn flip(self) -> Self;

    /// Returns true for the median point.
    fn is_median(self) -> bool {
        self == Self::MEDIAN
    }
}

impl AxisPoint for Vertical {
    const MEDIAN: Self = Self::Center;
    const EDGES: [Self; 2] = [Self::Top, Self::Bottom];

    #[inline]
    fn select(self, map: &PositionMap) -> f32 {
        match self {
            Self::Top => map.top,
            Self::Center => map.center,
            Self::Bottom => map.bottom,
        }
    }

    fn flip(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Center => Self::Center,
            Self::Bottom => Self::Top,
        }
    }
}

impl AxisPoint for Horizontal {
    const MEDIAN: Self = Self::Middle;
    const EDGES: [Self; 2] = [Self::Left, Self::Right];

    #[inline]
    fn select(self, map: &PositionMap) -> f32 {
        match self {
            Self::Left => map.left,
            Self::Middle => map.middle,
            Self::Right => map.right,
        }
    }

    fn flip(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Middle => Self::Middle,
            Self::Right => Self::Left,
        }
    }
}

impl Vertical {
    /// Label used in config files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

impl Horizontal {
    /// Label used in config files and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

impl FromStr for Vertical {
    type Err = GeometryError;

    fn from_str(s: &str) -> GeometryResult<Self> {
        match s {
            "top" => Ok(Self::Top),
            "center" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => Err(GeometryError::InvalidOrigin {
                axis: "vertical",
                value: other.to_owned(),
            }),
        }
    }
}

impl FromStr for Horizontal {
    type Err = GeometryError;

    fn from_str(s: &str) -> GeometryResult<Self> {
        match s {
            "left" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            "right" => Ok(Self::Right),
            other => Err(GeometryError::InvalidOrigin {
                axis: "horizontal",
                value: other.to_owned(),
            }),
        }
    }
}

/// A named point on the 3x3 grid of a box.
///
/// Deserializes from the same labels [`FromStr`] accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Origin {
    /// Vertical component.
    pub vertical: Vertical,
    /// Horizontal component.
    pub horizontal: Horizontal,
}

impl Origin {
    /// Top-left corner.
    pub const TOP_LEFT: Self = Self::new(Vertical::Top, Horizontal::Left);
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self::new(Vertical::Bottom, Horizontal::Left);
    /// Center of the top edge.
    pub const TOP_MIDDLE: Self = Self::new(Vertical::Top, Horizontal::Middle);
    /// Center of the bottom edge.
    pub const BOTTOM_MIDDLE: Self = Self::new(Vertical::Bottom, Horizontal::Middle);

    /// Every point on the grid, row by row.
    pub const ALL: [Self; 9] = [
        Self::new(Vertical::Top, Horizontal::Left),
        Self::new(Vertical::Top, Horizontal::Middle),
        Self::new(Vertical::Top, Horizontal::Right),
        Self::new(Vertical::Center, Horizontal::Left),
        Self::new(Vertical::Center, Horizontal::Middle),
        Self::new(Vertical::Center, Horizontal::Right),
        Self::new(Vertical::Bottom, Horizontal::Left),
        Self::new(Vertical::Bottom, Horizontal::Middle),
        Self::new(Vertical::Bottom, Horizontal::Right),
    ];

    /// Creates an origin.
    #[must_use]
    pub const fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self { vertical, horizontal }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.vertical.as_str(), self.horizontal.as_str())
    }
}

/// Parses `"<vertical> <horizontal>"`; a `-` separator is accepted too.
impl FromStr for Origin {
    type Err = GeometryError;

    fn from_str(s: &str) -> GeometryResult<Self> {
        let mut parts = s
            .split(|c: char| c.is_whitespace() || c == '-')
            .filter(|p| !p.is_empty());
        let vertical = parts.next().unwrap_or_default().parse()?;
        let horizontal = parts.next().unwrap_or_default().parse()?;
        if let Some(extra) = parts.next() {
            return Err(GeometryError::InvalidOrigin {
                axis: "horizontal",
                value: extra.to_owned(),
            });
        }
        Ok(Self::new(vertical, horizontal))
    }
}

impl TryFrom<String> for Vertical {
    type Error = GeometryError;

    fn try_from(label: String) -> GeometryResult<Self> {
        label.parse()
    }
}

impl TryFrom<String> for Horizontal {
    type Error = GeometryError;

    fn try_from(label: String) -> GeometryResult<Self> {
        label.parse()
    }
}

impl TryFrom<String> for Origin {
    type Error = GeometryError;

    fn try_from(label: String) -> GeometryResult<Self> {
        label.parse()
    }
}
