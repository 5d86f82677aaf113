//! Classification of a source → target transform.
//!
//! [`classify_transform`] reduces two pixel sizes and a requested anchor to an
//! [`OutpaintCondition`]; [`OutpaintAction::from_condition`] maps that onto the
//! single action the compositor performs.

pub mod action;
pub mod description;

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{direction::Direction, types::Dimensions};

pub use action::OutpaintAction;
pub use description::OutpaintDescription;

#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, IntoStaticStr,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Whether `anchor` lies across this axis and so cannot be honoured
    /// when extending along it.
    pub fn is_orthogonal_to(self, anchor: Direction) -> bool {
        match self {
            Self::X => anchor.is_vertical(),
            Self::Y => anchor.is_horizontal(),
        }
    }
}

#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize, JsonSchema,
    Display, IntoStaticStr,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SizeRelation {
    /// Target has more pixels than the source
    Bigger,
    /// Target has fewer pixels than the source
    Smaller,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct AxisFlags {
    pub x: bool,
    pub y: bool,
}

/// Geometric relationship between a source and a target size.
///
/// After classification exactly one of `scale_axis == Some(X)`,
/// `scale_axis == Some(Y)` or `same_aspect` holds. `size_relation` is only
/// set alongside `same_aspect`. `source_exceeds` is informational and plays no
/// part in action resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct OutpaintCondition {
    pub source_exceeds: AxisFlags,
    /// Axis on which the target extends beyond the scaled source
    pub scale_axis: Option<Axis>,
    pub anchor: Direction,
    pub same_aspect: bool,
    pub size_relation: Option<SizeRelation>,
}

impl OutpaintCondition {
    /// Classifies `source` against `target` with a centered anchor.
    ///
    /// Aspects are compared as floats; only exact equality counts as the
    /// same aspect. When the aspects differ the raw pixel deltas pick the
    /// axis, and a tie between them extends X.
    pub fn from_dimensions(source: Dimensions, target: Dimensions) -> Self {
        let (ax, ay) = (source.width as i64, source.height as i64);
        let (bx, by) = (target.width as i64, target.height as i64);
        let aspect_a = source.aspect();
        let aspect_b = target.aspect();

        let mut condition = Self {
            source_exceeds: AxisFlags { x: ax > bx, y: ay > by },
            scale_axis: None,
            anchor: Direction::Center,
            same_aspect: false,
            size_relation: None,
        };

        if aspect_a > aspect_b {
            condition.scale_axis = Some(if ax - bx > ay - by { Axis::Y } else { Axis::X });
        } else if aspect_a < aspect_b {
            condition.scale_axis = Some(if bx - ax > by - ay { Axis::X } else { Axis::Y });
        } else {
            condition.same_aspect = true;
            condition.size_relation = match source.area().cmp(&target.area()) {
                std::cmp::Ordering::Less => Some(SizeRelation::Bigger),
                std::cmp::Ordering::Greater => Some(SizeRelation::Smaller),
                std::cmp::Ordering::Equal => None,
            };
        }
        condition
    }

    /// Replaces the anchor, leaving every other field untouched.
    pub fn with_anchor(mut self, anchor: Direction) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn is_vertical_scale(&self) -> bool {
        self.scale_axis == Some(Axis::Y)
    }

    pub fn is_bigger(&self) -> bool {
        self.size_relation == Some(SizeRelation::Bigger)
    }

    pub fn is_smaller(&self) -> bool {
        self.size_relation == Some(SizeRelation::Smaller)
    }

    /// Axis the compositor resizes against; same-aspect transforms count as
    /// horizontal.
    pub fn effective_axis(&self) -> Axis {
        self.scale_axis.unwrap_or(Axis::X)
    }

    /// Degrades an anchor lying across the scale axis to center.
    pub fn self_corrected(self) -> Self {
        self.corrected_for(self.effective_axis())
    }

    /// Degrades the anchor to center if it is orthogonal to `axis`.
    pub fn corrected_for(self, axis: Axis) -> Self {
        if axis.is_orthogonal_to(self.anchor) {
            self.with_anchor(Direction::Center)
        } else {
            self
        }
    }

    pub fn action(&self) -> OutpaintAction {
        OutpaintAction::from_condition(self)
    }
}

impl fmt::Display for OutpaintCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();
        match (self.source_exceeds.x, self.source_exceeds.y) {
            (true, true) => parts.push("source_xy".into()),
            (true, false) => parts.push("source_x".into()),
            (false, true) => parts.push("source_y".into()),
            (false, false) => {}
        }
        if let Some(axis) = self.scale_axis {
            parts.push(format!("target_{axis}"));
        }
        parts.push(format!("anchor_{}", self.anchor));
        if self.same_aspect {
            parts.push("same_aspect".into());
        }
        if let Some(relation) = self.size_relation {
            parts.push(relation.to_string());
        }
        write!(f, "{}", parts.join("|"))
    }
}

/// Classifies `source` against `target` and applies the requested anchor.
///
/// The anchor is recorded as requested; use
/// [`OutpaintCondition::self_corrected`] to drop an anchor that cannot be
/// realized on the resolved axis.
pub fn classify_transform(source: Dimensions, target: Dimensions, anchor: Direction) -> OutpaintCondition {
    OutpaintCondition::from_dimensions(source, target).with_anchor(anchor)
}
