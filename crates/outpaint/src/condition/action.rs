use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use super::{Axis, OutpaintCondition, OutpaintDescription, SizeRelation};
use crate::direction::Direction;

#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutpaintAction {
    #[default]
    None,
    ScaleUp,
    ScaleDown,
    CenterHorizontal,
    CenterVertical,
    ToRight,
    ToLeft,
    ToTop,
    ToBottom,
}

impl OutpaintAction {
    /// Looks up the action for a classified condition.
    ///
    /// Only the scale axis, the same-aspect size relation and the anchor take
    /// part. Combinations with no entry, such as an anchor lying across the
    /// scale axis, resolve to [`OutpaintAction::None`].
    pub fn from_condition(condition: &OutpaintCondition) -> Self {
        match (condition.scale_axis, condition.same_aspect, condition.size_relation, condition.anchor) {
            (None, true, Some(SizeRelation::Bigger), Direction::Center) => Self::ScaleUp,
            (None, true, Some(SizeRelation::Smaller), Direction::Center) => Self::ScaleDown,
            (Some(Axis::Y), _, _, Direction::Center) => Self::CenterVertical,
            (Some(Axis::Y), _, _, Direction::Up) => Self::ToBottom,
            (Some(Axis::Y), _, _, Direction::Down) => Self::ToTop,
            (Some(Axis::X), _, _, Direction::Center) => Self::CenterHorizontal,
            (Some(Axis::X), _, _, Direction::Right) => Self::ToLeft,
            (Some(Axis::X), _, _, Direction::Left) => Self::ToRight,
            _ => Self::None,
        }
    }

    pub fn is_actionable(self) -> bool {
        self != Self::None
    }

    /// Presentation metadata; `None` has no description.
    pub fn description(self) -> Option<OutpaintDescription> {
        OutpaintDescription::for_action(self)
    }
}
