use std::fmt;

use serde::Serialize;

use super::{OutpaintAction, OutpaintCondition};
use crate::direction::Direction;

/// Human-facing summary of an [`OutpaintAction`]. Carries no behaviour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutpaintDescription {
    pub action: OutpaintAction,
    /// Condition the description was resolved from, when known
    pub condition: Option<OutpaintCondition>,
    pub anchor: Direction,
    pub expand: Vec<Direction>,
    pub shrink: Vec<Direction>,
    pub label: &'static str,
    pub scale_glyphs: &'static str,
    pub source_glyphs: &'static str,
    pub dest_glyphs: &'static str,
}

impl OutpaintDescription {
    pub fn for_action(action: OutpaintAction) -> Option<Self> {
        use Direction::*;

        let (anchor, expand, shrink, label, scale, source, dest) = match action {
            OutpaintAction::None => return None,
            OutpaintAction::ScaleUp => (Center, vec![Up, Down, Left, Right], vec![], "Upscale image", "⤡", "■", "█"),
            OutpaintAction::ScaleDown => (Center, vec![], vec![Up, Down, Left, Right], "Downscale image", "↘↖", "█", "■"),
            OutpaintAction::CenterHorizontal => (Center, vec![Left, Right], vec![], "Outpaint left & right", "⇆", "▮", "█"),
            OutpaintAction::CenterVertical => (Center, vec![Up, Down], vec![], "Outpaint up & down", "⇅", "█", "▮"),
            OutpaintAction::ToRight => (Left, vec![Right], vec![], "Outpaint right", "→", "▐", "█"),
            OutpaintAction::ToLeft => (Right, vec![Left], vec![], "Outpaint left", "←", "▌", "█"),
            OutpaintAction::ToBottom => (Up, vec![Down], vec![], "Outpaint down", "↓", "▀", "█"),
            OutpaintAction::ToTop => (Down, vec![Up], vec![], "Outpaint up", "↑", "▄", "█"),
        };

        Some(Self {
            action,
            condition: None,
            anchor,
            expand,
            shrink,
            label,
            scale_glyphs: scale,
            source_glyphs: source,
            dest_glyphs: dest,
        })
    }

    pub fn with_condition(mut self, condition: OutpaintCondition) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl fmt::Display for OutpaintDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchor == Direction::Right {
            write!(f, "{}{} ⇨ {}", self.scale_glyphs, self.source_glyphs, self.dest_glyphs)
        } else {
            write!(f, "{}{} ⇨ {}", self.source_glyphs, self.scale_glyphs, self.dest_glyphs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_order_follows_anchor() {
        let left = OutpaintDescription::for_action(OutpaintAction::ToLeft).unwrap();
        assert_eq!(left.anchor, Direction::Right);
        assert_eq!(left.to_string(), "←▌ ⇨ █");

        let right = OutpaintDescription::for_action(OutpaintAction::ToRight).unwrap();
        assert_eq!(right.to_string(), "▐→ ⇨ █");
    }

    #[test]
    fn test_expand_directions_exclude_anchor() {
        for action in [OutpaintAction::ToRight, OutpaintAction::ToLeft, OutpaintAction::ToTop, OutpaintAction::ToBottom] {
            let description = action.description().unwrap();
            assert_eq!(description.expand.len(), 1);
            assert!(!description.expand.contains(&description.anchor));
        }
    }
}
