use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

/// Edge (or center) a source image is pinned to inside a larger canvas.
#[derive(
    Debug, Clone, Copy, Default,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    #[default]
    Center,
    Right,
    Left,
    Down,
    Up,
}

impl Direction {
    /// Unit offset of the direction in image coordinates (y grows downward)
    pub fn unit(self) -> (i32, i32) {
        match self {
            Self::Center => (0, 0),
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn is_upper_or_left(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }

    pub fn is_lower_or_right(self) -> bool {
        matches!(self, Self::Down | Self::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert!("sideways".parse::<Direction>().is_err());
        assert_eq!(Direction::Down.to_string(), "down");
    }

    #[test]
    fn test_orientation_partitions() {
        for dir in Direction::iter() {
            let classes = [dir.is_horizontal(), dir.is_vertical(), dir == Direction::Center];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{dir}");
            assert_eq!(dir.is_upper_or_left() || dir.is_lower_or_right(), dir != Direction::Center);
        }
    }
}
