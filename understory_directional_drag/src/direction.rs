// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cardinal swipe directions in scene coordinates (Y grows downwards).

use core::fmt;

use kurbo::Point;

/// The direction a drag must follow to be recognized.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards increasing X.
    #[default]
    Right,
    /// Towards decreasing X.
    Left,
    /// Towards increasing Y.
    Down,
    /// Towards decreasing Y.
    Up,
}

impl Direction {
    /// Returns `true` for [`Direction::Left`] and [`Direction::Right`].
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns `true` for [`Direction::Up`] and [`Direction::Down`].
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    /// Returns `true` if coordinates grow along this direction.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Self::Right | Self::Down)
    }

    /// Projects `point` onto this direction's axis.
    ///
    /// That is `point.x` for horizontal directions and `point.y` otherwise.
    #[must_use]
    pub fn axis_value(self, point: Point) -> f64 {
        if self.is_horizontal() {
            point.x
        } else {
            point.y
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Down => "down",
            Self::Up => "up",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(Direction::Up.is_vertical());
        assert!(Direction::Down.is_vertical());
        assert!(Direction::Right.is_positive());
        assert!(Direction::Down.is_positive());
        assert!(!Direction::Up.is_positive());
        assert!(!Direction::Left.is_positive());
    }

    #[test]
    fn axis_value_picks_primary_coordinate() {
        let p = Point::new(3.0, -4.0);
        assert_eq!(Direction::Left.axis_value(p), 3.0);
        assert_eq!(Direction::Up.axis_value(p), -4.0);
    }

    #[test]
    fn default_is_right() {
        assert_eq!(Direction::default(), Direction::Right);
    }
}
