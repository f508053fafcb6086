use serde::{Deserialize, Serialize};

/// Direction the snake travels in. Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Heading) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    /// Displacement (dx, dy) of one move, scaled to the board's cell size
    pub fn displacement(&self, cell_size: i32) -> (i32, i32) {
        match self {
            Heading::Up => (0, -cell_size),
            Heading::Down => (0, cell_size),
            Heading::Left => (-cell_size, 0),
            Heading::Right => (cell_size, 0),
        }
    }

    /// Heading that moves `from` onto `to` in one step, if they are adjacent
    pub fn between(from: (i32, i32), to: (i32, i32), cell_size: i32) -> Option<Heading> {
        let delta = (to.0 - from.0, to.1 - from.1);
        Heading::ALL
            .into_iter()
            .find(|h| h.displacement(cell_size) == delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_headings() {
        assert!(Heading::Up.is_opposite(Heading::Down));
        assert!(Heading::Down.is_opposite(Heading::Up));
        assert!(Heading::Left.is_opposite(Heading::Right));
        assert!(Heading::Right.is_opposite(Heading::Left));

        assert!(!Heading::Up.is_opposite(Heading::Left));
        assert!(!Heading::Up.is_opposite(Heading::Up));
    }

    #[test]
    fn test_displacement_has_cell_size_length() {
        for heading in Heading::ALL {
            let (dx, dy) = heading.displacement(20);
            assert_eq!(dx.abs() + dy.abs(), 20);
        }
        assert_eq!(Heading::Up.displacement(20), (0, -20));
        assert_eq!(Heading::Right.displacement(20), (20, 0));
    }

    #[test]
    fn test_between() {
        assert_eq!(Heading::between((100, 200), (120, 200), 20), Some(Heading::Right));
        assert_eq!(Heading::between((100, 200), (100, 180), 20), Some(Heading::Up));
        assert_eq!(Heading::between((100, 200), (140, 200), 20), None);
        assert_eq!(Heading::between((100, 200), (120, 220), 20), None);
    }
}
