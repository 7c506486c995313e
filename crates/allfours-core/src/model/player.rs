use crate::model::team::TeamId;
use core::fmt;
use serde::{Deserialize, Serialize};

/// A seat at the table. Partners sit opposite each other.
///
/// Play, dealing and the deal itself all pass to the right: `next()` is the
/// neighbour on a seat's right-hand side, which walks the compass
/// North → West → South → East.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// The seat to this player's right; the next to act.
    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::West,
            Seat::West => Seat::South,
            Seat::South => Seat::East,
            Seat::East => Seat::North,
        }
    }

    pub const fn previous(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    pub const fn partner(self) -> Seat {
        match self {
            Seat::North => Seat::South,
            Seat::East => Seat::West,
            Seat::South => Seat::North,
            Seat::West => Seat::East,
        }
    }

    pub const fn team(self) -> TeamId {
        match self {
            Seat::North | Seat::South => TeamId::NorthSouth,
            Seat::East | Seat::West => TeamId::EastWest,
        }
    }

    /// All four seats in acting order, starting with `self`.
    pub const fn rotation(self) -> [Seat; 4] {
        let second = self.next();
        let third = second.next();
        [self, second, third, third.next()]
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::Seat;
    use crate::model::team::TeamId;

    #[test]
    fn next_passes_to_the_right() {
        assert_eq!(Seat::North.next(), Seat::West);
        assert_eq!(Seat::East.next(), Seat::North);
    }

    #[test]
    fn previous_undoes_next() {
        for seat in Seat::LOOP {
            assert_eq!(seat.next().previous(), seat);
        }
    }

    #[test]
    fn rotation_alternates_teams() {
        let order = Seat::South.rotation();
        assert_eq!(order, [Seat::South, Seat::East, Seat::North, Seat::West]);
        for pair in order.windows(2) {
            assert_ne!(pair[0].team(), pair[1].team());
        }
    }

    #[test]
    fn partners_share_a_team() {
        for seat in Seat::LOOP {
            assert_eq!(seat.team(), seat.partner().team());
        }
        assert_eq!(Seat::West.team(), TeamId::EastWest);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in Seat::LOOP.iter().enumerate() {
            assert_eq!(Seat::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
