use crate::model::player::Seat;
use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TeamId {
    NorthSouth = 0,
    EastWest = 1,
}

impl TeamId {
    pub const BOTH: [TeamId; 2] = [TeamId::NorthSouth, TeamId::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> TeamId {
        match self {
            TeamId::NorthSouth => TeamId::EastWest,
            TeamId::EastWest => TeamId::NorthSouth,
        }
    }

    pub const fn members(self) -> [Seat; 2] {
        match self {
            TeamId::NorthSouth => [Seat::North, Seat::South],
            TeamId::EastWest => [Seat::East, Seat::West],
        }
    }

    pub fn contains(self, seat: Seat) -> bool {
        seat.team() == self
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TeamId::NorthSouth => "North/South",
            TeamId::EastWest => "East/West",
        };
        f.write_str(label)
    }
}
