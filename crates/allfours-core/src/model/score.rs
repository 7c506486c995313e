use crate::model::team::TeamId;
use serde::{Deserialize, Serialize};

/// Chalk needed to win a match.
pub const WINNING_CHALK: u32 = 14;

/// Both teams' match chalk plus the game points captured in the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    chalk: [u32; 2],
    game_points: [u32; 2],
    target: u32,
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self::with_target(WINNING_CHALK)
    }

    pub const fn with_target(target: u32) -> Self {
        Self {
            chalk: [0; 2],
            game_points: [0; 2],
            target,
        }
    }

    pub const fn target(&self) -> u32 {
        self.target
    }

    pub fn add_chalk(&mut self, team: TeamId, chalk: u32) {
        self.chalk[team.index()] += chalk;
    }

    pub fn set_chalk(&mut self, team: TeamId, chalk: u32) {
        self.chalk[team.index()] = chalk;
    }

    pub fn chalk(&self, team: TeamId) -> u32 {
        self.chalk[team.index()]
    }

    pub fn standings(&self) -> &[u32; 2] {
        &self.chalk
    }

    pub fn add_game_points(&mut self, team: TeamId, points: u32) {
        self.game_points[team.index()] += points;
    }

    pub fn game_points(&self, team: TeamId) -> u32 {
        self.game_points[team.index()]
    }

    pub fn reset_game_points(&mut self) {
        self.game_points = [0; 2];
    }

    /// True once either team has reached the target.
    pub fn is_clinched(&self) -> bool {
        self.chalk.iter().any(|&c| c >= self.target)
    }

    pub fn winner(&self) -> Option<TeamId> {
        TeamId::BOTH
            .iter()
            .copied()
            .find(|team| self.chalk(*team) >= self.target)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{ScoreBoard, WINNING_CHALK};
    use crate::model::team::TeamId;

    #[test]
    fn scoreboard_tracks_chalk_per_team() {
        let mut board = ScoreBoard::new();
        board.add_chalk(TeamId::EastWest, 3);
        assert_eq!(board.chalk(TeamId::EastWest), 3);
        assert_eq!(board.chalk(TeamId::NorthSouth), 0);
        assert_eq!(board.target(), WINNING_CHALK);
    }

    #[test]
    fn clinch_at_target() {
        let mut board = ScoreBoard::new();
        board.set_chalk(TeamId::NorthSouth, 13);
        assert!(!board.is_clinched());
        board.add_chalk(TeamId::NorthSouth, 1);
        assert!(board.is_clinched());
        assert_eq!(board.winner(), Some(TeamId::NorthSouth));
    }

    #[test]
    fn game_points_reset_without_touching_chalk() {
        let mut board = ScoreBoard::new();
        board.add_chalk(TeamId::EastWest, 2);
        board.add_game_points(TeamId::EastWest, 17);
        board.reset_game_points();
        assert_eq!(board.game_points(TeamId::EastWest), 0);
        assert_eq!(board.chalk(TeamId::EastWest), 2);
    }
}
