//! Settings for a single match

use std::str::FromStr;

use crate::{board::Player, engine::SearchMode, error::ConfigError, HEIGHT, WIDTH};

/// The deepest useful search, a game never lasts longer than this
pub const MAX_DEPTH: usize = WIDTH * HEIGHT;

/// Search depth used when none is given
pub const DEFAULT_DEPTH: usize = 4;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ParticipantKind {
    Human,
    Computer,
}

impl FromStr for ParticipantKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "human" | "h" => Ok(ParticipantKind::Human),
            "ai" | "computer" | "c" => Ok(ParticipantKind::Computer),
            _ => Err(ConfigError::UnknownParticipant(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PlayerConfig {
    pub kind: ParticipantKind,
    /// Search depth, only used by computer players
    pub depth: usize,
}

impl PlayerConfig {
    pub fn human() -> Self {
        Self {
            kind: ParticipantKind::Human,
            depth: DEFAULT_DEPTH,
        }
    }

    pub fn computer(depth: usize) -> Self {
        Self {
            kind: ParticipantKind::Computer,
            depth,
        }
    }
}

/// Who plays, how deep the computer players search and who moves first
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct GameConfig {
    pub player_one: PlayerConfig,
    pub player_two: PlayerConfig,
    pub starting_player: Player,
    pub search_mode: SearchMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_one: PlayerConfig::human(),
            player_two: PlayerConfig::computer(DEFAULT_DEPTH),
            starting_player: Player::One,
            search_mode: SearchMode::Sequential,
        }
    }
}

impl GameConfig {
    pub fn player(&self, player: Player) -> &PlayerConfig {
        match player {
            Player::One => &self.player_one,
            Player::Two => &self.player_two,
        }
    }

    /// Checks the search depth of every computer player
    pub fn validate(&self) -> Result<(), ConfigError> {
        for &player in [Player::One, Player::Two].iter() {
            let config = self.player(player);
            if config.kind == ParticipantKind::Computer
                && (config.depth == 0 || config.depth > MAX_DEPTH)
            {
                return Err(ConfigError::InvalidDepth {
                    player: player.number(),
                    depth: config.depth,
                    max: MAX_DEPTH,
                });
            }
        }
        Ok(())
    }
}
