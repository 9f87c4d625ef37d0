//! Turn orchestration between human and computer players

use anyhow::{Context, Result};
use log::{info, warn};

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Player, WinningLine},
    config::{GameConfig, ParticipantKind},
    engine::{Decision, Engine},
};

/// Callbacks from a running [`Game`] toward whatever presents it
pub trait GameObserver {
    /// The live board changed
    fn update_positions(&mut self, board: &Board);

    /// A human is to move and may choose among these columns
    fn update_possible_drops(&mut self, columns: &[usize]);

    /// A line for the game log
    fn write_to_log(&mut self, line: &str);

    /// A computer player started searching
    fn thinking(&mut self, _player: Player) {}

    /// The game ended, `None` for a draw
    fn game_over(&mut self, winner: Option<Player>);

    /// The line of four that decided the game
    fn set_winning_line(&mut self, line: WinningLine);
}

/// Who makes the moves of one player
pub(crate) enum Participant {
    Human,
    Computer(Engine),
}

/// A match on a single live board
///
/// Computer turns run synchronously inside [`start`](Game::start) and
/// [`human_move`](Game::human_move), so every call returns with either a
/// human to move or the game over.
pub struct Game<O: GameObserver> {
    board: Board,
    participants: [Participant; 2],
    thinking_time: [Duration; 2],
    starting_player: Player,
    current_player: Player,
    game_over: bool,
    observer: O,
}

impl<O: GameObserver> Game<O> {
    /// Sets up the participants described by `config` on an empty board
    pub fn new(config: &GameConfig, observer: O) -> Result<Self> {
        config.validate()?;

        let participant = |player: Player| -> Result<Participant> {
            let player_config = config.player(player);
            Ok(match player_config.kind {
                ParticipantKind::Human => Participant::Human,
                ParticipantKind::Computer => Participant::Computer(
                    Engine::new(player_config.depth, player)?.with_search_mode(config.search_mode),
                ),
            })
        };

        Ok(Self {
            board: Board::new(),
            participants: [participant(Player::One)?, participant(Player::Two)?],
            thinking_time: [Duration::default(); 2],
            starting_player: config.starting_player,
            current_player: config.starting_player,
            game_over: false,
            observer,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Total search time spent by `player` so far
    pub fn thinking_time(&self, player: Player) -> Duration {
        self.thinking_time[player.index()]
    }

    pub fn is_human_turn(&self) -> bool {
        !self.game_over
            && matches!(self.participants[self.current_player.index()], Participant::Human)
    }

    /// Announces the empty board, then plays computer turns until a human is
    /// to move or the game ends
    pub fn start(&mut self) -> Result<()> {
        for (player, participant) in [Player::One, Player::Two].iter().zip(self.participants.iter()) {
            let line = match participant {
                Participant::Human => format!("P{}: human", player.number()),
                Participant::Computer(engine) => {
                    format!("P{}: ai, depth {}", player.number(), engine.depth())
                }
            };
            self.observer.write_to_log(&line);
        }
        self.observer
            .write_to_log(&format!("P{} starts", self.current_player.number()));
        self.observer.update_positions(&self.board);

        self.advance()
    }

    /// Clears the board and thinking times and starts a new match with the
    /// same participants
    pub fn restart(&mut self) -> Result<()> {
        self.board.reset();
        self.thinking_time = [Duration::default(); 2];
        self.current_player = self.starting_player;
        self.game_over = false;
        self.observer.write_to_log("new game");

        self.start()
    }

    /// Plays `column` for the human to move
    ///
    /// Returns `false` without touching the board when the move is rejected:
    /// the game is over, a computer is to move, or the column is not in
    /// [`Board::possible_drops`].
    pub fn human_move(&mut self, column: usize) -> Result<bool> {
        if !self.is_human_turn() {
            warn!("ignoring human move in column {}, not a human turn", column);
            self.observer
                .write_to_log(&format!("move {} ignored, not a human turn", column));
            return Ok(false);
        }
        if !self.board.possible_drops().contains(&column) {
            warn!("rejected move in column {}", column);
            self.observer
                .write_to_log(&format!("column {} is not playable", column));
            return Ok(false);
        }

        self.board.drop(column, self.current_player);
        self.observer.update_positions(&self.board);
        self.observer
            .write_to_log(&format!("P{} : {}", self.current_player.number(), column));

        self.finish_turn();
        self.advance()?;
        Ok(true)
    }

    /// Runs computer turns until a human is to move or the game ends
    fn advance(&mut self) -> Result<()> {
        while !self.game_over {
            let engine = match &self.participants[self.current_player.index()] {
                Participant::Computer(engine) => *engine,
                Participant::Human => {
                    let drops = self.board.possible_drops();
                    self.observer.update_possible_drops(&drops);
                    break;
                }
            };
            self.computer_move(&engine)?;
            self.finish_turn();
        }
        Ok(())
    }

    fn computer_move(&mut self, engine: &Engine) -> Result<Decision> {
        let player = self.current_player;
        self.observer.thinking(player);

        let start = Instant::now();
        let decision = engine
            .decide(&self.board)
            .with_context(|| format!("player {} could not choose a move", player.number()))?;
        let elapsed = start.elapsed();
        self.thinking_time[player.index()] += elapsed;

        self.board.drop(decision.column, player);
        self.observer.update_positions(&self.board);

        info!(
            "player {} plays column {} (score {}, {} nodes, {:?})",
            player.number(),
            decision.column,
            decision.score,
            decision.node_count,
            elapsed
        );
        self.observer
            .write_to_log(&format!("player {}: {}", player.number(), decision.column));
        self.observer
            .write_to_log(&format!("score: {}", decision.score));
        self.observer
            .write_to_log(&format!("nodes: {}", decision.node_count));
        self.observer
            .write_to_log(&format!("time: {}", format_duration(elapsed)));

        Ok(decision)
    }

    /// Checks the live board after the current player moved, then either ends
    /// the game or passes the turn
    fn finish_turn(&mut self) {
        let player = self.current_player;

        if let Some(line) = self.board.winning_line(player) {
            self.observer
                .write_to_log(&format!("player {} wins", player.number()));
            self.log_total_times();
            self.game_over = true;
            self.observer.game_over(Some(player));
            self.observer.set_winning_line(line);
        } else if self.board.is_full() {
            self.observer.write_to_log("draw");
            self.log_total_times();
            self.game_over = true;
            self.observer.game_over(None);
        } else {
            self.current_player = player.other();
        }
    }

    fn log_total_times(&mut self) {
        for &player in [Player::One, Player::Two].iter() {
            if let Participant::Computer(_) = self.participants[player.index()] {
                let total = format_duration(self.thinking_time(player));
                self.observer
                    .write_to_log(&format!("player {} total time: {}", player.number(), total));
            }
        }
    }
}

/// Milliseconds below one second, whole seconds above
pub fn format_duration(duration: Duration) -> String {
    if duration >= Duration::from_secs(1) {
        format!("{} s", duration.as_secs())
    } else {
        format!("{} ms", duration.as_millis())
    }
}
