use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use indicatif::{ProgressBar, ProgressStyle};

use std::io::{stdout, Write};

use connect4_minimax::{Board, Cell, GameObserver, Player, WinningLine, HEIGHT, WIDTH};

/// Draws the board with red and yellow tokens on blue, column numbers on top
pub fn draw(board: &Board, winning_line: Option<&WinningLine>) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let background = match winning_line {
                Some(line) if line.contains(column, row) => Color::DarkGreen,
                _ => Color::DarkBlue,
            };
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(match board.cell(column, row) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => background,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}

/// Presents a running game on the terminal
#[derive(Default)]
pub struct TerminalObserver {
    board: Board,
    winning_line: Option<WinningLine>,
    spinner: Option<ProgressBar>,
}

impl TerminalObserver {
    fn redraw(&self) {
        if let Err(err) = draw(&self.board, self.winning_line.as_ref()) {
            eprintln!("Failed to draw board: {}", err);
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl GameObserver for TerminalObserver {
    fn update_positions(&mut self, board: &Board) {
        self.stop_spinner();
        self.board = *board;
        self.redraw();
    }

    fn update_possible_drops(&mut self, columns: &[usize]) {
        let columns: Vec<String> = columns.iter().map(|c| (c + 1).to_string()).collect();
        println!("Playable columns: {}", columns.join(" "));
    }

    fn write_to_log(&mut self, line: &str) {
        println!("{}", line);
    }

    fn thinking(&mut self, player: Player) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} {elapsed}"));
        spinner.set_message(&format!("Player {} is thinking...", player.number()));
        spinner.enable_steady_tick(100);
        self.spinner = Some(spinner);
    }

    fn game_over(&mut self, winner: Option<Player>) {
        self.stop_spinner();
        match winner {
            Some(player) => println!("Player {} wins!", player.number()),
            None => println!("Draw!"),
        }
    }

    fn set_winning_line(&mut self, line: WinningLine) {
        self.winning_line = Some(line);
        self.redraw();
    }
}
