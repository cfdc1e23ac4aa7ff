//! Line-oriented terminal front end.
//!
//! Reads commands from any `BufRead`, drives the engine, and renders the
//! board and status line to any `Write`.

use crossterm::style::{Color, Stylize, style};
use derive_more::Display;
use gridlock_core::{Coord, Game, Move};
use std::io::{self, BufRead, Write};
use tracing::{debug, info, instrument, warn};

const HELP: &str = "Enter `row col` to play, `reset` to play again, `quit` to exit.";

/// A parsed line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place the current player's mark.
    Place {
        /// Zero-based row.
        row: usize,
        /// Zero-based column.
        col: usize,
    },
    /// Clear the board and play again.
    Reset,
    /// Show usage.
    Help,
    /// Leave the session.
    Quit,
}

/// Input that could not be read as a command.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// Nothing but whitespace.
    #[display("Empty input")]
    Empty,
    /// Not a known keyword or coordinate pair.
    #[display("Unrecognized input {:?}", _0)]
    Unrecognized(String),
}

impl std::error::Error for InputError {}

/// Parses one line of input.
///
/// Coordinates may be separated by whitespace or a comma.
#[instrument]
pub fn parse_command(line: &str) -> Result<Command, InputError> {
    let trimmed = line.trim();
    match trimmed.to_lowercase().as_str() {
        "" => return Err(InputError::Empty),
        "reset" | "r" | "play again" => return Ok(Command::Reset),
        "help" | "h" | "?" => return Ok(Command::Help),
        "quit" | "q" | "exit" => return Ok(Command::Quit),
        _ => {}
    }

    let parts: Vec<&str> = trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();
    match parts.as_slice() {
        [row, col] => match (row.parse(), col.parse()) {
            (Ok(row), Ok(col)) => Ok(Command::Place { row, col }),
            _ => Err(InputError::Unrecognized(trimmed.to_string())),
        },
        _ => Err(InputError::Unrecognized(trimmed.to_string())),
    }
}

/// Renders the board with column and row headers.
///
/// Empty cells show as `.`; cells of the winning line are bracketed.
pub fn render_board(game: &Game, color: bool) -> String {
    let size = game.board_size();
    let width = size.saturating_sub(1).to_string().len();
    let mut out = format!("{:width$} ", "");
    for col in 0..size {
        out.push_str(&format!(" {col:^width$} "));
    }
    out.push('\n');

    for row in 0..size {
        out.push_str(&format!("{row:>width$} "));
        for col in 0..size {
            let label = game
                .cell(row, col)
                .filter(|cell| cell.is_played())
                .map_or_else(|| ".".to_string(), |cell| paint_label(game, cell, color));
            let label = pad(&label, width, game.cell(row, col));
            if game.winner_combo().contains(&(row, col)) {
                out.push_str(&format!("[{label}]"));
            } else {
                out.push_str(&format!(" {label} "));
            }
        }
        out.push('\n');
    }
    out
}

fn pad(label: &str, width: usize, cell: Option<&Move>) -> String {
    let visible = cell
        .filter(|cell| cell.is_played())
        .map_or(1, |cell| cell.label().chars().count());
    format!("{label}{}", " ".repeat(width.saturating_sub(visible)))
}

fn paint_label(game: &Game, cell: &Move, color: bool) -> String {
    let label = cell.label().as_str();
    let hint = game
        .players()
        .iter()
        .find(|player| player.label() == label)
        .map(|player| player.color().as_str());
    paint(label, hint, color)
}

fn paint(text: &str, hint: Option<&str>, color: bool) -> String {
    match hint.map(Color::try_from) {
        Some(Ok(fg)) if color => style(text).with(fg).to_string(),
        _ => text.to_string(),
    }
}

/// Describes line `index` of the winning-line table for `size`.
pub fn describe_line(index: usize, size: usize) -> String {
    if index < size {
        format!("row {index}")
    } else if index < 2 * size {
        format!("column {}", index - size)
    } else if index == 2 * size {
        "main diagonal".to_string()
    } else {
        "anti-diagonal".to_string()
    }
}

/// Formats a line as space-separated coordinates.
pub fn format_line(line: &[Coord]) -> String {
    line.iter()
        .map(|(row, col)| format!("({row},{col})"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// An interactive session over one game.
pub struct Session<R, W> {
    game: Game,
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session reading from `input` and rendering to `output`.
    pub fn new(game: Game, input: R, output: W, color: bool) -> Self {
        Self {
            game,
            input,
            output,
            color,
        }
    }

    /// Returns the game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs until `quit` or end of input.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        self.show("Ready?", None)?;
        writeln!(self.output, "{HELP}")?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("Input closed");
                break;
            }
            match parse_command(&line) {
                Ok(Command::Place { row, col }) => self.play(row, col)?,
                Ok(Command::Reset) => {
                    self.game.reset();
                    self.show("Ready?", None)?;
                }
                Ok(Command::Help) => writeln!(self.output, "{HELP}")?,
                Ok(Command::Quit) => break,
                Err(InputError::Empty) => {}
                Err(err) => {
                    debug!(%err, "Bad input");
                    writeln!(self.output, "{err}. {HELP}")?;
                }
            }
        }
        info!("Session ended");
        Ok(())
    }

    /// Handles one placement the way a click on a cell would.
    #[instrument(skip(self))]
    fn play(&mut self, row: usize, col: usize) -> io::Result<()> {
        let mv = Move::new(row, col, self.game.current_player().label().as_str());
        if !self.game.is_valid_move(&mv) {
            let reason = if self.game.has_winner() || self.game.is_tied() {
                "The game is over; type `reset` to play again.".to_string()
            } else if self.game.cell(row, col).is_none() {
                let last = self.game.board_size() - 1;
                format!("({row}, {col}) is off the board; use 0 to {last}.")
            } else {
                format!("({row}, {col}) is already taken.")
            };
            return writeln!(self.output, "{reason}");
        }
        if let Err(err) = self.game.process_move(mv) {
            warn!(%err, "Validated move was rejected");
            return writeln!(self.output, "{err}");
        }

        if self.game.is_tied() {
            info!("Tied game");
            self.show("Tied game!", Some("red"))
        } else if self.game.has_winner() {
            let winner = self.game.current_player().clone();
            info!(winner = %winner.label(), "Game won");
            let message = format!("Player \"{}\" won!", winner.label());
            self.show(&message, Some(winner.color().as_str()))
        } else {
            self.game.toggle_player();
            let message = format!("{}'s turn", self.game.current_player().label());
            self.show(&message, None)
        }
    }

    fn show(&mut self, message: &str, hint: Option<&str>) -> io::Result<()> {
        let board = render_board(&self.game, self.color);
        let message = paint(message, hint, self.color);
        write!(self.output, "\n{board}{message}\n")?;
        self.output.flush()
    }
}
