#![cfg(feature = "std")]

//! Terminal rendering and input parsing for the `seabattle` binary.

use std::io::{self, BufRead, Write};
use std::string::String;

use crate::{
    board::Board,
    common::{CellState, Coord, ShotOutcome},
    config::GRID_SIZE,
};

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// A cell such as `B7`.
    Cell(Coord),
    /// `r`: turn the ship being placed.
    Rotate,
    /// `auto`: lay the fleet out at random.
    Auto,
    /// `remove B7`: pick the ship at B7 back up.
    Remove(Coord),
    /// `q`
    Quit,
}

pub fn coord_to_string(c: Coord) -> String {
    let col = (b'A' + c.x as u8) as char;
    std::format!("{}{}", col, c.y + 1)
}

/// Parse `A1`..`J10` (case-insensitive) into a coordinate.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let x = (col_ch as u8).wrapping_sub(b'A') as usize;
    if x >= GRID_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > GRID_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coord::new(x, row - 1))
}

pub fn parse_command(input: &str) -> Result<Command, String> {
    let input = input.trim();
    match input.to_ascii_lowercase().as_str() {
        "r" | "rotate" => return Ok(Command::Rotate),
        "auto" => return Ok(Command::Auto),
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        _ => {}
    }
    if let (Some(head), Some(rest)) = (input.get(..7), input.get(7..)) {
        if head.eq_ignore_ascii_case("remove ") {
            return parse_coord(rest).map(Command::Remove);
        }
    }
    parse_coord(input).map(Command::Cell)
}

fn cell_char(board: &Board, x: usize, y: usize, reveal: bool) -> char {
    match board.cell_state(x, y) {
        CellState::Shot if board.is_occupied(x, y) => 'X',
        CellState::Shot => 'o',
        CellState::Excluded => '·',
        CellState::Unshot if reveal && board.is_occupied(x, y) => 'S',
        CellState::Unshot => '.',
    }
}

/// Render a board. With `reveal` unset only shot results are shown.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for x in 0..GRID_SIZE {
        out.push(' ');
        out.push((b'A' + x as u8) as char);
    }
    out.push('\n');
    for y in 0..GRID_SIZE {
        out.push_str(&format!("  {:2}", y + 1));
        for x in 0..GRID_SIZE {
            out.push(' ');
            out.push(cell_char(board, x, y, reveal));
        }
        out.push('\n');
    }
    if reveal {
        out.push_str("    Legend: S=Ship  X=Hit  o=Miss  ·=Cleared  .=Water\n");
    } else {
        out.push_str("    Legend: X=Hit  o=Miss  ·=Cleared  .=Unknown\n");
    }
    out
}

pub fn print_board(title: &str, board: &Board, reveal: bool) {
    std::println!("\n  {}  ({} ships afloat)", title, board.ships_afloat());
    std::print!("{}", render_board(board, reveal));
}

pub fn describe_outcome(outcome: ShotOutcome) -> String {
    match outcome {
        ShotOutcome::Miss => "Miss.".to_string(),
        ShotOutcome::Hit => "Hit!".to_string(),
        ShotOutcome::Sunk { length } => format!("Sunk a {}-decker!", length),
    }
}

/// Print `prompt` and read one line. `Ok(None)` on end of input.
pub fn prompt_line(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    std::print!("{}", prompt);
    io::stdout().flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim().to_string()))
}
