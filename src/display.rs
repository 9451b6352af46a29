// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, board_layout, game_state};
use std::fmt::Write;

#[inline(always)]
pub fn empty_label(board_layout: &board_layout::BoardLayout, row: i8, col: i8) -> &'static str {
    if row == board_layout.star_row() && col == board_layout.star_col() {
        return "*";
    }
    let premium = board_layout.premium_at(row, col);
    match (premium.word_multiplier, premium.letter_multiplier) {
        (3, _) => "=",
        (2, _) => "-",
        (_, 3) => "\"",
        (_, 2) => "\'",
        _ => " ",
    }
}

#[inline(always)]
pub fn board_label<'a>(alphabet: &'a alphabet::Alphabet<'a>, board: &board::Board, row: i8, col: i8) -> &'a str {
    alphabet
        .from_board(board.at(row, col))
        .unwrap_or_else(|| empty_label(board.layout, row, col))
}

fn write_col_labels(out: &mut String, cols: i8) {
    out.push_str("  ");
    for c in 0..cols {
        let _ = write!(out, " {}", ((c as u8) + b'a') as char);
    }
    out.push('\n');
}

fn write_border(out: &mut String, cols: i8) {
    out.push_str("  +");
    for _ in 1..cols {
        out.push_str("--");
    }
    out.push_str("-+\n");
}

pub fn fmt_board(alphabet: &alphabet::Alphabet, board: &board::Board) -> String {
    let dim = board.dim();
    let mut out = String::new();
    write_col_labels(&mut out, dim.cols);
    write_border(&mut out, dim.cols);
    for r in 0..dim.rows {
        let _ = write!(out, "{:2}|", r + 1);
        for c in 0..dim.cols {
            if c > 0 {
                out.push(' ');
            }
            out.push_str(board_label(alphabet, board, r, c));
        }
        let _ = writeln!(out, "|{}", r + 1);
    }
    write_border(&mut out, dim.cols);
    write_col_labels(&mut out, dim.cols);
    out
}

pub fn print_board(alphabet: &alphabet::Alphabet, board: &board::Board) {
    print!("{}", fmt_board(alphabet, board));
}

pub fn print_game_state(game_state: &game_state::GameState) {
    let alphabet = game_state.game_config.alphabet();
    print_board(alphabet, &game_state.board);
    for (i, player) in game_state.players.iter().enumerate() {
        println!(
            "{}Player {}: {} {}",
            if i == game_state.turn as usize { "*" } else { " " },
            i + 1,
            player.score,
            alphabet.fmt_rack(&player.rack)
        );
    }
    println!("Bag: {} tiles", game_state.bag.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_shows_premiums_and_tiles() {
        let mut board = board::Board::wwf();
        board.set_word(7, 7, false, &alphabet::WWF_ALPHABET.parse_word("Hi").unwrap());
        let text = fmt_board(&alphabet::WWF_ALPHABET, &board);
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 19);
        assert_eq!(lines[2], " 1|      =     \"   \"     =      |1");
        assert!(lines[9].contains("H i"));
        assert!(lines[9].starts_with(" 8|"));
    }
}
