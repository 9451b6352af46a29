// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board_layout};

pub struct GameConfig<'a> {
    alphabet: &'a alphabet::Alphabet<'a>,
    board_layout: &'a board_layout::BoardLayout<'a>,
    rack_size: i8,
    num_players: u8,
    bingo_bonus: i32,
    num_zeros_to_end: u8,
}

impl<'a> GameConfig<'a> {
    #[inline(always)]
    pub fn alphabet(&self) -> &'a alphabet::Alphabet<'a> {
        self.alphabet
    }

    #[inline(always)]
    pub fn board_layout(&self) -> &'a board_layout::BoardLayout<'a> {
        self.board_layout
    }

    #[inline(always)]
    pub fn rack_size(&self) -> i8 {
        self.rack_size
    }

    #[inline(always)]
    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    // consecutive scoreless turns (passes and swaps) that end the game.
    #[inline(always)]
    pub fn num_zeros_to_end(&self) -> u8 {
        self.num_zeros_to_end
    }

    #[inline(always)]
    pub fn num_played_bonus(&self, num_played: i8) -> i32 {
        if num_played >= self.rack_size {
            self.bingo_bonus
        } else {
            0
        }
    }
}

pub static WWF_GAME_CONFIG: GameConfig = GameConfig {
    alphabet: &alphabet::WWF_ALPHABET,
    board_layout: &board_layout::WWF_BOARD_LAYOUT,
    rack_size: 7,
    num_players: 2,
    bingo_bonus: 35,
    num_zeros_to_end: 6,
};
