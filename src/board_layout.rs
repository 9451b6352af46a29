// Copyright (C) 2020-2026 Andy Kurnia.

use super::matrix;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Premium {
    pub word_multiplier: i8,
    pub letter_multiplier: i8,
}

const TW: Premium = Premium {
    word_multiplier: 3,
    letter_multiplier: 1,
};
const DW: Premium = Premium {
    word_multiplier: 2,
    letter_multiplier: 1,
};
const TL: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 3,
};
const DL: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 2,
};
const FV: Premium = Premium {
    word_multiplier: 1,
    letter_multiplier: 1,
};

pub struct BoardLayout<'a> {
    premiums: &'a [Premium],
    dim: matrix::Dim,
    star_row: i8,
    star_col: i8,
}

impl BoardLayout<'_> {
    #[inline(always)]
    pub fn premiums(&self) -> &[Premium] {
        self.premiums
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.dim
    }

    #[inline(always)]
    pub fn star_row(&self) -> i8 {
        self.star_row
    }

    #[inline(always)]
    pub fn star_col(&self) -> i8 {
        self.star_col
    }

    #[inline(always)]
    pub fn premium_at(&self, row: i8, col: i8) -> Premium {
        self.premiums[self.dim.at_row_col(row, col)]
    }
}

#[rustfmt::skip]
pub static WWF_BOARD_LAYOUT: BoardLayout = BoardLayout {
    premiums: &[
        FV, FV, FV, TW, FV, FV, TL, FV, TL, FV, FV, TW, FV, FV, FV,
        FV, FV, DL, FV, FV, DW, FV, FV, FV, DW, FV, FV, DL, FV, FV,
        FV, DL, FV, FV, DL, FV, FV, FV, FV, FV, DL, FV, FV, DL, FV,
        TW, FV, FV, TL, FV, FV, FV, DW, FV, FV, FV, TL, FV, FV, TW,
        FV, FV, DL, FV, FV, FV, DL, FV, DL, FV, FV, FV, DL, FV, FV,
        FV, DW, FV, FV, FV, TL, FV, FV, FV, TL, FV, FV, FV, DW, FV,
        TL, FV, FV, FV, DL, FV, FV, FV, FV, FV, DL, FV, FV, FV, TL,
        FV, FV, FV, DW, FV, FV, FV, FV, FV, FV, FV, DW, FV, FV, FV,
        TL, FV, FV, FV, DL, FV, FV, FV, FV, FV, DL, FV, FV, FV, TL,
        FV, DW, FV, FV, FV, TL, FV, FV, FV, TL, FV, FV, FV, DW, FV,
        FV, FV, DL, FV, FV, FV, DL, FV, DL, FV, FV, FV, DL, FV, FV,
        TW, FV, FV, TL, FV, FV, FV, DW, FV, FV, FV, TL, FV, FV, TW,
        FV, DL, FV, FV, DL, FV, FV, FV, FV, FV, DL, FV, FV, DL, FV,
        FV, FV, DL, FV, FV, DW, FV, FV, FV, DW, FV, FV, DL, FV, FV,
        FV, FV, FV, TW, FV, FV, TL, FV, TL, FV, FV, TW, FV, FV, FV,
    ],
    dim: matrix::Dim { rows: 15, cols: 15 },
    star_row: 7,
    star_col: 7,
};
