// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board_layout, error, matrix};

// row-major tiles over the layout. 0 is empty, 1..=26 is A..=Z, 0x80 bit is blank.
#[derive(Clone)]
pub struct Board {
    pub layout: &'static board_layout::BoardLayout<'static>,
    pub tiles: Box<[u8]>,
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dim = self.dim();
        for r in 0..dim.rows {
            for c in 0..dim.cols {
                let t = self.at(r, c);
                let ch = if t == 0 {
                    '.'
                } else if t & 0x80 != 0 {
                    (b'a' + (t & 0x7f) - 1) as char
                } else {
                    (b'A' + t - 1) as char
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Board {
    pub fn new(layout: &'static board_layout::BoardLayout<'static>) -> Self {
        Self {
            layout,
            tiles: vec![0u8; layout.dim().area()].into_boxed_slice(),
        }
    }

    pub fn wwf() -> Self {
        Self::new(&board_layout::WWF_BOARD_LAYOUT)
    }

    pub fn from_tiles(
        layout: &'static board_layout::BoardLayout<'static>,
        tiles: Box<[u8]>,
    ) -> error::Returns<Self> {
        if tiles.len() != layout.dim().area() {
            return_error!(format!(
                "board: need {} slots, found {}",
                layout.dim().area(),
                tiles.len()
            ));
        }
        Ok(Self { layout, tiles })
    }

    #[inline(always)]
    pub fn dim(&self) -> matrix::Dim {
        self.layout.dim()
    }

    #[inline(always)]
    pub fn at(&self, row: i8, col: i8) -> u8 {
        self.tiles[self.dim().at_row_col(row, col)]
    }

    #[inline(always)]
    pub fn is_empty_at(&self, row: i8, col: i8) -> bool {
        self.at(row, col) == 0
    }

    pub fn has_tiles(&self) -> bool {
        self.tiles.iter().any(|&t| t != 0)
    }

    // occupied, or empty with an occupied orthogonal neighbour.
    pub fn is_anchor(&self, row: i8, col: i8) -> bool {
        if !self.is_empty_at(row, col) {
            return true;
        }
        let dim = self.dim();
        [(-1i8, 0i8), (1, 0), (0, -1), (0, 1)]
            .iter()
            .any(|&(dr, dc)| {
                let (r, c) = (row + dr, col + dc);
                dim.contains(r, c) && !self.is_empty_at(r, c)
            })
    }

    // row-major anchor slots; on an empty board just the star.
    pub fn anchors(&self) -> Vec<(i8, i8)> {
        if !self.has_tiles() {
            return vec![(self.layout.star_row(), self.layout.star_col())];
        }
        let dim = self.dim();
        let mut ret = Vec::new();
        for r in 0..dim.rows {
            for c in 0..dim.cols {
                if self.is_anchor(r, c) {
                    ret.push((r, c));
                }
            }
        }
        ret
    }

    // word follows the placement convention: 0 means the slot already holds a tile.
    pub fn place(&mut self, down: bool, lane: i8, idx: i8, word: &[u8]) -> error::Returns<()> {
        let dim = self.dim();
        if lane < 0 || lane >= if down { dim.cols } else { dim.rows } {
            return Err(error::Error::IllegalPlay(format!("lane {} off board", lane)));
        }
        let strider = dim.lane(down, lane);
        if idx < 0 || idx as isize + word.len() as isize > strider.len() as isize {
            return Err(error::Error::IllegalPlay(format!(
                "{} tiles from {} off board",
                word.len(),
                idx
            )));
        }
        for (i, &tile) in (idx..).zip(word.iter()) {
            let b = self.tiles[strider.at(i)];
            if tile == 0 && b == 0 {
                return Err(error::Error::IllegalPlay(format!(
                    "play-through at {} has no tile",
                    i
                )));
            }
            if tile != 0 && b != 0 {
                return Err(error::Error::IllegalPlay(format!("slot {} is occupied", i)));
            }
        }
        for (i, &tile) in (idx..).zip(word.iter()) {
            if tile != 0 {
                self.tiles[strider.at(i)] = tile;
            }
        }
        Ok(())
    }

    // test and demo helper: lays a word of letters regardless of premiums or adjacency.
    pub fn set_word(&mut self, row: i8, col: i8, down: bool, word: &[u8]) {
        let dim = self.dim();
        for (i, &tile) in (0i8..).zip(word.iter()) {
            let (r, c) = if down { (row + i, col) } else { (row, col + i) };
            self.tiles[dim.at_row_col(r, c)] = tile;
        }
    }
}
