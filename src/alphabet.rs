// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

pub struct Tile<'a> {
    label: &'a str,
    blank_label: &'a str,
    freq: u8,
    score: i8,
}

const fn tile<'a>(label: &'a str, blank_label: &'a str, freq: u8, score: i8) -> Tile<'a> {
    Tile {
        label,
        blank_label,
        freq,
        score,
    }
}

pub struct Alphabet<'a> {
    tiles: &'a [Tile<'a>],
    num_tiles: u16,
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.tiles.len() as u8
    }

    #[inline(always)]
    pub fn get(&self, idx: u8) -> &'a Tile<'a> {
        &self.tiles[idx as usize]
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        self.num_tiles
    }

    #[inline(always)]
    pub fn from_board(&self, idx: u8) -> Option<&'a str> {
        let c = idx & 0x7f;
        if c == 0 || c >= self.len() {
            None
        } else if idx & 0x80 == 0 {
            Some(self.get(c).label)
        } else {
            Some(self.get(c).blank_label)
        }
    }

    // unbound blanks show as '?', bound blanks show in lowercase.
    #[inline(always)]
    pub fn from_rack(&self, idx: u8) -> Option<&'a str> {
        if idx & 0x80 != 0 {
            self.from_board(idx)
        } else if idx >= self.len() {
            None
        } else {
            Some(self.get(idx).label)
        }
    }

    // blanks (bound or not) score zero.
    #[inline(always)]
    pub fn score(&self, idx: u8) -> i8 {
        self.get(idx & !((idx as i8) >> 7) as u8).score
    }

    #[inline(always)]
    pub fn freq(&self, idx: u8) -> u8 {
        self.get(idx).freq
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        rack.iter()
            .map(|&tile| self.from_rack(tile).unwrap_or("#"))
            .collect()
    }

    // play-through slots (0) show as '.'.
    pub fn fmt_word(&self, word: &[u8]) -> String {
        word.iter()
            .map(|&tile| self.from_board(tile).unwrap_or("."))
            .collect()
    }

    // letters only, any case, no blanks.
    pub fn parse_letters(&self, s: &str) -> error::Returns<Vec<u8>> {
        s.bytes()
            .map(|b| {
                letter_of(b).ok_or_else(|| error::Error::BadWord {
                    word: s.into(),
                    byte: b,
                })
            })
            .collect()
    }

    // letters in either case, '?' or '*' for blanks.
    pub fn parse_rack(&self, s: &str) -> error::Returns<Vec<u8>> {
        s.bytes()
            .map(|b| match b {
                b'?' | b'*' => Ok(0),
                _ => letter_of(b).ok_or_else(|| error::Error::BadWord {
                    word: s.into(),
                    byte: b,
                }),
            })
            .collect()
    }

    // uppercase for tiles, lowercase for blanks, '.' for play-through.
    pub fn parse_word(&self, s: &str) -> error::Returns<Vec<u8>> {
        s.bytes()
            .map(|b| match b {
                b'.' => Ok(0),
                b'a'..=b'z' => Ok(0x80 | (b - b'a' + 1)),
                _ => letter_of(b).ok_or_else(|| error::Error::BadWord {
                    word: s.into(),
                    byte: b,
                }),
            })
            .collect()
    }
}

// 'A' or 'a' to 1, through 'Z' or 'z' to 26.
#[inline(always)]
pub fn letter_of(b: u8) -> Option<u8> {
    match b {
        b'A'..=b'Z' => Some(b - b'A' + 1),
        b'a'..=b'z' => Some(b - b'a' + 1),
        _ => None,
    }
}

pub static WWF_ALPHABET: Alphabet = Alphabet {
    tiles: &[
        tile("?", "?", 2, 0),
        tile("A", "a", 9, 1),
        tile("B", "b", 2, 4),
        tile("C", "c", 2, 4),
        tile("D", "d", 5, 2),
        tile("E", "e", 13, 1),
        tile("F", "f", 2, 4),
        tile("G", "g", 3, 3),
        tile("H", "h", 4, 3),
        tile("I", "i", 8, 1),
        tile("J", "j", 1, 10),
        tile("K", "k", 1, 5),
        tile("L", "l", 4, 2),
        tile("M", "m", 2, 4),
        tile("N", "n", 5, 2),
        tile("O", "o", 8, 1),
        tile("P", "p", 2, 4),
        tile("Q", "q", 1, 10),
        tile("R", "r", 6, 1),
        tile("S", "s", 5, 1),
        tile("T", "t", 7, 1),
        tile("U", "u", 4, 2),
        tile("V", "v", 2, 5),
        tile("W", "w", 2, 4),
        tile("X", "x", 1, 8),
        tile("Y", "y", 2, 3),
        tile("Z", "z", 1, 10),
    ],
    num_tiles: 104,
};
