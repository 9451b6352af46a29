// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, error, game_config, matrix, movegen};

// words hold plain letters (1..=26), blanks already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayResult {
    pub score: i32,
    pub words: Vec<Box<[u8]>>,
    pub main_word: Box<[u8]>,
    pub num_played: i8,
}

impl PlayResult {
    fn empty() -> Self {
        Self {
            score: 0,
            words: Vec::new(),
            main_word: Box::new([]),
            num_played: 0,
        }
    }
}

// the tile at i along strider once the placement (start, word) is down.
#[inline(always)]
fn tile_after(board_tiles: &[u8], strider: &matrix::Strider, start: i8, word: &[u8], i: i8) -> u8 {
    if i >= start && ((i - start) as usize) < word.len() && word[(i - start) as usize] != 0 {
        word[(i - start) as usize]
    } else {
        board_tiles[strider.at(i)]
    }
}

// scores the run of tiles through pos along strider. None if the run is one tile long.
fn score_run(
    board: &board::Board,
    strider: &matrix::Strider,
    start: i8,
    word: &[u8],
    pos: i8,
) -> Option<(i32, Box<[u8]>)> {
    let game_config = &game_config::WWF_GAME_CONFIG;
    let alphabet = game_config.alphabet();
    let premiums = board.layout.premiums();
    let len = strider.len();
    let placed = |i: i8| i >= start && ((i - start) as usize) < word.len() && word[(i - start) as usize] != 0;

    let mut lo = pos;
    while lo > 0 && tile_after(&board.tiles, strider, start, word, lo - 1) != 0 {
        lo -= 1;
    }
    let mut hi = pos + 1;
    while hi < len && tile_after(&board.tiles, strider, start, word, hi) != 0 {
        hi += 1;
    }
    if hi - lo < 2 {
        return None;
    }

    let mut word_multiplier = 1;
    let mut word_score = 0i32;
    let mut letters = Vec::with_capacity((hi - lo) as usize);
    for i in lo..hi {
        let tile = tile_after(&board.tiles, strider, start, word, i);
        let letter_multiplier = if placed(i) {
            let premium = premiums[strider.at(i)];
            word_multiplier *= premium.word_multiplier as i32;
            premium.letter_multiplier as i32
        } else {
            1
        };
        word_score += alphabet.score(tile) as i32 * letter_multiplier;
        letters.push(tile & 0x7f);
    }
    Some((word_score * word_multiplier, letters.into_boxed_slice()))
}

// main word first, then one perpendicular word per placed tile that touches something.
pub fn score_play(board: &board::Board, play: &movegen::Play) -> error::Returns<PlayResult> {
    let movegen::Play::Place {
        down,
        lane,
        idx,
        word,
    } = play
    else {
        return Ok(PlayResult::empty());
    };
    let (down, lane, idx) = (*down, *lane, *idx);
    let dim = board.dim();
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
    let mut num_played = 0i8;
    for (i, &tile) in (idx..).zip(word.iter()) {
        let b = board.tiles[strider.at(i)];
        if (tile == 0) == (b == 0) {
            return Err(error::Error::IllegalPlay(format!(
                "slot {} of lane {} does not match the board",
                i, lane
            )));
        }
        if tile != 0 {
            num_played += 1;
        }
    }
    if num_played == 0 {
        return Err(error::Error::IllegalPlay("no tiles placed".into()));
    }

    let mut score = 0;
    let mut words = Vec::new();
    let first_placed = (idx..)
        .zip(word.iter())
        .find(|&(_, &tile)| tile != 0)
        .map_or(idx, |(i, _)| i);
    if let Some((main_score, main_word)) = score_run(board, &strider, idx, word, first_placed) {
        score += main_score;
        words.push(main_word);
    }

    for (i, &tile) in (idx..).zip(word.iter()) {
        if tile == 0 {
            continue;
        }
        let perpendicular_strider = dim.lane(!down, i);
        let cross_word = [tile];
        if let Some((cross_score, cross_word)) =
            score_run(board, &perpendicular_strider, lane, &cross_word, lane)
        {
            score += cross_score;
            words.push(cross_word);
        }
    }

    let Some(main_word) = words.first().cloned() else {
        return Err(error::Error::IllegalPlay("no word formed".into()));
    };
    score += game_config::WWF_GAME_CONFIG.num_played_bonus(num_played);
    Ok(PlayResult {
        score,
        words,
        main_word,
        num_played,
    })
}
