// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bag, board, error, game_config, game_state, movegen};

// note: only this representation uses -1i8 for blank-as-A (in "board" input
// and "word" response for "action":"play"). everywhere else, use 0x81u8.

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum JsonPlay {
    Pass,
    Swap {
        tiles: Box<[u8]>,
    },
    Play {
        down: bool,
        lane: i8,
        idx: i8,
        word: Box<[i8]>,
        score: i32,
    },
}

impl From<&movegen::Move> for JsonPlay {
    fn from(m: &movegen::Move) -> Self {
        match &m.play {
            movegen::Play::Pass => Self::Pass,
            // tiles: array of numbers. 0 for blank, 1 for A.
            movegen::Play::Swap { tiles } => Self::Swap {
                tiles: tiles[..].into(),
            },
            movegen::Play::Place {
                down,
                lane,
                idx,
                word,
            } => {
                // turn 0x81u8, 0x82u8 into -1i8, -2i8
                let word_played = word
                    .iter()
                    .map(|&x| {
                        if x & 0x80 != 0 {
                            -((x & !0x80) as i8)
                        } else {
                            x as i8
                        }
                    })
                    .collect::<Vec<i8>>();
                Self::Play {
                    down: *down,
                    lane: *lane,
                    idx: *idx,
                    word: word_played.into(),
                    score: m.score(),
                }
            }
        }
    }
}

impl From<&JsonPlay> for movegen::Move {
    fn from(play: &JsonPlay) -> Self {
        match play {
            JsonPlay::Pass => movegen::Move::pass(),
            JsonPlay::Swap { tiles } => movegen::Move::swap(tiles.clone()),
            JsonPlay::Play {
                down,
                lane,
                idx,
                word,
                ..
            } => {
                // turn -1i8, -2i8 into 0x81u8, 0x82u8
                let word_played = word
                    .iter()
                    .map(|&x| if x < 0 { 0x81 + !x as u8 } else { x as u8 })
                    .collect::<Vec<u8>>();
                // the score is recomputed against the board when needed.
                movegen::Move::place(*down, *lane, *idx, word_played.into())
            }
        }
    }
}

// a position to answer. racks use 0 for blank. the bag defaults to every unseen tile.
#[derive(serde::Serialize, serde::Deserialize, Debug, Default)]
pub struct Question {
    pub rack: Vec<u8>,
    pub board: Vec<Vec<i8>>,
    #[serde(default)]
    pub opponent_rack: Vec<u8>,
    #[serde(default)]
    pub scores: [i32; 2],
    #[serde(default)]
    pub bag: Option<Vec<u8>>,
}

struct Unseen<'a> {
    game_config: &'a game_config::GameConfig<'a>,
    tally: Vec<u8>,
}

impl<'a> Unseen<'a> {
    fn new(game_config: &'a game_config::GameConfig<'a>) -> Self {
        let alphabet = game_config.alphabet();
        Self {
            game_config,
            tally: (0..alphabet.len()).map(|tile| alphabet.freq(tile)).collect(),
        }
    }

    fn take(&mut self, tile: u8) -> error::Returns<()> {
        let alphabet = self.game_config.alphabet();
        if tile >= alphabet.len() {
            return_error!(format!(
                "invalid tile {}, alphabet size is {}",
                tile,
                alphabet.len() - 1
            ));
        }
        if self.tally[tile as usize] > 0 {
            self.tally[tile as usize] -= 1;
            Ok(())
        } else {
            return_error!(format!(
                "too many tile {} (bag contains only {})",
                tile,
                alphabet.freq(tile),
            ));
        }
    }

    fn remaining(&self) -> Vec<u8> {
        (0u8..)
            .zip(self.tally.iter())
            .flat_map(|(tile, &count)| std::iter::repeat_n(tile, count as usize))
            .collect()
    }
}

impl Question {
    pub fn from_json(s: &str) -> error::Returns<Self> {
        Ok(serde_json::from_str(s)?)
    }

    fn board_tiles(&self, unseen: &mut Unseen) -> error::Returns<Vec<u8>> {
        let alphabet = unseen.game_config.alphabet();
        let alphabet_len_without_blank = alphabet.len() - 1;
        let expected_dim = unseen.game_config.board_layout().dim();
        if self.board.len() != expected_dim.rows as usize {
            return_error!(format!(
                "board: need {} rows, found {} rows",
                expected_dim.rows,
                self.board.len()
            ));
        }
        let mut board_tiles = Vec::with_capacity(expected_dim.area());
        for (row_num, row) in (0..).zip(self.board.iter()) {
            if row.len() != expected_dim.cols as usize {
                return_error!(format!(
                    "board row {} (0-based): need {} cols, found {} cols",
                    row_num,
                    expected_dim.cols,
                    row.len()
                ));
            }
            for (col_num, &signed_tile) in (0..).zip(row) {
                if signed_tile == 0 {
                    board_tiles.push(0);
                } else if signed_tile > 0 && signed_tile as u8 <= alphabet_len_without_blank {
                    unseen.take(signed_tile as u8)?;
                    board_tiles.push(signed_tile as u8);
                } else if signed_tile < 0 && (!signed_tile as u8) < alphabet_len_without_blank {
                    // turn -1i8, -2i8 into 0x81u8, 0x82u8
                    unseen.take(0)?;
                    board_tiles.push(0x81 + !signed_tile as u8);
                } else {
                    return_error!(format!(
                        "board row {} col {} (0-based): invalid tile {}, alphabet size is {}",
                        row_num, col_num, signed_tile, alphabet_len_without_blank
                    ));
                }
            }
        }
        Ok(board_tiles)
    }

    // the asker is always on turn.
    pub fn to_game_state(&self) -> error::Returns<game_state::GameState> {
        let game_config = &game_config::WWF_GAME_CONFIG;
        let mut unseen = Unseen::new(game_config);
        for &tile in self.rack.iter().chain(self.opponent_rack.iter()) {
            unseen.take(tile)?;
        }
        let rack_size = game_config.rack_size() as usize;
        if self.rack.len() > rack_size || self.opponent_rack.len() > rack_size {
            return_error!(format!("racks hold at most {} tiles", rack_size));
        }
        let board_tiles = self.board_tiles(&mut unseen)?;
        let bag = match &self.bag {
            Some(tiles) => {
                for &tile in tiles {
                    unseen.take(tile)?;
                }
                tiles.clone()
            }
            None => unseen.remaining(),
        };
        Ok(game_state::GameState::from_parts(
            board::Board::from_tiles(game_config.board_layout(), board_tiles.into_boxed_slice())?,
            [self.rack.clone(), self.opponent_rack.clone()],
            self.scores,
            bag::Bag(bag),
            0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet;

    fn empty_board() -> Vec<Vec<i8>> {
        vec![vec![0i8; 15]; 15]
    }

    #[test]
    fn play_uses_negative_blanks() {
        let m = movegen::Move::place(true, 7, 6, vec![3, 0, 0x94].into());
        let json = serde_json::to_string(&JsonPlay::from(&m)).unwrap();
        assert_eq!(
            json,
            r#"{"action":"play","down":true,"lane":7,"idx":6,"word":[3,0,-20],"score":0}"#
        );
        let back = movegen::Move::from(&serde_json::from_str::<JsonPlay>(&json).unwrap());
        assert_eq!(back.play, m.play);
    }

    #[test]
    fn pass_and_swap_are_tagged() {
        assert_eq!(
            serde_json::to_string(&JsonPlay::from(&movegen::Move::pass())).unwrap(),
            r#"{"action":"pass"}"#
        );
        let swap = movegen::Move::swap(vec![0, 17].into());
        assert_eq!(
            serde_json::to_string(&JsonPlay::from(&swap)).unwrap(),
            r#"{"action":"swap","tiles":[0,17]}"#
        );
    }

    #[test]
    fn question_fills_the_bag_with_unseen_tiles() {
        let mut board = empty_board();
        board[7][7] = 3;
        board[7][8] = -1;
        board[7][9] = 20;
        let question = Question {
            rack: vec![0, 26],
            board,
            ..Default::default()
        };
        let state = question.to_game_state().unwrap();
        assert_eq!(state.bag.len(), 104 - 2 - 3);
        assert_eq!(state.board.at(7, 8), 0x81);
        assert_eq!(state.bag.0.iter().filter(|&&t| t == 0).count(), 0);
        assert!(!state.bag.0.contains(&26));
        assert_eq!(
            alphabet::WWF_ALPHABET.fmt_rack(&state.players[0].rack),
            "?Z"
        );
    }

    #[test]
    fn question_rejects_impossible_tiles() {
        let question = Question {
            rack: vec![26, 26],
            board: empty_board(),
            ..Default::default()
        };
        assert!(question.to_game_state().is_err());
        let question = Question {
            rack: vec![1],
            board: vec![vec![0; 15]; 14],
            ..Default::default()
        };
        assert!(question.to_game_state().is_err());
        let mut board = empty_board();
        board[0][0] = 27;
        let question = Question {
            rack: vec![1],
            board,
            ..Default::default()
        };
        assert!(question.to_game_state().is_err());
    }

    #[test]
    fn question_reads_json() {
        let json = format!(
            r#"{{"rack":[1,20],"board":{},"scores":[10,20],"opponent_rack":[5]}}"#,
            serde_json::to_string(&empty_board()).unwrap()
        );
        let state = Question::from_json(&json).unwrap().to_game_state().unwrap();
        assert_eq!(state.players[1].score, 20);
        assert_eq!(state.players[1].rack, vec![5]);
        assert_eq!(state.bag.len(), 104 - 3);
    }
}
