// Copyright (C) 2020-2026 Andy Kurnia.

use super::{bag, board, error, game_config, movegen, play_scorer, rack};
use rand::prelude::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GamePlayer {
    pub score: i32,
    pub rack: Vec<u8>,
}

// everything a searcher may mutate. the bag is known, so lookahead draws from it in order.
#[derive(Clone)]
pub struct GameState {
    pub game_config: &'static game_config::GameConfig<'static>,
    pub players: Box<[GamePlayer]>,
    pub board: board::Board,
    pub bag: bag::Bag,
    pub turn: u8,
    pub num_zeros: u8,
}

impl GameState {
    pub fn new(game_config: &'static game_config::GameConfig<'static>) -> Self {
        let rack_size = game_config.rack_size() as usize;
        Self {
            game_config,
            players: (0..game_config.num_players())
                .map(|_| GamePlayer {
                    score: 0,
                    rack: Vec::with_capacity(rack_size),
                })
                .collect(),
            board: board::Board::new(game_config.board_layout()),
            bag: bag::Bag::new(game_config.alphabet()),
            turn: 0,
            num_zeros: 0,
        }
    }

    pub fn wwf() -> Self {
        Self::new(&game_config::WWF_GAME_CONFIG)
    }

    // a position given from outside, the bag holding whatever tiles remain unseen.
    pub fn from_parts(
        board: board::Board,
        racks: [Vec<u8>; 2],
        scores: [i32; 2],
        bag: bag::Bag,
        turn: u8,
    ) -> Self {
        Self {
            game_config: &game_config::WWF_GAME_CONFIG,
            players: racks
                .into_iter()
                .zip(scores)
                .map(|(rack, score)| GamePlayer { score, rack })
                .collect(),
            board,
            bag,
            turn,
            num_zeros: 0,
        }
    }

    pub fn reset_and_draw_tiles(&mut self, rng: &mut dyn RngCore) {
        *self = Self::new(self.game_config);
        self.bag.shuffle(rng);
        let rack_size = self.game_config.rack_size() as usize;
        for player in self.players.iter_mut() {
            self.bag.replenish(&mut player.rack, rack_size);
        }
    }

    #[inline(always)]
    pub fn current_player(&self) -> &GamePlayer {
        &self.players[self.turn as usize]
    }

    #[inline(always)]
    fn next_turn_index(&self) -> u8 {
        let next = self.turn + 1;
        if next >= self.players.len() as u8 { 0 } else { next }
    }

    // swapped tiles go under the bag, so lookahead never draws them back.
    pub fn apply(&mut self, m: &movegen::Move) -> error::Returns<()> {
        self.apply_impl(m, |bag, tiles| bag.put_under(tiles))
    }

    pub fn play(&mut self, rng: &mut dyn RngCore, m: &movegen::Move) -> error::Returns<()> {
        self.apply_impl(m, |bag, tiles| bag.put_back(rng, tiles))
    }

    fn apply_impl<F: FnOnce(&mut bag::Bag, &[u8])>(
        &mut self,
        m: &movegen::Move,
        put_back: F,
    ) -> error::Returns<()> {
        let rack_size = self.game_config.rack_size() as usize;
        match &m.play {
            movegen::Play::Pass => {
                self.num_zeros += 1;
            }
            movegen::Play::Swap { tiles } => {
                if tiles.len() > self.bag.len() {
                    return Err(error::Error::IllegalPlay(format!(
                        "cannot swap {} tiles with {} in the bag",
                        tiles.len(),
                        self.bag.len()
                    )));
                }
                let current_player = &mut self.players[self.turn as usize];
                rack::use_tiles(&mut current_player.rack, tiles.iter().copied())?;
                self.bag.replenish(&mut current_player.rack, rack_size);
                put_back(&mut self.bag, tiles);
                self.num_zeros += 1;
            }
            movegen::Play::Place {
                down,
                lane,
                idx,
                word,
            } => {
                let score = match &m.result {
                    Some(result) => result.score,
                    None => play_scorer::score_play(&self.board, &m.play)?.score,
                };
                let current_player = &mut self.players[self.turn as usize];
                rack::use_tiles(&mut current_player.rack, m.play.tiles_used())?;
                self.board.place(*down, *lane, *idx, word)?;
                current_player.score += score;
                self.bag.replenish(&mut current_player.rack, rack_size);
                self.num_zeros = 0;
            }
        }
        Ok(())
    }

    pub fn next_turn(&mut self) {
        self.turn = self.next_turn_index();
    }

    // someone went out with the bag empty, or too many scoreless turns in a row.
    pub fn is_over(&self) -> bool {
        (self.bag.is_empty() && self.players.iter().any(|p| p.rack.is_empty()))
            || self.num_zeros >= self.game_config.num_zeros_to_end()
    }

    // unplayed tiles count against their holder. going out collects them.
    pub fn finish(&mut self) {
        let alphabet = self.game_config.alphabet();
        let rack_value = |rack: &[u8]| rack.iter().map(|&t| alphabet.score(t) as i32).sum::<i32>();
        let values = self.players.iter().map(|p| rack_value(&p.rack)).collect::<Vec<_>>();
        let total = values.iter().sum::<i32>();
        for (player, value) in self.players.iter_mut().zip(values) {
            if player.rack.is_empty() {
                player.score += total;
            } else {
                player.score -= value;
            }
        }
    }

    // how far player is ahead of the best opponent.
    pub fn spread(&self, player: u8) -> i32 {
        let own = self.players[player as usize].score;
        let best_other = self
            .players
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != player as usize)
            .map(|(_, p)| p.score)
            .max()
            .unwrap_or(0);
        own - best_other
    }
}
