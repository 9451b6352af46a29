// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, game_state, movegen};

fn default_threshold() -> i32 {
    5
}

// when to trade tiles instead of making the best move found.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SwapStrategy {
    Never,
    #[default]
    NoAlternatives,
    MinScoreThreshold {
        #[serde(default = "default_threshold")]
        threshold: i32,
    },
}

impl SwapStrategy {
    pub fn min_score_threshold() -> Self {
        SwapStrategy::MinScoreThreshold {
            threshold: default_threshold(),
        }
    }

    fn wants_swap(&self, best: Option<&movegen::Move>) -> bool {
        match self {
            SwapStrategy::Never => false,
            SwapStrategy::NoAlternatives => best.is_none_or(|m| m.is_pass()),
            SwapStrategy::MinScoreThreshold { threshold } => {
                best.is_none_or(|m| !m.is_place() || m.score() < *threshold)
            }
        }
    }

    // empty means keep the rack.
    pub fn tiles_to_swap(&self, state: &game_state::GameState, best: Option<&movegen::Move>) -> Vec<u8> {
        if state.bag.is_empty() || !self.wants_swap(best) {
            return Vec::new();
        }
        lowest_scoring(state.game_config.alphabet(), &state.current_player().rack, state.bag.len())
    }

    // the swap replacing best, if any.
    pub fn apply(&self, state: &game_state::GameState, best: Option<movegen::Move>) -> movegen::Move {
        let tiles = self.tiles_to_swap(state, best.as_ref());
        if !tiles.is_empty() {
            movegen::Move::swap(tiles.into_boxed_slice())
        } else {
            best.unwrap_or_else(movegen::Move::pass)
        }
    }
}

// up to n tiles, cheapest first. equal values keep rack order.
fn lowest_scoring(alphabet: &alphabet::Alphabet, rack: &[u8], n: usize) -> Vec<u8> {
    let mut tiles = rack.to_vec();
    tiles.sort_by_key(|&tile| alphabet.score(tile));
    tiles.truncate(n);
    tiles
}
