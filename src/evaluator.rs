// Copyright (C) 2020-2026 Andy Kurnia.

use super::{game_state, movegen};

// a drawn blank is worth this much to the drawer.
const BLANK_DRAW_VALUE: i32 = 15;

// how the greedy picker ranks moves. higher is better.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evaluator {
    #[default]
    Score,
    NewTiles,
    Sum {
        parts: Vec<Evaluator>,
    },
}

impl Evaluator {
    pub fn evaluate(&self, state: &game_state::GameState, m: &movegen::Move) -> i32 {
        match self {
            Evaluator::Score => m.score(),
            Evaluator::NewTiles => new_tiles_value(state, m.play.tiles_used().len()),
            Evaluator::Sum { parts } => parts.iter().map(|part| part.evaluate(state, m)).sum(),
        }
    }
}

// the tiles this move would draw, in bag order.
fn new_tiles_value(state: &game_state::GameState, num_drawn: usize) -> i32 {
    let alphabet = state.game_config.alphabet();
    state
        .bag
        .0
        .iter()
        .rev()
        .take(num_drawn)
        .map(|&tile| {
            if tile == 0 {
                BLANK_DRAW_VALUE
            } else {
                alphabet.score(tile) as i32
            }
        })
        .sum()
}
