// Copyright (C) 2020-2026 Andy Kurnia.

use super::{board, config, error, evaluator, game_state, iterative, movegen, preempt, search, swap};
use std::sync::Arc;

// the best move by the evaluator, no lookahead.
pub struct TopScoring<S: movegen::MoveSource> {
    inner: S,
    evaluator: evaluator::Evaluator,
}

impl<S: movegen::MoveSource> movegen::MoveSource for TopScoring<S> {
    #[inline(always)]
    fn moves_at(&self, board: &board::Board, rack: &[u8], row: i8, col: i8) -> Vec<movegen::Move> {
        self.inner.moves_at(board, rack, row, col)
    }

    #[inline(always)]
    fn is_word(&self, word: &[u8]) -> bool {
        self.inner.is_word(word)
    }
}

impl<S: movegen::MoveSource> TopScoring<S> {
    pub fn new(inner: S, evaluator: evaluator::Evaluator) -> Self {
        Self { inner, evaluator }
    }

    // earliest of the equally best.
    pub fn best_move(&self, state: &game_state::GameState) -> error::Returns<Option<movegen::Move>> {
        let mut best: Option<(i32, movegen::Move)> = None;
        for m in movegen::all_moves(&self.inner, &state.board, &state.current_player().rack)? {
            let value = self.evaluator.evaluate(state, &m);
            if best.as_ref().is_none_or(|(best_value, _)| value > *best_value) {
                best = Some((value, m));
            }
        }
        Ok(best.map(|(_, m)| m))
    }
}

pub enum Lookahead<S: movegen::MoveSource + 'static> {
    TopScoring(TopScoring<Arc<S>>),
    FixedDepth(search::FixedDepth<Arc<S>>),
    IterativeDeepening(iterative::IterativeDeepening<S>),
}

pub struct MovePicker<S: movegen::MoveSource + 'static> {
    pub lookahead: Lookahead<S>,
    pub swap_strategy: swap::SwapStrategy,
}

impl<S: movegen::MoveSource + 'static> MovePicker<S> {
    pub fn from_config(inner: Arc<S>, config: &config::SearchConfig) -> Self {
        Self {
            lookahead: Lookahead::IterativeDeepening(iterative::IterativeDeepening::new(inner, config.clone())),
            swap_strategy: config.swap_strategy,
        }
    }

    pub fn top_scoring(inner: Arc<S>, config: &config::SearchConfig) -> Self {
        Self {
            lookahead: Lookahead::TopScoring(TopScoring::new(inner, config.evaluator.clone())),
            swap_strategy: config.swap_strategy,
        }
    }

    // one search at start_depth, no time limit.
    pub fn fixed_depth(inner: Arc<S>, config: &config::SearchConfig) -> Self {
        Self {
            lookahead: Lookahead::FixedDepth(search::FixedDepth::new(
                inner,
                config.start_depth,
                config.min_score,
                config.branching_factor_limit,
            )),
            swap_strategy: config.swap_strategy,
        }
    }

    // always a well-formed move: the best found, a swap, or a pass.
    pub fn pick_a_move(
        &self,
        game_state: &game_state::GameState,
        preemption: &preempt::PreemptionContext,
    ) -> error::Returns<movegen::Move> {
        let best = match &self.lookahead {
            Lookahead::TopScoring(top_scoring) => top_scoring.best_move(game_state)?,
            Lookahead::FixedDepth(fixed_depth) => fixed_depth.search(game_state, preemption)?.best,
            Lookahead::IterativeDeepening(iterative_deepening) => {
                iterative_deepening.search(game_state, preemption)?.best
            }
        };
        Ok(self.swap_strategy.apply(game_state, best))
    }
}
