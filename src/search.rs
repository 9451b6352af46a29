// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, error, game_state, movegen, preempt};

#[derive(Clone, Debug)]
pub struct NodeResult {
    // root player's spread at the end of the chosen line.
    pub value: i32,
    pub best: Option<movegen::Move>,
    // the chosen line ends the game (rack emptied or nothing playable).
    pub terminal: bool,
    pub preempted: bool,
}

// alpha-beta over the moves of the wrapped generator, both racks known.
pub struct FixedDepth<S: movegen::MoveSource> {
    inner: S,
    depth: u8,
    min_score: i32,
    branching_factor_limit: usize,
}

impl<S: movegen::MoveSource> movegen::MoveSource for FixedDepth<S> {
    #[inline(always)]
    fn moves_at(&self, board: &board::Board, rack: &[u8], row: i8, col: i8) -> Vec<movegen::Move> {
        self.inner.moves_at(board, rack, row, col)
    }

    #[inline(always)]
    fn is_word(&self, word: &[u8]) -> bool {
        self.inner.is_word(word)
    }
}

impl<S: movegen::MoveSource> FixedDepth<S> {
    pub fn new(inner: S, depth: u8, min_score: i32, branching_factor_limit: usize) -> Self {
        Self {
            inner,
            depth,
            min_score,
            branching_factor_limit,
        }
    }

    // the moves a node looks at, best raw score first.
    pub fn candidates(&self, state: &game_state::GameState) -> error::Returns<Vec<movegen::Move>> {
        let mut moves = movegen::all_moves(&self.inner, &state.board, &state.current_player().rack)?
            .collect::<Vec<_>>();
        moves.sort_by_key(|m| std::cmp::Reverse(m.score()));
        let mut num_kept = 0;
        for m in moves.iter() {
            if num_kept >= self.branching_factor_limit || (num_kept > 0 && m.score() < self.min_score) {
                break;
            }
            num_kept += 1;
        }
        moves.truncate(num_kept);
        Ok(moves)
    }

    pub fn search(
        &self,
        state: &game_state::GameState,
        preemption: &preempt::PreemptionContext,
    ) -> error::Returns<NodeResult> {
        let result = self.alpha_beta(state, self.depth, i32::MIN, i32::MAX, state.turn, preemption)?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "depth {}: {} value {}{}{}",
                self.depth,
                result
                    .best
                    .as_ref()
                    .map_or_else(|| "none".into(), |m| m.play.fmt(&alphabet::WWF_ALPHABET)),
                result.value,
                if result.terminal { " terminal" } else { "" },
                if result.preempted { " preempted" } else { "" },
            );
        }
        Ok(result)
    }

    fn alpha_beta(
        &self,
        state: &game_state::GameState,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        root_player: u8,
        preemption: &preempt::PreemptionContext,
    ) -> error::Returns<NodeResult> {
        let leaf = |terminal, preempted, best| NodeResult {
            value: state.spread(root_player),
            best,
            terminal,
            preempted,
        };
        if preemption.is_strong() {
            return Ok(leaf(false, true, None));
        }
        if state.current_player().rack.is_empty() || state.is_over() {
            return Ok(leaf(true, false, None));
        }
        if depth == 0 {
            return Ok(leaf(false, false, None));
        }
        let candidates = self.candidates(state)?;
        if candidates.is_empty() {
            return Ok(leaf(true, false, Some(movegen::Move::pass())));
        }

        let maximizing = state.turn == root_player;
        let mut best = None;
        let mut terminal = false;
        let mut preempted = false;
        for m in candidates {
            let mut child = state.clone();
            child.apply(&m)?;
            child.next_turn();
            let child_result = self.alpha_beta(&child, depth - 1, alpha, beta, root_player, preemption)?;
            if child_result.preempted {
                preempted = true;
                break;
            }
            if maximizing {
                if child_result.value > alpha {
                    alpha = child_result.value;
                    best = Some(m);
                    terminal = child_result.terminal;
                }
            } else if child_result.value < beta {
                beta = child_result.value;
                best = Some(m);
                terminal = child_result.terminal;
            }
            if beta <= alpha {
                break;
            }
        }
        Ok(NodeResult {
            value: if maximizing { alpha } else { beta },
            best,
            terminal,
            preempted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bag, gaddag};
    use rand::prelude::*;

    const WORDS: &[&str] = &[
        "ACT", "ACTS", "AN", "ANT", "ANTS", "AS", "AT", "CAN", "CANS", "CAST", "CAT", "CATS", "NA",
        "NAT", "SAT", "SCAN", "SCAT", "TA", "TAN", "TANS", "TAT", "TATS",
    ];

    fn letters(s: &str) -> Vec<u8> {
        alphabet::WWF_ALPHABET.parse_word(s).unwrap()
    }

    fn searcher(depth: u8, min_score: i32, limit: usize) -> FixedDepth<movegen::GaddagMoveGenerator> {
        FixedDepth::new(
            movegen::GaddagMoveGenerator::new(gaddag::Gaddag::from_words(WORDS.iter()).unwrap()),
            depth,
            min_score,
            limit,
        )
    }

    fn position(racks: [&str; 2], bag: &str) -> game_state::GameState {
        let mut board = board::Board::wwf();
        board.set_word(7, 6, false, &letters("CAT"));
        game_state::GameState::from_parts(board, [letters(racks[0]), letters(racks[1])], [0, 0], bag::Bag(letters(bag)), 0)
    }

    fn minimax<S: movegen::MoveSource>(
        s: &FixedDepth<S>,
        state: &game_state::GameState,
        depth: u8,
        root_player: u8,
    ) -> (i32, Option<movegen::Play>) {
        if state.current_player().rack.is_empty() || state.is_over() || depth == 0 {
            return (state.spread(root_player), None);
        }
        let candidates = s.candidates(state).unwrap();
        if candidates.is_empty() {
            return (state.spread(root_player), Some(movegen::Play::Pass));
        }
        let maximizing = state.turn == root_player;
        let mut best_value = if maximizing { i32::MIN } else { i32::MAX };
        let mut best = None;
        for m in candidates {
            let mut child = state.clone();
            child.apply(&m).unwrap();
            child.next_turn();
            let (value, _) = minimax(s, &child, depth - 1, root_player);
            if (maximizing && value > best_value) || (!maximizing && value < best_value) {
                best_value = value;
                best = Some(m.play);
            }
        }
        (best_value, best)
    }

    #[test]
    fn depth_one_takes_the_top_score() {
        let s = searcher(1, 0, 100);
        let state = position(["SNA", "T"], "");
        let top = s.candidates(&state).unwrap()[0].score();
        let result = s.search(&state, &preempt::PreemptionContext::new()).unwrap();
        let best = result.best.unwrap();
        assert_eq!(best.score(), top);
        assert_eq!(result.value, top);
        assert!(!result.preempted);
    }

    #[test]
    fn candidates_respect_limits() {
        let state = position(["SNAT", "T"], "");
        let all = searcher(1, 0, 1000).candidates(&state).unwrap();
        assert!(all.len() > 3);
        assert!(all.windows(2).all(|w| w[0].score() >= w[1].score()));
        assert_eq!(searcher(1, 0, 3).candidates(&state).unwrap().len(), 3);
        // only the first candidate survives an impossible threshold.
        let one = searcher(1, 1000, 20).candidates(&state).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].play, all[0].play);
    }

    #[test]
    fn emptied_rack_is_terminal() {
        let s = searcher(3, 0, 20);
        let state = position(["S", "NAT"], "");
        let result = s.search(&state, &preempt::PreemptionContext::new()).unwrap();
        assert!(result.best.unwrap().is_place());
        assert!(result.terminal);
    }

    #[test]
    fn nothing_to_play_passes() {
        let s = searcher(2, 0, 20);
        let state = position(["QQ", "NAT"], "");
        let result = s.search(&state, &preempt::PreemptionContext::new()).unwrap();
        assert!(result.best.unwrap().is_pass());
        assert!(result.terminal);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn strong_preemption_returns_at_once() {
        let s = searcher(4, 0, 20);
        let state = position(["SNAT", "ANTS"], "CATS");
        let preemption = preempt::PreemptionContext::new();
        preemption.strong_preempt();
        let result = s.search(&state, &preemption).unwrap();
        assert!(result.preempted);
        assert!(result.best.is_none());
    }

    #[test]
    fn alpha_beta_matches_minimax() {
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(20);
        let pool = letters("AAACNNSSTT");
        for depth in 1..=3 {
            for _ in 0..6 {
                let mut tiles = pool.clone();
                tiles.shuffle(&mut rng);
                let state = game_state::GameState::from_parts(
                    {
                        let mut board = board::Board::wwf();
                        board.set_word(7, 6, false, &letters("CAT"));
                        board
                    },
                    [tiles[0..3].to_vec(), tiles[3..6].to_vec()],
                    [0, 0],
                    bag::Bag(tiles[6..].to_vec()),
                    0,
                );
                let s = searcher(depth, 0, 5);
                let result = s.search(&state, &preempt::PreemptionContext::new()).unwrap();
                let (value, play) = minimax(&s, &state, depth, 0);
                assert_eq!(result.value, value, "depth {}", depth);
                assert_eq!(result.best.map(|m| m.play), play, "depth {}", depth);
            }
        }
    }
}
