// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, config, error, game_state, movegen, preempt, search, task};
use std::sync::Arc;
use std::time::Instant;

// runs fixed-depth searches one depth deeper at a time, each on its own worker.
pub struct IterativeDeepening<S: movegen::MoveSource + 'static> {
    inner: Arc<S>,
    config: config::SearchConfig,
}

impl<S: movegen::MoveSource + 'static> movegen::MoveSource for IterativeDeepening<S> {
    #[inline(always)]
    fn moves_at(&self, board: &board::Board, rack: &[u8], row: i8, col: i8) -> Vec<movegen::Move> {
        self.inner.moves_at(board, rack, row, col)
    }

    #[inline(always)]
    fn is_word(&self, word: &[u8]) -> bool {
        self.inner.is_word(word)
    }
}

impl<S: movegen::MoveSource + 'static> IterativeDeepening<S> {
    pub fn new(inner: Arc<S>, config: config::SearchConfig) -> Self {
        Self { inner, config }
    }

    // the deadline as of now. a weak caller shortens it, a strong caller ends it.
    fn deadline(&self, start: Instant, preemption: &preempt::PreemptionContext) -> Instant {
        match preemption.state() {
            preempt::Preemption::NotPreempted => start + self.config.max_execution_time(),
            preempt::Preemption::Weak => start + self.config.min_execution_time(),
            preempt::Preemption::Strong => start,
        }
    }

    fn spawn_depth(
        &self,
        state: &game_state::GameState,
        depth: u8,
    ) -> error::Returns<task::Pending<error::Returns<search::NodeResult>>> {
        let searcher = search::FixedDepth::new(
            Arc::clone(&self.inner),
            depth,
            self.config.min_score,
            self.config.branching_factor_limit,
        );
        let state = state.clone();
        task::Pending::spawn(format!("depth-{}", depth), move |worker_preemption| {
            searcher.search(&state, worker_preemption)
        })
    }

    // the result of the deepest completed depth. the first depth always completes.
    pub fn search(
        &self,
        state: &game_state::GameState,
        preemption: &preempt::PreemptionContext,
    ) -> error::Returns<search::NodeResult> {
        let start = Instant::now();
        let mut best_so_far: Option<search::NodeResult> = None;
        let mut depth = self.config.start_depth;
        loop {
            let mut pending = self.spawn_depth(state, depth)?;
            let received = if best_so_far.is_none() {
                pending.wait(None)?
            } else {
                loop {
                    let now = Instant::now();
                    let deadline = self.deadline(start, preemption);
                    if now >= deadline {
                        log::warn!("abandoning depth {} after {:?}", depth, now - start);
                        pending.cancel();
                        break None;
                    }
                    if let Some(result) = pending.wait(Some(self.config.poll_interval().min(deadline - now)))? {
                        break Some(result);
                    }
                }
            };
            let Some(result) = received else {
                break;
            };
            let result = result?;
            if result.preempted {
                break;
            }
            log::info!(
                "depth {} done in {:?}: {} value {}",
                depth,
                start.elapsed(),
                result
                    .best
                    .as_ref()
                    .map_or_else(|| "none".into(), |m| m.play.fmt(&alphabet::WWF_ALPHABET)),
                result.value
            );
            let terminal = result.terminal;
            best_so_far = Some(result);
            if terminal || depth >= self.config.max_depth {
                break;
            }
            // a weak caller gets no new depth past the soft deadline.
            if Instant::now() >= self.deadline(start, preemption) {
                break;
            }
            depth += 1;
        }
        best_so_far.ok_or_else(|| error::Error::WorkerLost(format!("depth {} produced nothing", depth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bag, gaddag};

    const WORDS: &[&str] = &[
        "ACT", "ACTS", "AN", "ANT", "ANTS", "AS", "AT", "CAN", "CANS", "CAST", "CAT", "CATS", "NA",
        "NAT", "SAT", "SCAN", "SCAT", "TA", "TAN", "TANS", "TAT", "TATS",
    ];

    fn letters(s: &str) -> Vec<u8> {
        alphabet::WWF_ALPHABET.parse_word(s).unwrap()
    }

    fn generator() -> Arc<movegen::GaddagMoveGenerator> {
        Arc::new(movegen::GaddagMoveGenerator::new(
            gaddag::Gaddag::from_words(WORDS.iter()).unwrap(),
        ))
    }

    fn position() -> game_state::GameState {
        let mut board = board::Board::wwf();
        board.set_word(7, 6, false, &letters("CAT"));
        game_state::GameState::from_parts(
            board,
            [letters("SNAT"), letters("ANTS")],
            [0, 0],
            bag::Bag(letters("ACNTACNTEE")),
            0,
        )
    }

    fn config(max_depth: u8, max_execution_time_ms: u64) -> config::SearchConfig {
        config::SearchConfig {
            max_depth,
            start_depth: 1,
            max_execution_time_ms,
            min_execution_time_ms: 0,
            min_score: 0,
            branching_factor_limit: 4,
            ..Default::default()
        }
    }

    #[test]
    fn reaches_max_depth_with_time_to_spare() {
        let g = generator();
        let state = position();
        let id = IterativeDeepening::new(Arc::clone(&g), config(3, 60_000));
        let result = id.search(&state, &preempt::PreemptionContext::new()).unwrap();
        let direct = search::FixedDepth::new(g, 3, 0, 4)
            .search(&state, &preempt::PreemptionContext::new())
            .unwrap();
        assert_eq!(result.value, direct.value);
        assert_eq!(
            result.best.map(|m| m.play),
            direct.best.map(|m| m.play)
        );
    }

    #[test]
    fn zero_time_still_answers() {
        let id = IterativeDeepening::new(generator(), config(4, 0));
        let result = id.search(&position(), &preempt::PreemptionContext::new()).unwrap();
        assert!(result.best.is_some());
    }

    #[test]
    fn strong_caller_gets_first_depth() {
        let id = IterativeDeepening::new(generator(), config(4, 60_000));
        let preemption = preempt::PreemptionContext::new();
        preemption.strong_preempt();
        let state = position();
        let result = id.search(&state, &preemption).unwrap();
        let first = search::FixedDepth::new(generator(), 1, 0, 4)
            .search(&state, &preempt::PreemptionContext::new())
            .unwrap();
        assert_eq!(result.value, first.value);
        assert!(result.best.is_some());
    }

    #[test]
    fn weak_caller_stops_after_first_depth() {
        let g = generator();
        let state = position();
        let preemption = preempt::PreemptionContext::new();
        preemption.weak_preempt();
        let id = IterativeDeepening::new(
            Arc::clone(&g),
            config::SearchConfig {
                start_depth: 2,
                ..config(4, 60_000)
            },
        );
        let result = id.search(&state, &preemption).unwrap();
        let direct = search::FixedDepth::new(g, 2, 0, 4)
            .search(&state, &preempt::PreemptionContext::new())
            .unwrap();
        assert_eq!(result.value, direct.value);
        assert_eq!(result.best.map(|m| m.play), direct.best.map(|m| m.play));
    }

    // turns the caller weak as soon as depth 2 starts, then crawls.
    struct WeakensAtDepthTwo {
        inner: movegen::GaddagMoveGenerator,
        caller: preempt::PreemptionContext,
    }

    impl movegen::MoveSource for WeakensAtDepthTwo {
        fn moves_at(&self, board: &board::Board, rack: &[u8], row: i8, col: i8) -> Vec<movegen::Move> {
            if std::thread::current().name() == Some("depth-2") {
                self.caller.weak_preempt();
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            self.inner.moves_at(board, rack, row, col)
        }

        fn is_word(&self, word: &[u8]) -> bool {
            self.inner.is_word(word)
        }
    }

    #[test]
    fn weakened_mid_search_returns_last_completed_depth() {
        let state = position();
        let preemption = preempt::PreemptionContext::new();
        let source = Arc::new(WeakensAtDepthTwo {
            inner: movegen::GaddagMoveGenerator::new(gaddag::Gaddag::from_words(WORDS.iter()).unwrap()),
            caller: preemption.clone(),
        });
        let id = IterativeDeepening::new(
            source,
            config::SearchConfig {
                min_execution_time_ms: 50,
                ..config(2, 60_000)
            },
        );
        let t0 = Instant::now();
        let result = id.search(&state, &preemption).unwrap();
        // depth 2 alone would sleep through dozens of calls.
        assert!(t0.elapsed() < std::time::Duration::from_secs(2), "{:?}", t0.elapsed());
        assert_eq!(preemption.state(), preempt::Preemption::Weak);
        let first = search::FixedDepth::new(generator(), 1, 0, 4)
            .search(&state, &preempt::PreemptionContext::new())
            .unwrap();
        assert_eq!(result.value, first.value);
        assert_eq!(result.best.map(|m| m.play), first.best.map(|m| m.play));
    }

    #[test]
    fn terminal_result_stops_early() {
        let mut state = position();
        state.players[0].rack = letters("S");
        state.bag = bag::Bag::default();
        let id = IterativeDeepening::new(generator(), config(4, 60_000));
        let result = id.search(&state, &preempt::PreemptionContext::new()).unwrap();
        assert!(result.terminal);
        assert!(result.best.unwrap().is_place());
    }
}
