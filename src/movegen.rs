// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, board, error, gaddag, matrix, play_scorer, rack};
use std::collections::{HashSet, VecDeque};

// across plays: down=false, lane=row, idx=col (0-based).
// down plays: down=true, lane=col, idx=row (0-based).
// word covers the whole main word: 0 for play-through, 1 for A, 0x81 for blank-as-A.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Play {
    Pass,
    Swap {
        tiles: Box<[u8]>,
    },
    Place {
        down: bool,
        lane: i8,
        idx: i8,
        word: Box<[u8]>,
    },
}

impl Play {
    pub fn fmt(&self, alphabet: &alphabet::Alphabet) -> String {
        match self {
            Play::Pass => "pass".into(),
            Play::Swap { tiles } => format!("swap {}", alphabet.fmt_rack(tiles)),
            Play::Place {
                down,
                lane,
                idx,
                word,
            } => {
                let (row, col) = if *down { (*idx, *lane) } else { (*lane, *idx) };
                let col_label = ((col as u8) + b'A') as char;
                if *down {
                    format!("{}{} {}", col_label, row + 1, alphabet.fmt_word(word))
                } else {
                    format!("{}{} {}", row + 1, col_label, alphabet.fmt_word(word))
                }
            }
        }
    }

    // (board index, tile) of every newly placed tile, ordered by index.
    pub fn placement_key(&self, dim: matrix::Dim) -> Vec<(usize, u8)> {
        match self {
            Play::Place {
                down,
                lane,
                idx,
                word,
            } => {
                let strider = dim.lane(*down, *lane);
                let mut ret = (*idx..)
                    .zip(word.iter())
                    .filter(|&(_, &tile)| tile != 0)
                    .map(|(i, &tile)| (strider.at(i), tile))
                    .collect::<Vec<_>>();
                ret.sort_unstable();
                ret
            }
            _ => Vec::new(),
        }
    }

    // rack tiles the play uses. blanks come back as 0.
    pub fn tiles_used(&self) -> Vec<u8> {
        match self {
            Play::Pass => Vec::new(),
            Play::Swap { tiles } => tiles.to_vec(),
            Play::Place { word, .. } => word
                .iter()
                .filter(|&&tile| tile != 0)
                .map(|&tile| if tile & 0x80 != 0 { 0 } else { tile })
                .collect(),
        }
    }
}

// a play plus its lazily computed outcome.
#[derive(Clone, Debug)]
pub struct Move {
    pub play: Play,
    pub result: Option<play_scorer::PlayResult>,
}

impl Move {
    pub fn pass() -> Self {
        Self {
            play: Play::Pass,
            result: None,
        }
    }

    pub fn swap(tiles: Box<[u8]>) -> Self {
        Self {
            play: Play::Swap { tiles },
            result: None,
        }
    }

    pub fn place(down: bool, lane: i8, idx: i8, word: Box<[u8]>) -> Self {
        Self {
            play: Play::Place {
                down,
                lane,
                idx,
                word,
            },
            result: None,
        }
    }

    #[inline(always)]
    pub fn is_place(&self) -> bool {
        matches!(self.play, Play::Place { .. })
    }

    #[inline(always)]
    pub fn is_pass(&self) -> bool {
        matches!(self.play, Play::Pass)
    }

    // zero until scored.
    #[inline(always)]
    pub fn score(&self) -> i32 {
        self.result.as_ref().map_or(0, |r| r.score)
    }

    pub fn scored(mut self, board: &board::Board) -> error::Returns<Self> {
        if self.result.is_none() {
            self.result = Some(play_scorer::score_play(board, &self.play)?);
        }
        Ok(self)
    }
}

// the single seam every move generator exposes. decorators delegate to the generator they wrap.
pub trait MoveSource: Send + Sync {
    // unscored placements whose main word covers (row, col), for a rack without unbound blanks.
    fn moves_at(&self, board: &board::Board, rack: &[u8], row: i8, col: i8) -> Vec<Move>;

    fn is_word(&self, word: &[u8]) -> bool;
}

impl<T: MoveSource + ?Sized> MoveSource for std::sync::Arc<T> {
    #[inline(always)]
    fn moves_at(&self, board: &board::Board, rack: &[u8], row: i8, col: i8) -> Vec<Move> {
        (**self).moves_at(board, rack, row, col)
    }

    #[inline(always)]
    fn is_word(&self, word: &[u8]) -> bool {
        (**self).is_word(word)
    }
}

pub struct GaddagMoveGenerator {
    pub gaddag: gaddag::Gaddag,
}

impl GaddagMoveGenerator {
    pub fn new(gaddag: gaddag::Gaddag) -> Self {
        Self { gaddag }
    }
}

impl MoveSource for GaddagMoveGenerator {
    fn moves_at(&self, board: &board::Board, rack: &[u8], row: i8, col: i8) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut tally = rack::Tally::from_rack(rack);
        let dim = board.dim();
        let mut word_buffer = vec![0u8; std::cmp::max(dim.rows, dim.cols) as usize];
        // the opening word starts on the star and runs across. words that only
        // cover the star, and their down transposes, are not generated.
        let opening = !board.has_tiles();
        for down in [false, true] {
            if opening && down {
                break;
            }
            let (lane, anchor) = if down { (col, row) } else { (row, col) };
            gen_place_moves(
                &self.gaddag,
                &board.tiles,
                dim.lane(down, lane),
                &mut tally,
                &mut word_buffer,
                anchor,
                if opening { anchor } else { 0 },
                |idx, word| moves.push(Move::place(down, lane, idx, word.into())),
            );
        }
        moves
    }

    #[inline(always)]
    fn is_word(&self, word: &[u8]) -> bool {
        self.gaddag.is_word_tiles(word)
    }
}

#[allow(clippy::too_many_arguments)]
fn gen_place_moves<'a, CallbackType: FnMut(i8, &[u8])>(
    gaddag: &'a gaddag::Gaddag,
    board_tiles: &'a [u8],
    strider: matrix::Strider,
    tally: &'a mut rack::Tally,
    word_buffer: &'a mut [u8],
    anchor: i8,
    leftmost: i8,
    callback: CallbackType,
) {
    struct Env<'a, CallbackType: FnMut(i8, &[u8])> {
        gaddag: &'a gaddag::Gaddag,
        board_tiles: &'a [u8],
        strider: matrix::Strider,
        tally: &'a mut rack::Tally,
        word_buffer: &'a mut [u8],
        callback: CallbackType,
        anchor: i8,
        leftmost: i8,
        idx_left: i8,
        num_played: i8,
    }

    impl<CallbackType: FnMut(i8, &[u8])> Env<'_, CallbackType> {
        #[inline(always)]
        fn tile_at(&self, idx: i8) -> u8 {
            self.board_tiles[self.strider.at(idx)]
        }

        // empty or off the edge.
        #[inline(always)]
        fn is_open(&self, idx: i8) -> bool {
            idx < 0 || idx >= self.strider.len() || self.tile_at(idx) == 0
        }

        #[inline(always)]
        fn can_take(&self, arc: gaddag::ArcId, letter: u8) -> bool {
            self.gaddag[arc].has_terminal(letter) || self.gaddag.follow(arc, letter).is_some()
        }
    }

    fn record<CallbackType: FnMut(i8, &[u8])>(
        env: &mut Env<CallbackType>,
        idx_left: i8,
        idx_right: i8,
    ) {
        if env.num_played > 0 {
            (env.callback)(
                idx_left,
                &env.word_buffer[(idx_left as usize)..(idx_right as usize)],
            );
        }
    }

    // tries every way to fill idx, then hands over to step with the letter there.
    fn fill<CallbackType: FnMut(i8, &[u8])>(
        env: &mut Env<CallbackType>,
        idx: i8,
        arc: gaddag::ArcId,
        step: fn(&mut Env<CallbackType>, i8, gaddag::ArcId, u8),
    ) {
        let b = env.tile_at(idx);
        if b != 0 {
            env.word_buffer[idx as usize] = 0;
            step(env, idx, arc, b & 0x7f);
            return;
        }
        for letter in 1..=26u8 {
            let l = letter as usize;
            if env.tally.natural[l] == 0 && env.tally.bound[l] == 0 {
                continue;
            }
            if !env.can_take(arc, letter) {
                continue;
            }
            if env.tally.natural[l] > 0 {
                env.tally.natural[l] -= 1;
                env.num_played += 1;
                env.word_buffer[idx as usize] = letter;
                step(env, idx, arc, letter);
                env.num_played -= 1;
                env.tally.natural[l] += 1;
            }
            if env.tally.bound[l] > 0 {
                env.tally.bound[l] -= 1;
                env.num_played += 1;
                env.word_buffer[idx as usize] = letter | 0x80;
                step(env, idx, arc, letter);
                env.num_played -= 1;
                env.tally.bound[l] += 1;
            }
        }
    }

    // letter now sits at idx <= anchor, reached through arc.
    fn go_left<CallbackType: FnMut(i8, &[u8])>(
        env: &mut Env<CallbackType>,
        idx: i8,
        arc: gaddag::ArcId,
        letter: u8,
    ) {
        let right = env.anchor + 1;
        let no_left = env.is_open(idx - 1);
        if no_left && env.is_open(right) && env.gaddag[arc].has_terminal(letter) {
            record(env, idx, right);
        }
        let Some(next) = env.gaddag.follow(arc, letter) else {
            return;
        };
        if idx > env.leftmost {
            fill(env, idx - 1, next, go_left);
        }
        if no_left && right < env.strider.len() {
            if let Some(delim) = env.gaddag.follow(next, gaddag::DELIM) {
                let saved_idx_left = env.idx_left;
                env.idx_left = idx;
                fill(env, right, delim, go_right);
                env.idx_left = saved_idx_left;
            }
        }
    }

    // letter now sits at idx > anchor, reached through arc.
    fn go_right<CallbackType: FnMut(i8, &[u8])>(
        env: &mut Env<CallbackType>,
        idx: i8,
        arc: gaddag::ArcId,
        letter: u8,
    ) {
        if env.is_open(idx + 1) && env.gaddag[arc].has_terminal(letter) {
            let idx_left = env.idx_left;
            record(env, idx_left, idx + 1);
        }
        let Some(next) = env.gaddag.follow(arc, letter) else {
            return;
        };
        if idx + 1 < env.strider.len() {
            fill(env, idx + 1, next, go_right);
        }
    }

    let mut env = Env {
        gaddag,
        board_tiles,
        strider,
        tally,
        word_buffer,
        callback,
        anchor,
        leftmost,
        idx_left: anchor,
        num_played: 0,
    };
    fill(&mut env, anchor, gaddag::INIT_ARC, go_left);
}

// scored, validated, de-duplicated moves, one anchor slot at a time.
pub struct AllMoves<'a, S: MoveSource + ?Sized> {
    source: &'a S,
    board: &'a board::Board,
    racks: Vec<Vec<u8>>,
    anchors: Vec<(i8, i8)>,
    next_anchor: usize,
    pending: VecDeque<Move>,
    seen: HashSet<Vec<(usize, u8)>>,
}

pub fn all_moves<'a, S: MoveSource + ?Sized>(
    source: &'a S,
    board: &'a board::Board,
    rack: &[u8],
) -> error::Returns<AllMoves<'a, S>> {
    Ok(AllMoves {
        source,
        board,
        racks: rack::expand_blanks(rack)?,
        anchors: board.anchors(),
        next_anchor: 0,
        pending: VecDeque::new(),
        seen: HashSet::new(),
    })
}

impl<S: MoveSource + ?Sized> AllMoves<'_, S> {
    fn fill_pending(&mut self) {
        while self.pending.is_empty() && self.next_anchor < self.anchors.len() {
            let (row, col) = self.anchors[self.next_anchor];
            self.next_anchor += 1;
            for rack in &self.racks {
                for candidate in self.source.moves_at(self.board, rack, row, col) {
                    let key = candidate.play.placement_key(self.board.dim());
                    if self.seen.contains(&key) {
                        continue;
                    }
                    let candidate = match candidate.scored(self.board) {
                        Ok(m) => m,
                        Err(e) => {
                            log::debug!("dropping unscorable candidate: {}", e);
                            continue;
                        }
                    };
                    let valid = candidate.result.as_ref().is_some_and(|r| {
                        !r.words.is_empty() && r.words.iter().all(|w| self.source.is_word(w))
                    });
                    if valid {
                        self.seen.insert(key);
                        self.pending.push_back(candidate);
                    }
                }
            }
        }
    }
}

impl<S: MoveSource + ?Sized> Iterator for AllMoves<'_, S> {
    type Item = Move;

    fn next(&mut self) -> Option<Move> {
        if self.pending.is_empty() {
            self.fill_pending();
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(words: &[&str]) -> GaddagMoveGenerator {
        GaddagMoveGenerator::new(gaddag::Gaddag::from_words(words.iter()).unwrap())
    }

    fn letters(s: &str) -> Vec<u8> {
        alphabet::WWF_ALPHABET.parse_word(s).unwrap()
    }

    fn fmt_all(moves: &[Move]) -> Vec<String> {
        let mut ret = moves
            .iter()
            .map(|m| m.play.fmt(&alphabet::WWF_ALPHABET))
            .collect::<Vec<_>>();
        ret.sort();
        ret
    }

    #[test]
    fn opening_move_starts_on_star() {
        let g = generator(&["CAT"]);
        let board = board::Board::wwf();
        let moves = all_moves(&g, &board, &letters("CAT")).unwrap().collect::<Vec<_>>();
        assert_eq!(fmt_all(&moves), vec!["8H CAT"]);
        assert_eq!(moves[0].play, Play::Place {
            down: false,
            lane: 7,
            idx: 7,
            word: letters("CAT").into(),
        });
    }

    #[test]
    fn opening_words_never_just_cover_the_star() {
        let g = generator(&["AT", "TA", "TAT"]);
        let board = board::Board::wwf();
        let moves = all_moves(&g, &board, &letters("TAT")).unwrap().collect::<Vec<_>>();
        assert_eq!(fmt_all(&moves), vec!["8H AT", "8H TA", "8H TAT"]);
    }

    #[test]
    fn extends_existing_word_both_ways() {
        let g = generator(&["AT", "CAT", "CATS", "SCAT", "SCATS"]);
        let mut board = board::Board::wwf();
        board.set_word(7, 7, false, &letters("CAT"));
        let moves = all_moves(&g, &board, &letters("SS")).unwrap().collect::<Vec<_>>();
        let words = fmt_all(&moves);
        assert!(words.contains(&"8G S...".into()), "{:?}", words);
        assert!(words.contains(&"8H ...S".into()), "{:?}", words);
        assert!(words.contains(&"8G S...S".into()), "{:?}", words);
        assert_eq!(words.len(), 3, "{:?}", words);
    }

    #[test]
    fn moves_make_only_real_words() {
        let g = generator(&["HADOOPY", "BOOPY", "OY", "BOA", "HA", "AD", "DO"]);
        let mut board = board::Board::wwf();
        board.set_word(7, 5, false, &letters("HADOOPY"));
        let moves = all_moves(&g, &board, &letters("BOOPYA")).unwrap().collect::<Vec<_>>();
        assert!(!moves.is_empty());
        for m in &moves {
            let result = m.result.as_ref().unwrap();
            for w in &result.words {
                assert!(g.is_word(w), "{}", alphabet::WWF_ALPHABET.fmt_word(w));
            }
        }
    }

    #[test]
    fn single_tile_counted_once() {
        let g = generator(&["TA", "AT"]);
        let mut board = board::Board::wwf();
        board.set_word(7, 7, false, &letters("T"));
        let moves = all_moves(&g, &board, &letters("A")).unwrap().collect::<Vec<_>>();
        // A after T across, or below T down. A before T across, or above T down.
        assert_eq!(moves.len(), 4, "{:?}", fmt_all(&moves));
    }

    #[test]
    fn blanks_fill_in_for_missing_letters() {
        let g = generator(&["ZAZZ"]);
        let mut board = board::Board::wwf();
        board.set_word(7, 7, false, &letters("Z"));
        let rack = alphabet::WWF_ALPHABET.parse_rack("??Z").unwrap();
        let moves = all_moves(&g, &board, &rack).unwrap().collect::<Vec<_>>();
        assert!(!moves.is_empty());
        for m in &moves {
            let Play::Place { word, .. } = &m.play else {
                panic!("not a placement");
            };
            assert_eq!(word.iter().filter(|&&t| t & 0x80 != 0).count(), 2);
            assert_eq!(word.iter().filter(|&&t| t == 26).count(), 1);
            let result = m.result.as_ref().unwrap();
            assert_eq!(result.words.len(), 1);
            assert_eq!(&result.main_word[..], &letters("ZAZZ")[..]);
        }
    }

    #[test]
    fn too_many_blanks_is_an_error() {
        let g = generator(&["AA"]);
        let board = board::Board::wwf();
        assert!(all_moves(&g, &board, &[0, 0, 0]).is_err());
    }
}
