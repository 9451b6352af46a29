// Copyright (C) 2020-2026 Andy Kurnia.

use super::{alphabet, error};

pub type StateId = u32;
pub type ArcId = u32;

// separates the reversed prefix from the forward suffix. letters are 1..=26.
pub const DELIM: u8 = 0;
pub const INITIAL_STATE: StateId = 0;
// synthetic arc leading into the initial state, with no terminals.
pub const INIT_ARC: ArcId = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arc {
    letter: u8,
    target: StateId,
    terminals: u32,
}

impl Arc {
    #[inline(always)]
    pub fn letter(&self) -> u8 {
        self.letter
    }

    #[inline(always)]
    pub fn target(&self) -> StateId {
        self.target
    }

    #[inline(always)]
    pub fn terminals(&self) -> u32 {
        self.terminals
    }

    // whether appending letter right after this arc completes a word.
    #[inline(always)]
    pub fn has_terminal(&self, letter: u8) -> bool {
        self.terminals & (1 << (letter & 0x1f)) != 0
    }
}

#[derive(Clone, Copy, Default)]
struct State {
    // bit 0 is DELIM, bits 1..=26 are letters.
    mask: u32,
    // index of the first outgoing arc once compacted.
    first: u32,
}

pub struct Gaddag {
    states: Vec<State>,
    arcs: Vec<Arc>,
    // per-state outgoing arcs in insertion order. None once compacted.
    building: Option<Vec<Vec<ArcId>>>,
    num_words: usize,
}

impl Default for Gaddag {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<ArcId> for Gaddag {
    type Output = Arc;

    #[inline(always)]
    fn index(&self, i: ArcId) -> &Arc {
        &self.arcs[i as usize]
    }
}

impl Gaddag {
    pub fn new() -> Self {
        Self {
            states: vec![State::default()],
            arcs: vec![Arc {
                letter: DELIM,
                target: INITIAL_STATE,
                terminals: 0,
            }],
            building: Some(vec![Vec::new()]),
            num_words: 0,
        }
    }

    pub fn from_words<I: IntoIterator<Item = S>, S: AsRef<str>>(words: I) -> error::Returns<Self> {
        let mut ret = Self::new();
        for word in words {
            ret.insert(word.as_ref())?;
        }
        ret.compact();
        Ok(ret)
    }

    // one word per line until end of stream. any bad line fails the whole load.
    pub fn load<R: std::io::BufRead>(reader: R) -> error::Returns<Self> {
        let mut ret = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            ret.insert(word)?;
        }
        ret.compact();
        log::info!(
            "loaded {} words into {} states and {} arcs",
            ret.num_words,
            ret.num_states(),
            ret.num_arcs()
        );
        Ok(ret)
    }

    #[inline(always)]
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    // not counting the init arc.
    #[inline(always)]
    pub fn num_arcs(&self) -> usize {
        self.arcs.len() - 1
    }

    #[inline(always)]
    pub fn num_words(&self) -> usize {
        self.num_words
    }

    #[inline(always)]
    pub fn is_compacted(&self) -> bool {
        self.building.is_none()
    }

    #[inline(always)]
    pub fn next_arc(&self, state: StateId, letter: u8) -> Option<ArcId> {
        let st = self.states[state as usize];
        let bit = 1u32 << letter;
        if st.mask & bit == 0 {
            return None;
        }
        match &self.building {
            None => Some(st.first + (st.mask & (bit - 1)).count_ones()),
            Some(building) => building[state as usize]
                .iter()
                .copied()
                .find(|&a| self.arcs[a as usize].letter == letter),
        }
    }

    // the arc for letter out of the state this arc leads to.
    #[inline(always)]
    pub fn follow(&self, arc: ArcId, letter: u8) -> Option<ArcId> {
        self.next_arc(self.arcs[arc as usize].target, letter)
    }

    pub fn insert(&mut self, word: &str) -> error::Returns<()> {
        if self.is_compacted() {
            return Err(error::Error::Compacted(word.into()));
        }
        let mut letters = Vec::with_capacity(word.len());
        for b in word.bytes() {
            match alphabet::letter_of(b) {
                Some(letter) => letters.push(letter),
                None => {
                    return Err(error::Error::BadWord {
                        word: word.into(),
                        byte: b,
                    });
                }
            }
        }
        if letters.len() < 2 {
            log::debug!("skipping short word {:?}", word);
            return Ok(());
        }
        self.insert_letters(&letters)
            .map_err(|_| error::Error::ConflictingArc(word.into()))?;
        self.num_words += 1;
        Ok(())
    }

    // w is at least two letters.
    fn insert_letters(&mut self, w: &[u8]) -> Result<(), ()> {
        let n = w.len();

        // w[n-1] .. w[1], with w[0] completing the word.
        let mut st = INITIAL_STATE;
        for i in (2..n).rev() {
            let arc = self.add_arc(st, w[i]);
            st = self.target_of(arc);
        }
        self.add_final_arc(st, w[1], w[0]);

        // w[n-2] .. w[0] DELIM, with w[n-1] completing the word.
        st = INITIAL_STATE;
        for i in (0..n - 1).rev() {
            let arc = self.add_arc(st, w[i]);
            st = self.target_of(arc);
        }
        let arc = self.add_final_arc(st, DELIM, w[n - 1]);
        st = self.target_of(arc);
        let first_force_state = st;

        // w[i] .. w[0] DELIM w[i+1], joining the state after w[i+1] .. w[0] DELIM.
        for i in (0..n - 2).rev() {
            let force_st = st;
            st = INITIAL_STATE;
            for j in (0..=i).rev() {
                let arc = self.add_arc(st, w[j]);
                st = self.target_of(arc);
            }
            let arc = self.add_arc(st, DELIM);
            st = self.target_of(arc);
            let forced = self.force_arc(st, w[i + 1], force_st)?;
            if force_st == first_force_state {
                self.arcs[forced as usize].terminals |= 1 << w[n - 1];
            }
        }
        Ok(())
    }

    #[inline(always)]
    fn target_of(&self, arc: ArcId) -> StateId {
        self.arcs[arc as usize].target
    }

    fn push_arc(&mut self, from: StateId, letter: u8, target: StateId) -> ArcId {
        let id = self.arcs.len() as ArcId;
        self.arcs.push(Arc {
            letter,
            target,
            terminals: 0,
        });
        self.states[from as usize].mask |= 1 << letter;
        if let Some(building) = &mut self.building {
            building[from as usize].push(id);
        }
        id
    }

    fn add_arc(&mut self, st: StateId, letter: u8) -> ArcId {
        if let Some(arc) = self.next_arc(st, letter) {
            return arc;
        }
        let new_state = self.states.len() as StateId;
        self.states.push(State::default());
        if let Some(building) = &mut self.building {
            building.push(Vec::new());
        }
        self.push_arc(st, letter, new_state)
    }

    fn add_final_arc(&mut self, st: StateId, letter: u8, terminal: u8) -> ArcId {
        let arc = self.add_arc(st, letter);
        self.arcs[arc as usize].terminals |= 1 << terminal;
        arc
    }

    fn force_arc(&mut self, st: StateId, letter: u8, dest: StateId) -> Result<ArcId, ()> {
        match self.next_arc(st, letter) {
            Some(arc) if self.arcs[arc as usize].target != dest => Err(()),
            Some(arc) => Ok(arc),
            None => Ok(self.push_arc(st, letter, dest)),
        }
    }

    // switches to the dense sorted form. later inserts fail.
    pub fn compact(&mut self) {
        let Some(mut building) = self.building.take() else {
            return;
        };
        let mut arcs = Vec::with_capacity(self.arcs.len());
        arcs.push(self.arcs[INIT_ARC as usize]);
        for (state, outgoing) in self.states.iter_mut().zip(building.iter_mut()) {
            outgoing.sort_unstable_by_key(|&a| self.arcs[a as usize].letter);
            state.first = arcs.len() as u32;
            arcs.extend(outgoing.iter().map(|&a| self.arcs[a as usize]));
        }
        self.arcs = arcs;
    }

    // letters may carry the blank bit. panics on an empty word.
    pub fn is_word_tiles(&self, word: &[u8]) -> bool {
        assert!(!word.is_empty(), "cannot check an empty word");
        let n = word.len();
        if n < 2 {
            return false;
        }
        let Some(mut arc) = self.next_arc(INITIAL_STATE, word[0] & 0x7f) else {
            return false;
        };
        let Some(next) = self.follow(arc, DELIM) else {
            return false;
        };
        arc = next;
        for &tile in &word[1..n - 1] {
            match self.follow(arc, tile & 0x7f) {
                Some(next) => arc = next,
                None => return false,
            }
        }
        self[arc].has_terminal(word[n - 1] & 0x7f)
    }

    pub fn is_word(&self, word: &str) -> bool {
        assert!(!word.is_empty(), "cannot check an empty word");
        let mut letters = Vec::with_capacity(word.len());
        for b in word.bytes() {
            match alphabet::letter_of(b) {
                Some(letter) => letters.push(letter),
                None => return false,
            }
        }
        self.is_word_tiles(&letters)
    }
}
