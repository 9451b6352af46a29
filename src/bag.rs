// Copyright (C) 2020-2026 Andy Kurnia.

use super::alphabet;
use rand::prelude::*;

// tiles are drawn from the end.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bag(pub Vec<u8>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for tile in 0..alphabet.len() {
            for _ in 0..alphabet.freq(tile) {
                bag.push(tile);
            }
        }
        Bag(bag)
    }

    pub fn shuffle(&mut self, rng: &mut dyn RngCore) {
        self.0.shuffle(rng);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.0.pop()
    }

    pub fn replenish(&mut self, rack: &mut Vec<u8>, rack_size: usize) {
        while rack.len() < rack_size {
            match self.pop() {
                Some(tile) => rack.push(tile),
                None => break,
            }
        }
    }

    // the tiles will be the last ones drawn.
    pub fn put_under(&mut self, tiles: &[u8]) {
        self.0.splice(0..0, tiles.iter().copied());
    }

    // put back the tiles at random positions. keep the rest of the bag in the same order.
    pub fn put_back(&mut self, rng: &mut dyn RngCore, tiles: &[u8]) {
        for &tile in tiles {
            let pos = rng.random_range(0..=self.0.len());
            self.0.insert(pos, tile);
        }
    }
}
