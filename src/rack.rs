// Copyright (C) 2020-2026 Andy Kurnia.

use super::error;

pub const MAX_BLANKS: usize = 2;

// counts per letter, natural tiles apart from blanks already bound to that letter.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub natural: [u8; 27],
    pub bound: [u8; 27],
}

impl Tally {
    // rack must already be expanded, unbound blanks are ignored.
    pub fn from_rack(rack: &[u8]) -> Self {
        let mut ret = Self::default();
        for &tile in rack {
            let letter = (tile & 0x7f) as usize;
            if letter == 0 || letter > 26 {
                continue;
            }
            if tile & 0x80 != 0 {
                ret.bound[letter] += 1;
            } else {
                ret.natural[letter] += 1;
            }
        }
        ret
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.natural.iter().chain(self.bound.iter()).all(|&c| c == 0)
    }
}

// every distinct rack with each blank bound to a letter (0x80 | letter).
pub fn expand_blanks(rack: &[u8]) -> error::Returns<Vec<Vec<u8>>> {
    let (blanks, base): (Vec<u8>, Vec<u8>) = rack.iter().partition(|&&tile| tile == 0);
    match blanks.len() {
        0 => Ok(vec![base]),
        1 => Ok((1..=26u8)
            .map(|l| {
                let mut v = base.clone();
                v.push(0x80 | l);
                v
            })
            .collect()),
        2 => {
            // the two blanks are interchangeable.
            let mut ret = Vec::with_capacity(26 * 27 / 2);
            for l1 in 1..=26u8 {
                for l2 in l1..=26u8 {
                    let mut v = base.clone();
                    v.push(0x80 | l1);
                    v.push(0x80 | l2);
                    ret.push(v);
                }
            }
            Ok(ret)
        }
        n => Err(error::Error::TooManyBlanks(n)),
    }
}

// takes played tiles out of a rack. a tile with the blank bit consumes a blank.
pub fn use_tiles<II: IntoIterator<Item = u8>>(rack: &mut Vec<u8>, tiles_iter: II) -> error::Returns<()> {
    for tile in tiles_iter {
        let wanted = if tile & 0x80 != 0 { 0 } else { tile };
        let pos = rack
            .iter()
            .rposition(|&t| t == wanted)
            .ok_or(error::Error::TileNotOnRack(tile))?;
        rack.swap_remove(pos);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_blanks_is_identity() {
        assert_eq!(expand_blanks(&[3, 1, 20]).unwrap(), vec![vec![3, 1, 20]]);
    }

    #[test]
    fn one_blank_binds_every_letter() {
        let racks = expand_blanks(&[0, 6, 15, 20]).unwrap();
        assert_eq!(racks.len(), 26);
        assert!(racks.iter().all(|r| r.len() == 4));
        assert!(racks.contains(&vec![6, 15, 20, 0x80 | 15]));
    }

    #[test]
    fn two_blanks_are_unordered() {
        let racks = expand_blanks(&[0, 26, 0]).unwrap();
        assert_eq!(racks.len(), 351);
        assert!(racks.contains(&vec![26, 0x81, 0x9a]));
        assert!(!racks.contains(&vec![26, 0x9a, 0x81]));
    }

    #[test]
    fn three_blanks_fail() {
        assert!(matches!(
            expand_blanks(&[0, 0, 0, 1]),
            Err(error::Error::TooManyBlanks(3))
        ));
    }

    #[test]
    fn tally_separates_blanks() {
        let tally = Tally::from_rack(&[1, 1, 0x81, 5]);
        assert_eq!(tally.natural[1], 2);
        assert_eq!(tally.bound[1], 1);
        assert_eq!(tally.natural[5], 1);
        assert!(!tally.is_empty());
        assert!(Tally::from_rack(&[]).is_empty());
    }

    #[test]
    fn use_tiles_consumes_blanks() {
        let mut rack = vec![1, 0, 20];
        use_tiles(&mut rack, [0x83, 20]).unwrap();
        assert_eq!(rack, vec![1]);
        assert!(use_tiles(&mut rack, [5]).is_err());
    }
}
