//! Injectable randomness.
//!
//! Every randomized decision the virtual user makes (strategy, planning mode,
//! candidate, contact, food shape, seat type, travel date) goes through [`Dice`],
//! so a test can force any branch with [`ScriptedDice`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniform choices.
pub trait Dice: Send {
    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform value in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: u64) -> u64;

    /// Fair coin.
    fn flip(&mut self) -> bool {
        self.pick(2) == 0
    }

    /// Two distinct indices in `0..len`, returned in ascending order.
    /// `len` must be at least 2.
    fn pick_two(&mut self, len: usize) -> (usize, usize) {
        let first = self.pick(len);
        let mut second = self.pick(len - 1);
        if second >= first {
            second += 1;
        }
        (first.min(second), first.max(second))
    }
}

/// Picks an element of `items` through a trait object.
pub fn choose<'a, T>(dice: &mut dyn Dice, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(dice.pick(items.len()))
    }
}

/// [`Dice`] backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng + Send> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng + Send> Dice for RngDice<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    fn below(&mut self, n: u64) -> u64 {
        self.rng.gen_range(0..n)
    }
}

/// [`Dice`] that replays a fixed script.
///
/// Each call consumes the next scripted value and clamps it into range. Once the
/// script runs out every call answers `0`, i.e. the first option.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    script: VecDeque<u64>,
}

impl ScriptedDice {
    pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    fn next_value(&mut self, bound: u64) -> u64 {
        let value = self.script.pop_front().unwrap_or(0);
        value.min(bound.saturating_sub(1))
    }
}

impl Dice for ScriptedDice {
    fn pick(&mut self, len: usize) -> usize {
        self.next_value(len as u64) as usize
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_value(n)
    }
}

/// Hands out one [`Dice`] per consumer, in request order.
///
/// `Seeded` derives consecutive seeds so every user of a seeded run is
/// reproducible on its own. `Scripted` hands out the queued scripts, then empty
/// ones.
#[derive(Debug, Clone)]
pub enum DiceSource {
    Entropy,
    Seeded { seed: u64, issued: u64 },
    Scripted(VecDeque<ScriptedDice>),
}

impl DiceSource {
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded { seed, issued: 0 }
    }

    pub fn scripted(scripts: impl IntoIterator<Item = ScriptedDice>) -> Self {
        Self::Scripted(scripts.into_iter().collect())
    }

    pub fn next_dice(&mut self) -> Box<dyn Dice> {
        match self {
            Self::Entropy => Box::new(RngDice::from_entropy()),
            Self::Seeded { seed, issued } => {
                let dice = RngDice::seeded(seed.wrapping_add(*issued));
                *issued += 1;
                Box::new(dice)
            }
            Self::Scripted(scripts) => Box::new(scripts.pop_front().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_replays_then_defaults() {
        let mut dice = ScriptedDice::new([1, 7, 2]);
        assert_eq!(dice.pick(2), 1);
        assert_eq!(dice.pick(3), 2); // clamped
        assert_eq!(dice.below(100), 2);
        assert_eq!(dice.pick(5), 0);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_pick_two_is_distinct_and_sorted() {
        let mut dice = RngDice::seeded(7);
        for len in 2..20 {
            for _ in 0..50 {
                let (a, b) = dice.pick_two(len);
                assert!(a < b, "{a} < {b}");
                assert!(b < len);
            }
        }
    }

    #[test]
    fn test_pick_two_scripted_skips_first() {
        // a second draw at or past the first pick shifts up by one
        let mut dice = ScriptedDice::new([2, 2]);
        assert_eq!(dice.pick_two(4), (2, 3));
    }

    #[test]
    fn test_choose_empty() {
        let mut dice = ScriptedDice::default();
        let empty: [u8; 0] = [];
        assert_eq!(choose(&mut dice, &empty), None);
        assert_eq!(choose(&mut dice, &[5, 6]), Some(&5));
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let mut a = DiceSource::seeded(42);
        let mut b = DiceSource::seeded(42);
        let first: Vec<_> = (0..3).map(|_| a.next_dice().below(1_000_000)).collect();
        let second: Vec<_> = (0..3).map(|_| b.next_dice().below(1_000_000)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_scripted_source_hands_out_in_order() {
        let mut source = DiceSource::scripted([ScriptedDice::new([3]), ScriptedDice::new([1])]);
        assert_eq!(source.next_dice().pick(10), 3);
        assert_eq!(source.next_dice().pick(10), 1);
        assert_eq!(source.next_dice().pick(10), 0);
    }
}
