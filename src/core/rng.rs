//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization used by modern falling-block games:
//! each bag holds one of every piece kind, Fisher-Yates shuffled; draws empty
//! the bag before a new one is generated. Any 7-draw window aligned to a
//! refill boundary is therefore a permutation of the 7 kinds, and the gap
//! between two appearances of the same kind is at most 12 draws.
//!
//! A small LCG keeps the sequence deterministic per seed.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (usable as a seed to replay the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece source.
///
/// Holds the remaining kinds of the current bag cycle; never more than 7.
#[derive(Debug, Clone)]
pub struct RandomBag {
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl RandomBag {
    /// Create an empty bag; the first draw triggers a refill
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Refill with a fresh permutation of all 7 kinds
    pub fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw the next kind, refilling first if the bag is empty
    pub fn next(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        // Non-empty after refill; pop cannot fail.
        self.bag.pop().unwrap_or(PieceKind::I)
    }

    /// Discard the current bag so the next draw starts a fresh cycle
    pub fn clear(&mut self) {
        self.bag.clear();
    }

    /// Remaining kinds in the current cycle
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }

    /// Current RNG state, for replaying a game
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}
