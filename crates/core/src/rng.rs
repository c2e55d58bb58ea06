//! RNG module - uniform random piece generation
//!
//! Every draw picks one of the seven shapes with equal probability. There is no bag or
//! history, so streaks of the same shape are possible.
//!
//! The randomness source is a trait so sessions can be driven by a seeded LCG
//! (deterministic replays and tests), by entropy, or by a fixed script.

use std::collections::VecDeque;

use crate::pieces::Piece;
use crate::types::ShapeKind;

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
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift keeps the high bits, which are the well-mixed ones in an LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Anything that can pick the next shape kind.
pub trait PieceSource {
    fn next_kind(&mut self) -> ShapeKind;

    /// Fresh spawn-positioned piece of the next kind.
    fn next_piece(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }
}

/// Uniform draw over the catalog.
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: SimpleRng,
}

impl Randomizer {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Seed from process entropy.
    pub fn from_entropy() -> Self {
        Self::new(fastrand::u32(..))
    }

    /// Current RNG state (feed back into [`Randomizer::new`] to replay from here)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for Randomizer {
    fn next_kind(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.next_range(ShapeKind::ALL.len() as u32) as usize]
    }
}

/// Replays a fixed list of kinds, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    queue: VecDeque<ShapeKind>,
}

impl FixedSequence {
    /// Panics on an empty list.
    pub fn new(kinds: impl IntoIterator<Item = ShapeKind>) -> Self {
        let queue: VecDeque<_> = kinds.into_iter().collect();
        assert!(!queue.is_empty(), "FixedSequence needs at least one kind");
        Self { queue }
    }

    /// The same kind forever.
    pub fn repeat(kind: ShapeKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for FixedSequence {
    fn next_kind(&mut self) -> ShapeKind {
        let kind = self.queue[0];
        self.queue.rotate_left(1);
        kind
    }
}

/// Draw a spawn-positioned piece from `source`.
pub fn get_random_piece(source: &mut impl PieceSource) -> Piece {
    source.next_piece()
}
