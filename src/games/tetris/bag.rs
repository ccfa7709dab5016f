use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::piece::{PieceKind, Tetromino};

/// 7-bag randomizer: each refill is a fresh shuffle of all seven kinds.
pub struct Bag {
    rng: Pcg32,
    bag: Vec<PieceKind>,
}

impl Bag {
    pub fn new(seed: u64) -> Self {
        let mut bag = Self {
            rng: Pcg32::seed_from_u64(seed),
            bag: Vec::with_capacity(PieceKind::ALL.len()),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag.extend_from_slice(&PieceKind::ALL);
        self.bag.shuffle(&mut self.rng);
    }

    pub fn next_kind(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        // refill guarantees a value
        self.bag.pop().unwrap_or(PieceKind::T)
    }

    pub fn next(&mut self) -> Tetromino {
        Tetromino::new(self.next_kind())
    }

    /// Kind the next draw will return, if the current bag is not empty.
    pub fn peek(&self) -> Option<PieceKind> {
        self.bag.last().copied()
    }
}
