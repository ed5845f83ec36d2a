//! Shuffling and dealing a fresh game.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::info;

use crate::card::{Card, standard_deck};
use crate::tableau::Tableau;

/// A dealt board together with the seed that produced it.
#[derive(Clone, Debug)]
pub struct Deal {
    seed: u64,
    tableau: Tableau,
}

impl Deal {
    /// Shuffle with `seed` (or a clock-derived seed when `None`) and deal.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(seed_from_clock);
        let deck = shuffled_deck_from_seed(seed);
        info!(seed, "dealt new game");
        Deal {
            seed,
            tableau: Tableau::deal_from_shuffled(deck),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn into_tableau(self) -> Tableau {
        self.tableau
    }
}

/// Seed from the system clock. Not meant to be unpredictable, only to
/// give a different game each run.
pub fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Return a shuffled standard deck for the given seed.
///
/// The same seed always yields the same permutation.
pub fn shuffled_deck_from_seed(seed: u64) -> Vec<Card> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut deck = standard_deck();
    deck.shuffle(&mut rng);
    deck
}
