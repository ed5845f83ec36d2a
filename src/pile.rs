//! Ordered card piles with stack discipline.
//!
//! A `Pile` stores cards bottom -> top in a `Vec`; only the last element is
//! ever played from or onto. `PileId` names the 13 piles of a Klondike board.

use core::fmt;

use crate::card::Card;

/// Number of tableau piles.
pub const NUM_TABLEAUS: usize = 7;
/// Number of foundation piles.
pub const NUM_FOUNDATIONS: usize = 4;

/// Which of the 13 board piles a command refers to.
///
/// Tableau and foundation indices are 0-based internally and shown 1-based
/// to the player (`t1`..`t7`, `f1`..`f4`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PileId {
    Stock,
    Waste,
    Tableau(u8),
    Foundation(u8),
}

impl PileId {
    /// Every pile in display order: stock, waste, tableaus, foundations.
    pub fn all() -> impl Iterator<Item = PileId> {
        [PileId::Stock, PileId::Waste]
            .into_iter()
            .chain((0..NUM_TABLEAUS as u8).map(PileId::Tableau))
            .chain((0..NUM_FOUNDATIONS as u8).map(PileId::Foundation))
    }

    /// Short label as typed in commands (`t3`, `f1`, `w`). The stock is never
    /// named in a command and shows as `s`.
    pub fn label(self) -> String {
        match self {
            PileId::Stock => "s".to_string(),
            PileId::Waste => "w".to_string(),
            PileId::Tableau(i) => format!("t{}", i + 1),
            PileId::Foundation(i) => format!("f{}", i + 1),
        }
    }
}

impl fmt::Display for PileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PileId::Stock => f.write_str("Stock"),
            PileId::Waste => f.write_str("Waste"),
            PileId::Tableau(i) => write!(f, "Tableau {}", i + 1),
            PileId::Foundation(i) => write!(f, "Foundation {}", i + 1),
        }
    }
}

/// A stack of cards, bottom at index 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Pile { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Pile { cards }
    }

    /// Append a card to the top.
    #[inline]
    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Remove and return the top card, or `None` if the pile is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    #[inline]
    pub fn top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut Card> {
        self.cards.last_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Read-only view, bottom -> top.
    #[inline]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Number of face-up cards on top of the pile (the maximal face-up suffix).
    pub fn face_up_len(&self) -> usize {
        self.cards.iter().rev().take_while(|c| c.face_up).count()
    }
}
