//! The Klondike board: stock, waste, seven tableau columns and four
//! foundations.
//!
//! `Tableau` owns all 13 piles and nothing else. Rules live in `moves`;
//! this module only knows how to lay cards out and how to look them up.

use crate::card::{CARDS_PER_DECK, Card, NUM_RANKS};
use crate::pile::{NUM_FOUNDATIONS, NUM_TABLEAUS, Pile, PileId};

/// Number of cards dealt to the tableau columns (1 + 2 + ... + 7).
pub const TABLEAU_DEAL_CARDS: usize = NUM_TABLEAUS * (NUM_TABLEAUS + 1) / 2;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tableau {
    pub stock: Pile,
    pub waste: Pile,
    pub columns: [Pile; NUM_TABLEAUS],
    pub foundations: [Pile; NUM_FOUNDATIONS],
}

impl Tableau {
    /// A board with every pile empty.
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Lay out a shuffled deck per Klondike setup rules.
    ///
    /// Cards are taken from the front of `deck`: column 1 receives one card,
    /// column 2 two cards, and so on up to column 7. The last card dealt to
    /// each column is face-up, the rest face-down. The remaining 24 cards
    /// go to the stock, face-down, so the final card of `deck` is the stock
    /// top. Waste and foundations start empty.
    pub fn deal_from_shuffled(deck: Vec<Card>) -> Self {
        debug_assert_eq!(deck.len(), CARDS_PER_DECK as usize);

        let mut tab = Tableau::new_empty();
        let mut cards = deck.into_iter();

        for (col_idx, col) in tab.columns.iter_mut().enumerate() {
            for depth in 0..=col_idx {
                if let Some(mut card) = cards.next() {
                    card.face_up = depth == col_idx;
                    col.push(card);
                }
            }
        }

        for mut card in cards {
            card.face_up = false;
            tab.stock.push(card);
        }

        tab
    }

    pub fn pile(&self, id: PileId) -> &Pile {
        match id {
            PileId::Stock => &self.stock,
            PileId::Waste => &self.waste,
            PileId::Tableau(i) => &self.columns[i as usize],
            PileId::Foundation(i) => &self.foundations[i as usize],
        }
    }

    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        match id {
            PileId::Stock => &mut self.stock,
            PileId::Waste => &mut self.waste,
            PileId::Tableau(i) => &mut self.columns[i as usize],
            PileId::Foundation(i) => &mut self.foundations[i as usize],
        }
    }

    /// Ordered read-only snapshot of every pile, for the presentation layer.
    pub fn piles(&self) -> impl Iterator<Item = (PileId, &[Card])> {
        PileId::all().map(move |id| (id, self.pile(id).cards()))
    }

    /// All four foundations hold a complete suit.
    pub fn is_win(&self) -> bool {
        let won = self
            .foundations
            .iter()
            .all(|f| f.len() == NUM_RANKS as usize);
        debug_assert!(
            !won || self.is_cleared(),
            "full foundations but cards left elsewhere"
        );
        won
    }

    /// Stock, waste and every column are empty.
    pub fn is_cleared(&self) -> bool {
        self.stock.is_empty() && self.waste.is_empty() && self.columns.iter().all(Pile::is_empty)
    }

    /// Every card on the board, pile by pile in `PileId::all()` order.
    pub fn flatten_cards(&self) -> Vec<Card> {
        self.piles().flat_map(|(_, cards)| cards.iter().copied()).collect()
    }

    pub fn card_count(&self) -> usize {
        self.piles().map(|(_, cards)| cards.len()).sum()
    }
}
