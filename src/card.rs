//! Card, Suit, and Rank types for a standard 52-card deck.
//!
//! - `Card` is an immutable (rank, suit) identity plus a mutable face-up flag.
//! - `Suit` and `Rank` carry the numeric projections the move rules compare.

use core::fmt;

/// Number of suits in a standard deck.
pub const NUM_SUITS: u8 = 4;
/// Number of ranks in a standard deck.
pub const NUM_RANKS: u8 = 13;
/// Number of cards in a standard deck.
pub const CARDS_PER_DECK: u8 = NUM_SUITS * NUM_RANKS;

/// The four suits in a standard deck.
///
/// Discriminants are the suit values used by the colour test: the two red
/// suits are even, the two black suits are odd, so two cards are of opposite
/// colour exactly when the sum of their suit values is odd.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Suit {
    Diamonds = 0,
    Clubs = 1,
    Hearts = 2,
    Spades = 3,
}

/// The thirteen ranks in a standard deck, ace low.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(u8)]
pub enum Rank {
    Ace = 0,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King, // 12
}

/// A playing card.
///
/// `rank` and `suit` never change once the deck is built; only `face_up`
/// flips as the card travels between piles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
    pub face_up: bool,
}

impl Card {
    /// Create a new face-down card.
    #[inline]
    pub fn new(suit: Suit, rank: Rank) -> Self {
        Card {
            rank,
            suit,
            face_up: false,
        }
    }

    /// Same card, face-up. Handy for building fixtures.
    #[inline]
    pub fn up(suit: Suit, rank: Rank) -> Self {
        Card {
            rank,
            suit,
            face_up: true,
        }
    }

    /// Canonical identity in 0..=51, ignoring the face flag.
    ///
    /// ```text
    /// index = suit_value * 13 + rank_value
    /// ```
    #[inline]
    pub fn index(self) -> u8 {
        suit_value(self) * NUM_RANKS + rank_value(self)
    }

    #[inline]
    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    #[inline]
    pub fn is_ace(self) -> bool {
        self.rank == Rank::Ace
    }

    /// Short string like "AH", "7C", "10D", "KS".
    pub fn short_str(self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.short_char())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_str())
    }
}

/// Rank projection in 0..=12 (Ace=0, King=12).
#[inline]
pub fn rank_value(card: Card) -> u8 {
    card.rank as u8
}

/// Suit projection in 0..=3 (Diamonds=0, Clubs=1, Hearts=2, Spades=3).
#[inline]
pub fn suit_value(card: Card) -> u8 {
    card.suit as u8
}

/// True if the two cards are of opposite colours.
///
/// Relies on the suit value assignment: reds and blacks have different
/// parity, so an odd sum means one of each.
#[inline]
pub fn colors_differ(a: Card, b: Card) -> bool {
    (suit_value(a) + suit_value(b)) % 2 != 0
}

/// Helper for tableau rules: can `upper` be placed on `lower`?
///
/// In Klondike, this is true if:
/// - `upper` is exactly one rank lower than `lower`, and
/// - `upper` is opposite color from `lower`.
#[inline]
pub fn is_one_lower_opposite_color(upper: Card, lower: Card) -> bool {
    rank_value(upper) + 1 == rank_value(lower) && colors_differ(upper, lower)
}

/// Helper for foundation rules: does `upper` continue the run topped by
/// `lower`? Same suit, exactly one rank higher.
#[inline]
pub fn is_one_higher_same_suit(upper: Card, lower: Card) -> bool {
    rank_value(upper) == rank_value(lower) + 1 && upper.suit == lower.suit
}

impl Suit {
    /// All suits in suit-value order.
    pub const ALL: [Suit; NUM_SUITS as usize] =
        [Suit::Diamonds, Suit::Clubs, Suit::Hearts, Suit::Spades];

    /// Single-character representation: 'D', 'C', 'H', or 'S'.
    #[inline]
    pub fn short_char(self) -> char {
        match self {
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl Rank {
    /// All ranks in a fixed, reproducible order (Ace..King).
    pub const ALL: [Rank; NUM_RANKS as usize] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Display symbol: "A", "2".."10", "J", "Q", "K".
    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// Generate a standard 52-card deck in a fixed order, all face-down.
///
/// Suits follow `Suit::ALL` order, and ranks follow `Rank::ALL` order, so
/// `standard_deck()[i].index() == i`.
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(suit, rank)))
        .collect()
}
