//! Move representation and the move engine for Klondike (draw-1, unlimited
//! redeals).
//!
//! This module defines the `Move` type produced by the command parser, the
//! placement rules for each destination kind, and `Move::apply`, which
//! validates a move against the current `Tableau` and mutates it only when
//! the move is legal. A rejected move leaves every pile exactly as it was.

use core::fmt;

use tracing::debug;

use crate::card::{Card, is_one_higher_same_suit, is_one_lower_opposite_color};
use crate::error::RuleViolation;
use crate::pile::{Pile, PileId};
use crate::tableau::Tableau;

/// One player command, already resolved to concrete piles.
///
/// Tableau and foundation indices inside `PileId` are 0-based; they are
/// printed 1-based when shown to a human.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Draw one card from the stock onto the waste, recycling the waste
    /// into the stock first if the stock is empty.
    Deal,

    /// Move the top card of the waste to a tableau or foundation.
    WasteMove { dest: PileId },

    /// Move `count` cards as a block from a tableau or foundation to a
    /// tableau or foundation. A move from or to a foundation always moves
    /// one card.
    PileMove {
        src: PileId,
        dest: PileId,
        count: usize,
    },

    /// Turn the top card of a tableau column face-up.
    TurnUp { column: u8 },
}

// ----- Placement rules -----

/// Can `card` be placed on the tableau pile `dest`?
///
/// Legal when `card` is one rank below the destination top and of the
/// opposite colour, or when the destination is empty and `card` is a king.
pub fn can_place_on_tableau(card: Card, dest_id: PileId, dest: &Pile) -> Result<(), RuleViolation> {
    match dest.top() {
        None if card.is_king() => Ok(()),
        None => Err(RuleViolation::NotOnEmptyTableau(card)),
        Some(onto) if !onto.face_up => Err(RuleViolation::FaceDownDestination(dest_id)),
        Some(onto) if is_one_lower_opposite_color(card, onto) => Ok(()),
        Some(onto) => Err(RuleViolation::TableauMismatch { card, onto }),
    }
}

/// Can `card` be placed on the foundation pile `dest`?
///
/// Legal when the foundation is empty and `card` is an ace, or when `card`
/// is the next rank of the same suit as the foundation top.
pub fn can_move_to_foundation(card: Card, dest: &Pile) -> Result<(), RuleViolation> {
    match dest.top() {
        None if card.is_ace() => Ok(()),
        None => Err(RuleViolation::NotAnAce(card)),
        Some(onto) if is_one_higher_same_suit(card, onto) => Ok(()),
        Some(onto) => Err(RuleViolation::FoundationMismatch { card, onto }),
    }
}

/// Dispatch on destination kind. The stock and the waste are only filled
/// by dealing and recycling, never by a player move.
fn check_placement(card: Card, dest_id: PileId, dest: &Pile) -> Result<(), RuleViolation> {
    let verdict = match dest_id {
        PileId::Tableau(_) => can_place_on_tableau(card, dest_id, dest),
        PileId::Foundation(_) => can_move_to_foundation(card, dest),
        PileId::Waste | PileId::Stock => Err(RuleViolation::InvalidDestination(dest_id)),
    };
    debug!(%card, dest = %dest_id, ok = verdict.is_ok(), "placement check");
    verdict
}

/// The playable card of `src`: its top, which must exist and be face-up.
fn playable_top(tab: &Tableau, src: PileId) -> Result<Card, RuleViolation> {
    let card = tab.pile(src).top().ok_or(RuleViolation::EmptySource(src))?;
    if !card.face_up {
        return Err(RuleViolation::FaceDownSource(src));
    }
    Ok(card)
}

// ----- Stock handling -----

/// Turn the whole waste back into the stock.
///
/// Cards are popped off the waste and pushed onto the stock one at a time,
/// face-down, so the stock is the waste reversed and the next pass draws
/// cards in the same order as the last one.
pub fn recycle_waste(tab: &mut Tableau) {
    debug_assert!(tab.stock.is_empty());
    let n = tab.waste.len();
    while let Some(mut card) = tab.waste.pop() {
        card.face_up = false;
        tab.stock.push(card);
    }
    debug!(cards = n, "recycled waste into stock");
}

fn deal_one(tab: &mut Tableau) -> Result<(), RuleViolation> {
    if tab.stock.is_empty() {
        if tab.waste.is_empty() {
            return Err(RuleViolation::NothingToDeal);
        }
        recycle_waste(tab);
    }

    let Some(mut card) = tab.stock.pop() else {
        return Err(RuleViolation::NothingToDeal);
    };
    if let Some(prev) = tab.waste.top_mut() {
        prev.face_up = false;
    }
    card.face_up = true;
    tab.waste.push(card);
    Ok(())
}

// ----- Card transfers -----

fn move_waste_top(tab: &mut Tableau, dest: PileId) -> Result<(), RuleViolation> {
    if dest == PileId::Waste {
        return Err(RuleViolation::SamePile(dest));
    }
    let card = playable_top(tab, PileId::Waste)?;
    check_placement(card, dest, tab.pile(dest))?;

    if let Some(card) = tab.waste.pop() {
        tab.pile_mut(dest).push(card);
    }
    // The card underneath was turned down when it was covered.
    if let Some(next) = tab.waste.top_mut() {
        next.face_up = true;
    }
    Ok(())
}

/// Move a block of `count` cards from `src` to `dest`, via `scratch`.
///
/// The block is popped onto the scratch pile, which reverses it so the
/// block's bottom card ends up on top of the scratch pile. That card is
/// checked against the destination; the rest of the block follows it
/// unchecked, because a tableau's face-up run is already well-formed. If the
/// check fails, the block goes back onto the source in its original order.
fn move_block(
    tab: &mut Tableau,
    scratch: &mut Pile,
    src: PileId,
    dest: PileId,
    count: usize,
) -> Result<(), RuleViolation> {
    if src == dest {
        return Err(RuleViolation::SamePile(src));
    }
    playable_top(tab, src)?;

    // A foundation only ever gives or takes one card at a time.
    let count = match (src, dest) {
        (PileId::Foundation(_), _) | (_, PileId::Foundation(_)) => 1,
        _ => count,
    };
    let available = tab.pile(src).len();
    if count > available {
        return Err(RuleViolation::NotEnoughCards {
            pile: src,
            requested: count,
            available,
        });
    }

    debug_assert!(scratch.is_empty(), "scratch pile must start empty");
    let source = tab.pile_mut(src);
    for _ in 0..count {
        if let Some(card) = source.pop() {
            scratch.push(card);
        }
    }

    let verdict = match scratch.top() {
        Some(bottom) => check_placement(bottom, dest, tab.pile(dest)),
        None => Err(RuleViolation::EmptySource(src)),
    };

    let target = match verdict {
        Ok(()) => dest,
        Err(_) => src,
    };
    let pile = tab.pile_mut(target);
    while let Some(card) = scratch.pop() {
        pile.push(card);
    }
    debug_assert!(scratch.is_empty(), "scratch pile must end empty");
    verdict
}

fn turn_up(tab: &mut Tableau, column: u8) -> Result<(), RuleViolation> {
    let id = PileId::Tableau(column);
    let top = tab
        .pile_mut(id)
        .top_mut()
        .ok_or(RuleViolation::EmptyTableau(id))?;
    top.face_up = true;
    Ok(())
}

// ----- Applying a move -----

impl Move {
    /// Validate this move against `tab` and apply it.
    ///
    /// On `Err` no pile has changed. `scratch` is the engine's holding pile
    /// for multi-card moves; it is empty before and after every call.
    pub fn apply(&self, tab: &mut Tableau, scratch: &mut Pile) -> Result<(), RuleViolation> {
        match *self {
            Move::Deal => deal_one(tab),
            Move::WasteMove { dest } => move_waste_top(tab, dest),
            Move::PileMove { src, dest, count } => move_block(tab, scratch, src, dest, count),
            Move::TurnUp { column } => turn_up(tab, column),
        }
    }

    /// The pile cards were taken from, if any.
    pub fn source(&self) -> Option<PileId> {
        match *self {
            Move::Deal => Some(PileId::Stock),
            Move::WasteMove { .. } => Some(PileId::Waste),
            Move::PileMove { src, .. } => Some(src),
            Move::TurnUp { .. } => None,
        }
    }

    /// Render a move as a human-readable string.
    pub fn describe(&self) -> String {
        match *self {
            Move::Deal => "Deal from Stock".to_string(),
            Move::WasteMove { dest } => format!("Waste -> {dest}"),
            Move::PileMove { src, dest, count } if count > 1 => {
                format!("{src}: {count} cards -> {dest}")
            }
            Move::PileMove { src, dest, .. } => format!("{src} -> {dest}"),
            Move::TurnUp { column } => format!("Turn up {}", PileId::Tableau(column)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// ----- Tests -----

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};

    fn up(suit: Suit, rank: Rank) -> Card {
        Card::up(suit, rank)
    }

    fn down(suit: Suit, rank: Rank) -> Card {
        Card::new(suit, rank)
    }

    fn apply(tab: &mut Tableau, mv: Move) -> Result<(), RuleViolation> {
        let mut scratch = Pile::new();
        let result = mv.apply(tab, &mut scratch);
        assert!(scratch.is_empty(), "scratch pile left non-empty by {mv:?}");
        result
    }

    #[test]
    fn deal_moves_stock_top_to_waste_face_up() {
        let mut tab = Tableau::new_empty();
        tab.stock.push(down(Suit::Clubs, Rank::Two));
        tab.stock.push(down(Suit::Hearts, Rank::Nine));

        apply(&mut tab, Move::Deal).unwrap();
        assert_eq!(tab.stock.len(), 1);
        assert_eq!(tab.waste.top(), Some(up(Suit::Hearts, Rank::Nine)));

        apply(&mut tab, Move::Deal).unwrap();
        assert!(tab.stock.is_empty());
        assert_eq!(
            tab.waste.cards(),
            &[down(Suit::Hearts, Rank::Nine), up(Suit::Clubs, Rank::Two)],
            "previous waste top turns face-down"
        );
    }

    #[test]
    fn deal_from_empty_stock_recycles_waste_in_draw_order() {
        let mut tab = Tableau::new_empty();
        let first = down(Suit::Spades, Rank::Four);
        let second = down(Suit::Diamonds, Rank::Jack);
        let third = down(Suit::Clubs, Rank::Queen);
        tab.stock = Pile::from_cards(vec![third, second, first]);

        for _ in 0..3 {
            apply(&mut tab, Move::Deal).unwrap();
        }
        assert!(tab.stock.is_empty());

        // Stock is empty: the waste goes back, then the first card is drawn again.
        apply(&mut tab, Move::Deal).unwrap();
        assert_eq!(tab.waste.cards(), &[up(Suit::Spades, Rank::Four)]);
        assert_eq!(tab.stock.cards(), &[third, second]);
        assert!(tab.stock.iter().all(|c| !c.face_up));
    }

    #[test]
    fn deal_with_nothing_left_is_rejected() {
        let mut tab = Tableau::new_empty();
        assert_eq!(apply(&mut tab, Move::Deal), Err(RuleViolation::NothingToDeal));
        assert_eq!(tab, Tableau::new_empty());
    }

    #[test]
    fn waste_to_tableau_needs_opposite_colour_one_lower() {
        // 5H onto 6S succeeds.
        let mut tab = Tableau::new_empty();
        tab.waste.push(up(Suit::Hearts, Rank::Five));
        tab.columns[2].push(up(Suit::Spades, Rank::Six));
        apply(&mut tab, Move::WasteMove { dest: PileId::Tableau(2) }).unwrap();
        assert!(tab.waste.is_empty());
        assert_eq!(tab.columns[2].top(), Some(up(Suit::Hearts, Rank::Five)));

        // 5H onto 6H is the same colour.
        let mut tab = Tableau::new_empty();
        tab.waste.push(up(Suit::Hearts, Rank::Five));
        tab.columns[2].push(up(Suit::Hearts, Rank::Six));
        let before = tab.clone();
        assert_eq!(
            apply(&mut tab, Move::WasteMove { dest: PileId::Tableau(2) }),
            Err(RuleViolation::TableauMismatch {
                card: up(Suit::Hearts, Rank::Five),
                onto: up(Suit::Hearts, Rank::Six),
            })
        );
        assert_eq!(tab, before);
    }

    #[test]
    fn waste_move_turns_up_the_next_waste_card() {
        let mut tab = Tableau::new_empty();
        tab.waste.push(down(Suit::Clubs, Rank::Nine));
        tab.waste.push(up(Suit::Diamonds, Rank::Ace));
        apply(&mut tab, Move::WasteMove { dest: PileId::Foundation(0) }).unwrap();
        assert_eq!(tab.waste.top(), Some(up(Suit::Clubs, Rank::Nine)));
    }

    #[test]
    fn empty_foundation_takes_only_an_ace() {
        let mut tab = Tableau::new_empty();
        tab.waste.push(up(Suit::Hearts, Rank::Two));
        assert_eq!(
            apply(&mut tab, Move::WasteMove { dest: PileId::Foundation(0) }),
            Err(RuleViolation::NotAnAce(up(Suit::Hearts, Rank::Two)))
        );

        let mut tab = Tableau::new_empty();
        tab.waste.push(up(Suit::Hearts, Rank::Ace));
        apply(&mut tab, Move::WasteMove { dest: PileId::Foundation(0) }).unwrap();
        assert_eq!(tab.foundations[0].len(), 1);
    }

    #[test]
    fn foundation_builds_same_suit_upwards() {
        let mut tab = Tableau::new_empty();
        tab.foundations[1].push(up(Suit::Clubs, Rank::Ace));
        tab.columns[0].push(up(Suit::Spades, Rank::Two));
        tab.columns[1].push(up(Suit::Clubs, Rank::Two));

        let to_f2 = |col| Move::PileMove {
            src: PileId::Tableau(col),
            dest: PileId::Foundation(1),
            count: 1,
        };
        assert!(matches!(
            apply(&mut tab, to_f2(0)),
            Err(RuleViolation::FoundationMismatch { .. })
        ));
        apply(&mut tab, to_f2(1)).unwrap();
        assert_eq!(tab.foundations[1].len(), 2);
    }

    #[test]
    fn only_a_king_goes_on_an_empty_tableau() {
        let mut tab = Tableau::new_empty();
        tab.columns[0].push(up(Suit::Hearts, Rank::Queen));
        tab.columns[1].push(up(Suit::Spades, Rank::King));

        let mv = |src| Move::PileMove {
            src: PileId::Tableau(src),
            dest: PileId::Tableau(4),
            count: 1,
        };
        assert_eq!(
            apply(&mut tab, mv(0)),
            Err(RuleViolation::NotOnEmptyTableau(up(Suit::Hearts, Rank::Queen)))
        );
        apply(&mut tab, mv(1)).unwrap();
        assert_eq!(tab.columns[4].top(), Some(up(Suit::Spades, Rank::King)));
    }

    #[test]
    fn block_bottom_is_checked_against_destination() {
        // Tableau 2 = [KH(down), 7S(up)], tableau 5 empty: "2t2t5".
        let mut tab = Tableau::new_empty();
        tab.columns[1].push(down(Suit::Hearts, Rank::King));
        tab.columns[1].push(up(Suit::Spades, Rank::Seven));

        apply(
            &mut tab,
            Move::PileMove {
                src: PileId::Tableau(1),
                dest: PileId::Tableau(4),
                count: 2,
            },
        )
        .unwrap();

        assert!(tab.columns[1].is_empty());
        assert_eq!(
            tab.columns[4].cards(),
            &[down(Suit::Hearts, Rank::King), up(Suit::Spades, Rank::Seven)]
        );
    }

    #[test]
    fn failed_block_move_rolls_back_exactly() {
        let mut tab = Tableau::new_empty();
        tab.columns[0].push(down(Suit::Clubs, Rank::Three));
        tab.columns[0].push(up(Suit::Hearts, Rank::Nine));
        tab.columns[0].push(up(Suit::Spades, Rank::Eight));
        tab.columns[0].push(up(Suit::Diamonds, Rank::Seven));
        tab.columns[3].push(up(Suit::Hearts, Rank::Ten));
        let before = tab.clone();

        // Block bottom 9H cannot go on 10H.
        let mv = Move::PileMove {
            src: PileId::Tableau(0),
            dest: PileId::Tableau(3),
            count: 3,
        };
        assert!(matches!(
            apply(&mut tab, mv),
            Err(RuleViolation::TableauMismatch { .. })
        ));
        assert_eq!(tab, before);

        // Same block onto a black ten works and keeps its order.
        tab.columns[5].push(up(Suit::Clubs, Rank::Ten));
        apply(
            &mut tab,
            Move::PileMove {
                src: PileId::Tableau(0),
                dest: PileId::Tableau(5),
                count: 3,
            },
        )
        .unwrap();
        assert_eq!(
            tab.columns[5].cards(),
            &[
                up(Suit::Clubs, Rank::Ten),
                up(Suit::Hearts, Rank::Nine),
                up(Suit::Spades, Rank::Eight),
                up(Suit::Diamonds, Rank::Seven),
            ]
        );
        assert_eq!(tab.columns[0].cards(), &[down(Suit::Clubs, Rank::Three)]);
    }

    #[test]
    fn foundation_destination_moves_a_single_card() {
        let mut tab = Tableau::new_empty();
        tab.columns[0].push(up(Suit::Hearts, Rank::Two));
        tab.columns[0].push(up(Suit::Spades, Rank::Ace));

        apply(
            &mut tab,
            Move::PileMove {
                src: PileId::Tableau(0),
                dest: PileId::Foundation(3),
                count: 2,
            },
        )
        .unwrap();
        assert_eq!(tab.foundations[3].cards(), &[up(Suit::Spades, Rank::Ace)]);
        assert_eq!(tab.columns[0].cards(), &[up(Suit::Hearts, Rank::Two)]);
    }

    #[test]
    fn foundation_source_gives_a_single_card() {
        let mut tab = Tableau::new_empty();
        for rank in [Rank::Ace, Rank::Two, Rank::Three] {
            tab.foundations[2].push(up(Suit::Hearts, rank));
        }
        tab.columns[0].push(up(Suit::Spades, Rank::Four));

        apply(
            &mut tab,
            Move::PileMove {
                src: PileId::Foundation(2),
                dest: PileId::Tableau(0),
                count: 3,
            },
        )
        .unwrap();
        assert_eq!(tab.foundations[2].len(), 2);
        assert_eq!(
            tab.columns[0].cards(),
            &[up(Suit::Spades, Rank::Four), up(Suit::Hearts, Rank::Three)]
        );
    }

    #[test]
    fn source_preconditions_are_rule_violations() {
        let mut tab = Tableau::new_empty();
        tab.columns[0].push(down(Suit::Spades, Rank::King));
        tab.columns[1].push(up(Suit::Hearts, Rank::King));

        let mv = |src, dest, count| Move::PileMove { src, dest, count };
        assert_eq!(
            apply(&mut tab, mv(PileId::Tableau(2), PileId::Tableau(3), 1)),
            Err(RuleViolation::EmptySource(PileId::Tableau(2)))
        );
        assert_eq!(
            apply(&mut tab, mv(PileId::Tableau(0), PileId::Tableau(3), 1)),
            Err(RuleViolation::FaceDownSource(PileId::Tableau(0)))
        );
        assert_eq!(
            apply(&mut tab, mv(PileId::Tableau(1), PileId::Tableau(3), 2)),
            Err(RuleViolation::NotEnoughCards {
                pile: PileId::Tableau(1),
                requested: 2,
                available: 1,
            })
        );
        assert_eq!(
            apply(&mut tab, mv(PileId::Tableau(1), PileId::Tableau(1), 1)),
            Err(RuleViolation::SamePile(PileId::Tableau(1)))
        );
    }

    #[test]
    fn nothing_goes_on_a_face_down_tableau_top() {
        let mut tab = Tableau::new_empty();
        tab.columns[0].push(down(Suit::Spades, Rank::Eight));
        tab.waste.push(up(Suit::Hearts, Rank::Seven));
        assert_eq!(
            apply(&mut tab, Move::WasteMove { dest: PileId::Tableau(0) }),
            Err(RuleViolation::FaceDownDestination(PileId::Tableau(0)))
        );
    }

    #[test]
    fn stock_and_waste_never_take_played_cards() {
        let mut tab = Tableau::new_empty();
        tab.stock.push(down(Suit::Clubs, Rank::Four));
        tab.waste.push(up(Suit::Hearts, Rank::Two));
        tab.columns[0].push(up(Suit::Clubs, Rank::Nine));
        let before = tab.clone();

        assert_eq!(
            apply(&mut tab, Move::WasteMove { dest: PileId::Stock }),
            Err(RuleViolation::InvalidDestination(PileId::Stock))
        );
        assert_eq!(tab, before);

        for dest in [PileId::Waste, PileId::Stock] {
            let mv = Move::PileMove {
                src: PileId::Tableau(0),
                dest,
                count: 1,
            };
            assert_eq!(apply(&mut tab, mv), Err(RuleViolation::InvalidDestination(dest)));
            assert_eq!(tab, before);
        }
    }

    #[test]
    fn turn_up_flips_the_top_card_unconditionally() {
        let mut tab = Tableau::new_empty();
        tab.columns[3].push(down(Suit::Clubs, Rank::Four));
        apply(&mut tab, Move::TurnUp { column: 3 }).unwrap();
        assert_eq!(tab.columns[3].top(), Some(up(Suit::Clubs, Rank::Four)));

        // Turning up an already face-up card is accepted and changes nothing.
        apply(&mut tab, Move::TurnUp { column: 3 }).unwrap();
        assert_eq!(tab.columns[3].top(), Some(up(Suit::Clubs, Rank::Four)));

        assert_eq!(
            apply(&mut tab, Move::TurnUp { column: 0 }),
            Err(RuleViolation::EmptyTableau(PileId::Tableau(0)))
        );
    }

    #[test]
    fn foundation_card_can_come_back_to_a_tableau() {
        let mut tab = Tableau::new_empty();
        tab.foundations[0].push(up(Suit::Diamonds, Rank::Ace));
        tab.foundations[0].push(up(Suit::Diamonds, Rank::Two));
        tab.columns[6].push(up(Suit::Clubs, Rank::Three));

        apply(
            &mut tab,
            Move::PileMove {
                src: PileId::Foundation(0),
                dest: PileId::Tableau(6),
                count: 1,
            },
        )
        .unwrap();
        assert_eq!(tab.columns[6].top(), Some(up(Suit::Diamonds, Rank::Two)));
        assert_eq!(tab.foundations[0].len(), 1);
    }

    #[test]
    fn describe_uses_one_based_names() {
        let mv = Move::PileMove {
            src: PileId::Tableau(1),
            dest: PileId::Tableau(4),
            count: 2,
        };
        assert_eq!(mv.describe(), "Tableau 2: 2 cards -> Tableau 5");
        assert_eq!(
            Move::WasteMove { dest: PileId::Foundation(0) }.to_string(),
            "Waste -> Foundation 1"
        );
        assert_eq!(Move::TurnUp { column: 6 }.to_string(), "Turn up Tableau 7");
    }
}
