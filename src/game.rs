//! Game-level state: the board, the engine's scratch pile, and the history
//! of applied moves.
//!
//! `GameState` is the single owner of every pile. The presentation layer
//! hands it one command line at a time through `play`, and reads the board
//! back through `tableau()` for drawing.

use tracing::{debug, info};

use crate::command::parse_command;
use crate::deal::Deal;
use crate::error::GameError;
use crate::moves::Move;
use crate::pile::{Pile, PileId};
use crate::stats::Stats;
use crate::tableau::Tableau;

/// Whether the game still accepts commands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameStatus {
    InProgress,
    /// All four foundations are complete. Terminal.
    Won,
}

/// Behaviour switches that do not change the rules themselves.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct GameOptions {
    /// Turn a tableau's newly exposed face-down top card up after a move,
    /// instead of waiting for `ut<k>`.
    pub auto_flip: bool,
}

#[derive(Clone, Debug)]
pub struct GameState {
    tableau: Tableau,
    /// Holding pile for multi-card moves; empty between commands.
    scratch: Pile,
    status: GameStatus,
    options: GameOptions,
    /// Seed of the deal, if this game came from the dealer.
    seed: Option<u64>,
    /// The sequence of moves applied from the initial deal to this position.
    pub moves: Vec<Move>,
    pub stats: Stats,
}

impl GameState {
    /// Shuffle and deal a new game.
    pub fn new(seed: Option<u64>, options: GameOptions) -> Self {
        let deal = Deal::new(seed);
        let seed = deal.seed();
        let mut game = Self::from_tableau(deal.into_tableau(), options);
        game.seed = Some(seed);
        game
    }

    /// Start from an arbitrary board, e.g. one built by hand in a test.
    pub fn from_tableau(tableau: Tableau, options: GameOptions) -> Self {
        let status = if tableau.is_win() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };
        GameState {
            tableau,
            scratch: Pile::new(),
            status,
            options,
            seed: None,
            moves: Vec::new(),
            stats: Stats::default(),
        }
    }

    pub fn tableau(&self) -> &Tableau {
        &self.tableau
    }

    pub fn scratch(&self) -> &Pile {
        &self.scratch
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of moves that have been applied.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Parse and apply one command line.
    ///
    /// Returns the applied move. Any error leaves the board unchanged.
    pub fn play(&mut self, line: &str) -> Result<Move, GameError> {
        if self.is_won() {
            return Err(GameError::GameOver);
        }
        let result = parse_command(line.trim())
            .map_err(GameError::from)
            .and_then(|mv| self.apply_move(mv).map(|()| mv));
        if let Err(e) = &result {
            debug!(line, error = %e, "command rejected");
            self.stats.record_rejected();
        }
        result
    }

    /// Apply an already-parsed move:
    ///   - validate and mutate the board via `Move::apply`
    ///   - append the move to the move history
    ///   - check for the win
    pub fn apply_move(&mut self, mv: Move) -> Result<(), GameError> {
        if self.is_won() {
            return Err(GameError::GameOver);
        }

        let recycles = mv == Move::Deal && self.tableau.stock.is_empty();
        mv.apply(&mut self.tableau, &mut self.scratch)?;
        debug_assert!(self.scratch.is_empty());

        if self.options.auto_flip {
            if let Some(src @ PileId::Tableau(_)) = mv.source() {
                if let Some(top) = self.tableau.pile_mut(src).top_mut() {
                    top.face_up = true;
                }
            }
        }

        info!(%mv, "applied move");
        self.stats.record_applied(&mv, recycles);
        self.moves.push(mv);

        if self.tableau.is_win() {
            info!(moves = self.moves.len(), "game won");
            self.status = GameStatus::Won;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CARDS_PER_DECK, Card, Rank, Suit};
    use crate::error::{ParseError, RuleViolation};

    fn nearly_won() -> Tableau {
        // Everything on the foundations except the king of spades, which
        // sits on the waste.
        let mut tab = Tableau::new_empty();
        for (f, &suit) in tab.foundations.iter_mut().zip(Suit::ALL.iter()) {
            for &rank in Rank::ALL.iter() {
                if !(suit == Suit::Spades && rank == Rank::King) {
                    f.push(Card::up(suit, rank));
                }
            }
        }
        tab.waste.push(Card::up(Suit::Spades, Rank::King));
        tab
    }

    #[test]
    fn fresh_game_from_seed() {
        let mut game = GameState::new(Some(99), GameOptions::default());
        assert_eq!(game.seed(), Some(99));
        assert_eq!(game.status(), GameStatus::InProgress);

        let tab = game.tableau();
        assert_eq!(tab.columns[6].len(), 7);
        assert!(tab.columns[6].top().is_some_and(|c| c.face_up));
        assert_eq!(tab.stock.len(), 24);
        assert!(tab.stock.iter().all(|c| !c.face_up));
        assert!(tab.waste.is_empty());
        assert!(tab.foundations.iter().all(Pile::is_empty));

        let stock_top = tab.stock.top();
        assert_eq!(game.play("d"), Ok(Move::Deal));
        assert_eq!(game.tableau().stock.len(), 23);
        let waste_top = game.tableau().waste.top();
        assert_eq!(waste_top.map(|c| c.index()), stock_top.map(|c| c.index()));
        assert!(waste_top.is_some_and(|c| c.face_up));
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn rejected_commands_leave_the_board_alone() {
        let mut game = GameState::new(Some(5), GameOptions::default());
        let before = game.tableau().clone();

        for line in ["", "zz", "wt9", "t1t1", "7t1t2", "ut07"] {
            assert!(game.play(line).is_err(), "{line:?} should be rejected");
            assert_eq!(game.tableau(), &before);
            assert!(game.scratch().is_empty());
        }
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.stats.moves_rejected, 6);
    }

    #[test]
    fn parse_and_rule_errors_are_distinguished() {
        let mut game = GameState::from_tableau(Tableau::new_empty(), GameOptions::default());
        assert_eq!(
            game.play("q"),
            Err(GameError::Parse(ParseError::UnexpectedChar { ch: 'q', pos: 0 }))
        );
        assert_eq!(game.play("d"), Err(GameError::Rule(RuleViolation::NothingToDeal)));
    }

    #[test]
    fn last_card_wins_and_further_commands_are_refused() {
        let mut game = GameState::from_tableau(nearly_won(), GameOptions::default());
        assert_eq!(game.status(), GameStatus::InProgress);

        game.play("wf4").unwrap();
        assert!(game.is_won());
        assert!(game.tableau().is_cleared());
        assert_eq!(game.tableau().card_count(), CARDS_PER_DECK as usize);

        assert_eq!(game.play("d"), Err(GameError::GameOver));
        assert_eq!(game.play("f4t1"), Err(GameError::GameOver));
    }

    #[test]
    fn auto_flip_exposes_the_next_tableau_card() {
        let mut tab = Tableau::new_empty();
        tab.columns[0].push(Card::new(Suit::Clubs, Rank::Nine));
        tab.columns[0].push(Card::up(Suit::Hearts, Rank::Ace));

        let mut manual = GameState::from_tableau(tab.clone(), GameOptions::default());
        manual.play("t1f1").unwrap();
        assert_eq!(manual.tableau().columns[0].top(), Some(Card::new(Suit::Clubs, Rank::Nine)));
        manual.play("ut1").unwrap();
        assert_eq!(manual.tableau().columns[0].top(), Some(Card::up(Suit::Clubs, Rank::Nine)));

        let mut auto = GameState::from_tableau(tab, GameOptions { auto_flip: true });
        auto.play("t1f1").unwrap();
        assert_eq!(auto.tableau().columns[0].top(), Some(Card::up(Suit::Clubs, Rank::Nine)));
    }
}
