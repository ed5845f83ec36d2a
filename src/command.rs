//! Command parser: one line of player input -> one `Move`.
//!
//! Grammar (whitespace between tokens is ignored, letters in any case):
//!
//! ```text
//! command    := deal | waste-move | pile-move | turn-up
//! deal       := "d"
//! waste-move := "w" dest
//! pile-move  := [count] source dest
//! turn-up    := "u" "t" tableau-index
//! source     := "f" fnd-index | "t" tableau-index
//! dest       := "f" fnd-index | "t" tableau-index
//! ```
//!
//! Pile indices are a single digit. Only the leading count may run to
//! several digits, and those digits must be adjacent. The whole line must
//! be consumed; anything left over is an error.

use tracing::debug;

use crate::card::CARDS_PER_DECK;
use crate::error::ParseError;
use crate::moves::Move;
use crate::pile::{NUM_FOUNDATIONS, NUM_TABLEAUS, PileId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenKind {
    Letter(char),
    Digit(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    /// Character offset of the token's first character.
    pos: usize,
}

/// Split a line into single letters and single digits.
fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();

    for (pos, ch) in input.chars().enumerate() {
        if ch.is_ascii_whitespace() {
            continue;
        }
        if let Some(digit) = ch.to_digit(10) {
            tokens.push(Token {
                kind: TokenKind::Digit(digit),
                pos,
            });
        } else if ch.is_ascii_alphabetic() {
            tokens.push(Token {
                kind: TokenKind::Letter(ch.to_ascii_lowercase()),
                pos,
            });
        } else {
            return Err(ParseError::UnexpectedChar { ch, pos });
        }
    }

    Ok(tokens)
}

struct Cursor<'a> {
    tokens: &'a [Token],
    next: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Cursor { tokens, next: 0 }
    }

    fn bump(&mut self) -> Result<Token, ParseError> {
        let tok = self
            .tokens
            .get(self.next)
            .copied()
            .ok_or(ParseError::UnexpectedEnd)?;
        self.next += 1;
        Ok(tok)
    }

    fn letter(&mut self, expected: char) -> Result<(), ParseError> {
        match self.bump()? {
            Token {
                kind: TokenKind::Letter(c),
                ..
            } if c == expected => Ok(()),
            tok => Err(unexpected(tok)),
        }
    }

    /// The next token, if it is a digit immediately after `prev`.
    fn adjacent_digit(&self, prev: Token) -> Option<Token> {
        self.tokens
            .get(self.next)
            .copied()
            .filter(|tok| matches!(tok.kind, TokenKind::Digit(_)) && tok.pos == prev.pos + 1)
    }

    /// The leading count: `first` plus any digits written right after it.
    fn count(&mut self, first: Token, value: u32) -> Result<usize, ParseError> {
        let mut value = value;
        let mut prev = first;
        while let Some(tok) = self.adjacent_digit(prev) {
            if let TokenKind::Digit(d) = tok.kind {
                value = value.saturating_mul(10).saturating_add(d);
            }
            self.next += 1;
            prev = tok;
        }
        check_count(value)
    }

    /// A one-digit, 1-based index in `1..=max`, returned 0-based.
    fn index(&mut self, kind: &'static str, max: usize) -> Result<u8, ParseError> {
        match self.bump()? {
            Token {
                kind: TokenKind::Digit(n),
                ..
            } => {
                if n == 0 || n as usize > max {
                    return Err(ParseError::IndexOutOfRange {
                        kind,
                        index: n,
                        max: max as u32,
                    });
                }
                Ok((n - 1) as u8)
            }
            tok => Err(unexpected(tok)),
        }
    }

    /// `"f" fnd-index | "t" tableau-index`
    fn pile_ref(&mut self) -> Result<PileId, ParseError> {
        match self.bump()? {
            Token {
                kind: TokenKind::Letter('f'),
                ..
            } => Ok(PileId::Foundation(self.index("foundation", NUM_FOUNDATIONS)?)),
            Token {
                kind: TokenKind::Letter('t'),
                ..
            } => Ok(PileId::Tableau(self.index("tableau", NUM_TABLEAUS)?)),
            tok => Err(unexpected(tok)),
        }
    }

    fn finish(&self) -> Result<(), ParseError> {
        match self.tokens.get(self.next) {
            Some(tok) => Err(ParseError::TrailingInput { pos: tok.pos }),
            None => Ok(()),
        }
    }
}

fn unexpected(tok: Token) -> ParseError {
    let ch = match tok.kind {
        TokenKind::Letter(c) => c,
        TokenKind::Digit(d) => char::from_digit(d, 10).unwrap_or('0'),
    };
    ParseError::UnexpectedChar { ch, pos: tok.pos }
}

fn check_count(n: u32) -> Result<usize, ParseError> {
    match n {
        0 => Err(ParseError::ZeroCount),
        n if n > CARDS_PER_DECK as u32 => Err(ParseError::CountTooLarge),
        n => Ok(n as usize),
    }
}

/// Parse one command line into a `Move`.
///
/// Pure: no game state is consulted. Rule checks happen later in the engine.
pub fn parse_command(input: &str) -> Result<Move, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut cur = Cursor::new(&tokens);
    let first = cur.bump()?;
    let mv = match first.kind {
        TokenKind::Letter('d') => Move::Deal,
        TokenKind::Letter('w') => Move::WasteMove {
            dest: cur.pile_ref()?,
        },
        TokenKind::Letter('u') => {
            cur.letter('t')?;
            Move::TurnUp {
                column: cur.index("tableau", NUM_TABLEAUS)?,
            }
        }
        TokenKind::Letter('f') | TokenKind::Letter('t') => {
            // Re-read the source letter as part of a pile reference.
            cur = Cursor::new(&tokens);
            let src = cur.pile_ref()?;
            let dest = cur.pile_ref()?;
            Move::PileMove {
                src,
                dest,
                count: 1,
            }
        }
        TokenKind::Digit(d) => {
            let count = cur.count(first, d)?;
            let src = cur.pile_ref()?;
            let dest = cur.pile_ref()?;
            Move::PileMove { src, dest, count }
        }
        TokenKind::Letter(_) => return Err(unexpected(first)),
    };
    cur.finish()?;

    debug!(input, ?mv, "parsed command");
    Ok(mv)
}
