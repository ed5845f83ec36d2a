//! Human-readable rendering of the Klondike board.
//!
//! This module renders a `Tableau` as multi-line text. Face-down cards are
//! shown as a blank placeholder `"[ ]"` and face-up cards with their
//! `short_str()` rank/suit code. Pile labels match the command letters
//! (`t1`..`t7`, `f1`..`f4`, `w`) so the player can read commands off the
//! screen.
//!
//! Nothing here touches game state; it only reads pile snapshots.

use crate::card::Card;
use crate::pile::{NUM_TABLEAUS, PileId};
use crate::stats::Stats;
use crate::tableau::Tableau;

/// Placeholder for a face-down card.
const HIDDEN: &str = "[ ]";

/// Left padding under the row labels.
const GUTTER: &str = "      ";

/// Format a single card for display, honouring its face flag.
pub fn format_card_visible(card: Card) -> String {
    if card.face_up {
        card.short_str()
    } else {
        HIDDEN.to_string()
    }
}

/// Render the foundation row, top card only.
///
///   - Empty foundation: `f1[  ]`
///   - Non-empty: e.g. `f2[7C]`
pub fn render_foundations(tab: &Tableau) -> String {
    let cells: Vec<String> = tab
        .foundations
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let label = PileId::Foundation(i as u8).label();
            match f.top() {
                Some(card) => format!("{label}[{}]", card.short_str()),
                None => format!("{label}[  ]"),
            }
        })
        .collect();
    format!("Foundations: {}", cells.join(" "))
}

/// Render the stock (as a count) and the waste (top card and count).
pub fn render_stock_and_waste(tab: &Tableau) -> String {
    let stock = match tab.stock.len() {
        0 => "Stock: [empty]".to_string(),
        n => format!("Stock: [{n} cards]"),
    };
    let waste = match tab.waste.top() {
        None => "Waste (w): [empty]".to_string(),
        Some(top) => format!("Waste (w): [{}] ({} cards)", top.short_str(), tab.waste.len()),
    };
    format!("{stock}    {waste}")
}

/// Render all tableau columns as a multi-line string.
///
/// Each cell is four characters wide. The columns are **top-justified**:
/// the bottom card of every pile shares the first row, and the lowest
/// non-empty row of a column is its playable card.
pub fn render_columns(tab: &Tableau) -> String {
    let mut s = String::new();

    s.push_str("Tableaus:\n");
    s.push_str(GUTTER);
    for col_idx in 0..NUM_TABLEAUS {
        s.push_str(&format!(" {} ", PileId::Tableau(col_idx as u8).label()));
    }
    s.push('\n');

    let max_height = tab.columns.iter().map(|c| c.len()).max().unwrap_or(0);

    for row in 0..max_height {
        s.push_str(GUTTER);
        for col in &tab.columns {
            match col.cards().get(row) {
                Some(&card) => s.push_str(&format!("{:>3} ", format_card_visible(card))),
                None => s.push_str("    "),
            }
        }
        s.push('\n');
    }

    s
}

/// Render a full board (foundations, stock/waste, and columns).
pub fn render_tableau(tab: &Tableau) -> String {
    let mut s = String::new();
    s.push_str(&render_foundations(tab));
    s.push('\n');
    s.push_str(&render_stock_and_waste(tab));
    s.push_str("\n\n");
    s.push_str(&render_columns(tab));
    s
}

/// Command summary shown at start and on `?`.
pub fn render_help() -> String {
    [
        "Commands:",
        "  d          deal one card from the stock to the waste",
        "  w<dest>    move the waste card, e.g. wt3, wf1",
        "  [n]<src><dest>",
        "             move n cards (default 1), e.g. t1f2, 3t4t6, f1t2",
        "  ut<k>      turn up the top card of tableau k",
        "  ?          show this help",
        "  q          quit",
    ]
    .join("\n")
}

/// One-line session summary.
pub fn render_stats(stats: &Stats) -> String {
    format!(
        "Moves: {}  Rejected: {}  Accepted: {:.0}%  Cards dealt: {}  Stock passes: {}",
        stats.moves_applied,
        stats.moves_rejected,
        stats.acceptance_rate() * 100.0,
        stats.cards_dealt,
        stats.stock_recycles
    )
}
