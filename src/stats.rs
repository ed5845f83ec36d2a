use crate::moves::Move;

/// Per-session counters, shown when the player quits or wins.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub moves_applied: u64,
    pub moves_rejected: u64,
    pub cards_dealt: u64,
    pub stock_recycles: u64,
}

impl Stats {
    pub fn record_applied(&mut self, mv: &Move, recycled: bool) {
        self.moves_applied += 1;
        if *mv == Move::Deal {
            self.cards_dealt += 1;
            if recycled {
                self.stock_recycles += 1;
            }
        }
    }

    pub fn record_rejected(&mut self) {
        self.moves_rejected += 1;
    }

    /// Share of commands that were accepted, in 0.0..=1.0.
    pub fn acceptance_rate(&self) -> f64 {
        let total = self.moves_applied + self.moves_rejected;
        if total == 0 {
            0.0
        } else {
            self.moves_applied as f64 / total as f64
        }
    }
}
