pub mod card;
pub mod command;
pub mod config;
pub mod deal;
pub mod display;
pub mod error;
pub mod game;
pub mod logging;
pub mod moves;
pub mod pile;
pub mod stats;
pub mod tableau;

use std::io::{self, BufRead, Write};

use tracing::info;

use crate::config::Config;
use crate::display::{render_help, render_stats, render_tableau};
use crate::game::GameState;
use crate::stats::Stats;

/// How a session ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Won,
    Quit,
    /// Input ran out before a win or a quit.
    EndOfInput,
}

/// Entry point for the `klondike` binary: play one game on stdin/stdout.
pub fn run(config: &Config) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let (end, stats) = play_session(config, stdin.lock(), stdout.lock())?;
    info!(?end, moves = stats.moves_applied, "session finished");
    Ok(())
}

/// The presentation loop: draw the board, read a line, hand it to the game.
///
/// A line starting with `q` ends the session; `?` or `h` prints the
/// command summary. Every other line goes to `GameState::play`, and a
/// rejection is reported without ending the session.
pub fn play_session<R: BufRead, W: Write>(
    config: &Config,
    input: R,
    mut out: W,
) -> io::Result<(SessionEnd, Stats)> {
    let mut game = GameState::new(config.seed, config.game_options());

    if let Some(seed) = game.seed() {
        writeln!(out, "Game seed: {seed} (replay with --seed {seed})")?;
    }
    if !config.no_banner {
        writeln!(out, "{}", render_help())?;
    }
    writeln!(out)?;
    write!(out, "{}", render_tableau(game.tableau()))?;

    let mut lines = input.lines();
    let end = loop {
        write!(out, ":")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            break SessionEnd::EndOfInput;
        };
        let line = line.trim();

        if line.starts_with('q') {
            break SessionEnd::Quit;
        }
        if line == "?" || line == "h" {
            writeln!(out, "{}", render_help())?;
            continue;
        }

        match game.play(line) {
            Ok(mv) => writeln!(out, "{mv}")?,
            Err(e) => writeln!(out, "{e}")?,
        }
        write!(out, "{}", render_tableau(game.tableau()))?;

        if game.is_won() {
            writeln!(out, "You won in {} moves!", game.move_count())?;
            break SessionEnd::Won;
        }
    };

    writeln!(out, "{}", render_stats(&game.stats))?;
    Ok((end, game.stats.clone()))
}
