use clap::Parser;

use klondike_term::config::Config;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    klondike_term::logging::init(config.log_filter());
    klondike_term::run(&config)
}
