use clap::Parser;
use nametidy::cli::{self, Cli};
use nametidy::output::OutputFormatter;

fn main() {
    let cli = Cli::parse();

    // Exit codes: 0 clean, 1 violations or failed renames, 2 operational error.
    match cli::run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            OutputFormatter::error(&e);
            std::process::exit(2);
        }
    }
}
