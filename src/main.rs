#[macro_use]
extern crate rocket;

use clap::Parser;

use ledger_issuance::{initialize_rocket, setup_tracing, Config};

#[launch]
fn rocket() -> _ {
    let config = Config::parse();
    setup_tracing(config.log_level);

    initialize_rocket(config).unwrap_or_else(|e| {
        eprintln!("Failed to initialize server: {e}");
        std::process::exit(1);
    })
}
