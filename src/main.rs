//! confkit binary entry point

use std::process;

fn main() {
    if let Err(e) = confkit::cli::run_cli() {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
