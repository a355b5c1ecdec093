//! Address Book - interactive personal contact manager

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = address_book::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
