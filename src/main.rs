//! Phonebook - add, filter and delete contacts in the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = phonebook_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
