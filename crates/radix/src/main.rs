#![forbid(unsafe_code)]

//! radix binary.
//!
//! ```sh
//! cargo run -p radix
//! RADIX_START_BASE=hex RADIX_CURSOR=static cargo run -p radix
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    match radix::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
