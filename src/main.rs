//! devlog binary entry point.

use std::process::ExitCode;

use devchangelog::ui::output;

fn main() -> ExitCode {
    match devchangelog::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
