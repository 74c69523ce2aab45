#![forbid(unsafe_code)]

use std::process::ExitCode;

fn main() -> ExitCode {
    match lapline_app::run_from_env() {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("lapline: {error}");
            ExitCode::from(u8::try_from(error.exit_code()).unwrap_or(1))
        }
    }
}
