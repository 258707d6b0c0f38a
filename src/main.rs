use std::process::ExitCode;

use todos::cli::handlers::NotFound;

fn main() -> ExitCode {
    if let Err(err) = todos::run() {
        eprintln!("error: {err:#}");
        if err.downcast_ref::<NotFound>().is_some() {
            return ExitCode::from(2);
        }
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
