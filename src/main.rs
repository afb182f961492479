use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let dataset = std::env::args_os().nth(1).map(PathBuf::from);
    match rxradar_lib::run(dataset.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("rxradar: {e}");
            ExitCode::FAILURE
        }
    }
}
