use std::process::ExitCode;

fn main() -> ExitCode {
    // `.env` may carry RUST_LOG; load it before the logger reads the environment.
    dotenvy::dotenv().ok();
    env_logger::init();

    match mortgage_equity::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("exiting with {err:?}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
