use std::process::ExitCode;

use rsegments::{Config, run_configured};

fn main() -> ExitCode {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

  match run_configured(&Config::default()) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      log::error!("{}", err);
      ExitCode::FAILURE
    }
  }
}
