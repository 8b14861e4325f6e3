use std::process::ExitCode;
use std::sync::Arc;

use tweet_explorer::data::loader::load_file;
use tweet_explorer::AppConfig;

fn main() -> ExitCode {
    env_logger::init();

    let config = AppConfig::from_env();

    // Nothing is shown unless the dataset loads in full.
    let dataset = match load_file(&config.data_path) {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            eprintln!("error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match tweet_explorer::run(config, dataset) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI terminated with error: {e}");
            ExitCode::FAILURE
        }
    }
}
