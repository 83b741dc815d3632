use std::process::ExitCode;

use pocket_shell::config::{Config, ConfigLoader};
use pocket_shell::repl;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = load_config();
    match repl::run(&config) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("pocket-shell: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Config {
    let Some(path) = ConfigLoader::rc_path() else {
        return ConfigLoader::default_config();
    };
    if !path.exists() {
        return ConfigLoader::default_config();
    }
    match ConfigLoader::load_from_file(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("ignoring {}: {}", path.display(), err);
            ConfigLoader::default_config()
        }
    }
}
