use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::{env, fmt};

use crate::lexer::{Lexer, Token};

const RC_FILE: &str = ".pocketshellrc";

#[derive(Debug, Clone)]
pub struct Config {
    pub prompt: String,
    /// Alias name to replacement words; applied once per command, after
    /// parsing and before classification.
    pub aliases: HashMap<String, Vec<String>>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "$ ".to_string(),
            aliases: HashMap::new(),
        }
    }

    /// Location of the user's rc file, when a home directory is known.
    pub fn rc_path() -> Option<std::path::PathBuf> {
        env::var_os("HOME").map(|home| Path::new(&home).join(RC_FILE))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path).map_err(ConfigError::Io)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(ConfigError::Io)?;
            src.push_str(&line);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut prompt = None;
        let mut aliases = HashMap::new();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!(
                    "line {}: no '=' found: {}",
                    lineno + 1,
                    line
                )));
            };
            let key = key.trim();

            match key {
                "prompt" => prompt = Some(value.to_string()),
                k if k.starts_with("alias.") => {
                    let alias = k.trim_start_matches("alias.").to_string();
                    aliases.insert(alias, Self::alias_words(lineno, value)?);
                }
                _ => {
                    return Err(ConfigError::Parse(format!(
                        "line {}: unknown key: {}",
                        lineno + 1,
                        key
                    )));
                }
            }
        }

        let default = Self::default_config();
        Ok(Config {
            prompt: prompt.unwrap_or(default.prompt),
            aliases,
        })
    }

    // Alias values go through the shell lexer so quoting works, but they may
    // only expand to plain words.
    fn alias_words(lineno: usize, value: &str) -> Result<Vec<String>, ConfigError> {
        let tokens = Lexer::new(value).tokenize().map_err(|e| {
            ConfigError::Parse(format!("line {}: bad alias value: {}", lineno + 1, e))
        })?;
        if tokens.is_empty() || !tokens.iter().all(Token::is_word) {
            return Err(ConfigError::Parse(format!(
                "line {}: alias must expand to plain words",
                lineno + 1
            )));
        }
        Ok(tokens.into_iter().map(|t| t.value).collect())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(_) => None,
        }
    }
}
