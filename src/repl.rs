use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::config::Config;
use crate::error::ShellError;
use crate::executor::{DefaultExecutor, ExecStatus, Executor};
use crate::lexer::Lexer;
use crate::parser::{DefaultParser, ParsedCommand};
use crate::session::ShellSession;

/// Plain blocking read-eval loop. Returns the status to exit the process
/// with: the `exit` builtin's argument, or 0 on end of input.
pub fn run(config: &Config) -> rustyline::Result<i32> {
    let mut editor = DefaultEditor::new()?;
    let mut executor = DefaultExecutor::new();
    let names: Vec<&'static str> = executor.builtin_names().collect();
    let mut session = ShellSession::new(names)?;

    loop {
        let line = match editor.readline(&config.prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(0),
            Err(err) => return Err(err),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(line)?;

        match eval(line, config, &mut executor, &mut session) {
            Ok(ExecStatus::Code(code)) => debug!("command finished with status {}", code),
            Ok(ExecStatus::Exit(code)) => return Ok(code),
            // All user-facing messages share the output stream with normal
            // command output.
            Err(err) => println!("{}", err),
        }
    }
}

fn eval(
    line: &str,
    config: &Config,
    executor: &mut DefaultExecutor,
    session: &mut ShellSession,
) -> Result<ExecStatus, ShellError> {
    let tokens = Lexer::new(line).tokenize()?;
    debug!("tokens: {:?}", tokens);
    let command = expand_alias(config, DefaultParser::new(&tokens).parse()?);
    Ok(executor.exec(&command, session)?)
}

// One substitution, no recursion. The loader guarantees alias word lists
// are non-empty.
fn expand_alias(config: &Config, mut command: ParsedCommand) -> ParsedCommand {
    if let Some(words) = config.aliases.get(&command.name) {
        debug!("alias {} expands to {:?}", command.name, words);
        let mut args = words[1..].to_vec();
        args.append(&mut command.args);
        command.name = words[0].clone();
        command.args = args;
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::parser::RedirectionSet;

    fn parsed(name: &str, args: &[&str]) -> ParsedCommand {
        ParsedCommand {
            name: name.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            redirections: RedirectionSet::default(),
        }
    }

    #[test]
    fn test_alias_expansion_prepends_its_words() {
        let config = ConfigLoader::load_from_str("alias.ll=ls -l\n").unwrap();
        let command = expand_alias(&config, parsed("ll", &["src"]));
        assert_eq!(command.name, "ls");
        assert_eq!(command.args, vec!["-l", "src"]);
    }

    #[test]
    fn test_unaliased_commands_pass_through() {
        let config = ConfigLoader::default_config();
        let command = expand_alias(&config, parsed("ls", &["-a"]));
        assert_eq!(command.name, "ls");
        assert_eq!(command.args, vec!["-a"]);
    }
}
