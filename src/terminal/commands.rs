use crate::{api::Language, ui::Action};
use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  lang <name>       select language (python, javascript, cpp, java)
  prompt <text>     set the prompt
  code              edit the code area, finish with a line holding only '.'
  open <path>       load the code area from a file
  show              print language, prompt and code area
  generate | g      generate code from the prompt
  explain  | e      explain the code area
  debug    | d      check the code area for issues
  copy     | c      copy the code area to the clipboard
  download | s      save the code area as codepal_snippet.txt
  help              show this list
  quit              leave once running actions finish";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Language(Language),
    Prompt(String),
    EditCode,
    Open(PathBuf),
    Show,
    Run(Action),
    Help,
    Quit,
}

/// Parses one input line. `Err` carries a message for the user.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim_start();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line.trim_end(), ""));

    let command = match head.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "lang" | "language" => {
            if rest.trim().is_empty() {
                return Err("usage: lang <python|javascript|cpp|java>".to_string());
            }
            Command::Language(rest.parse().map_err(|e: crate::Error| e.to_string())?)
        }
        "prompt" => Command::Prompt(rest.trim_end_matches(['\r', '\n']).to_string()),
        "code" => Command::EditCode,
        "open" => {
            let path = rest.trim();
            if path.is_empty() {
                return Err("usage: open <path>".to_string());
            }
            Command::Open(PathBuf::from(path))
        }
        "show" => Command::Show,
        "generate" | "g" => Command::Run(Action::Generate),
        "explain" | "e" => Command::Run(Action::Explain),
        "debug" | "d" => Command::Run(Action::Debug),
        "copy" | "c" => Command::Run(Action::Copy),
        "download" | "s" => Command::Run(Action::Download),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };

    Ok(command)
}
