//! Command script loader. Produces an ordered `Vec<Command>` up front,
//! each tagged with its 0-based source line for the "aborted on command #N"
//! abort message the implication driver prints on conflict.

use crate::{LoadError, LoadResult};
use sa_core::{GateName, Polarity, Value};
use std::str::FromStr;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommandKind {
    Fault { gate: GateName, polarity: Polarity },
    Imply { gate: GateName, value: Value },
    Jfront,
    Dfront,
    Xpath,
    Display,
}

/// One parsed command plus the 0-based index of the source line it came
/// from (blank/comment lines don't consume an index; only command lines do).
#[derive(Clone, Debug)]
pub struct Command {
    pub index: usize,
    pub kind: CommandKind,
}

fn require_token<'a>(tokens: &mut impl Iterator<Item = &'a str>, line_no: usize) -> LoadResult<&'a str> {
    tokens.next().ok_or(LoadError::BadCommand { line: line_no })
}

pub fn parse_commands(text: &str) -> LoadResult<Vec<Command>> {
    let mut commands = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line_no = commands.len();
        let mut tokens = line.split_whitespace();
        let keyword = require_token(&mut tokens, line_no)?.to_ascii_uppercase();

        let kind = match keyword.as_str() {
            "FAULT" => {
                let gate = require_token(&mut tokens, line_no)?;
                let polarity_tok = require_token(&mut tokens, line_no)?;
                let gate = GateName::new(gate).map_err(|_| LoadError::BadCommand { line: line_no })?;
                let polarity = match polarity_tok {
                    "0" => Polarity::Zero,
                    "1" => Polarity::One,
                    _ => return Err(LoadError::BadCommand { line: line_no }),
                };
                CommandKind::Fault { gate, polarity }
            }
            "IMPLY" => {
                let gate = require_token(&mut tokens, line_no)?;
                let value_tok = require_token(&mut tokens, line_no)?;
                let gate = GateName::new(gate).map_err(|_| LoadError::BadCommand { line: line_no })?;
                let value = Value::from_str(value_tok).map_err(|_| LoadError::BadCommand { line: line_no })?;
                CommandKind::Imply { gate, value }
            }
            "JFRONT" => CommandKind::Jfront,
            "DFRONT" => CommandKind::Dfront,
            "XPATH" => CommandKind::Xpath,
            "DISPLAY" => CommandKind::Display,
            _ => return Err(LoadError::BadCommand { line: line_no }),
        };

        commands.push(Command { index: line_no, kind });
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command_kind_in_order() {
        let text = "\
            # set up a fault\n\
            FAULT G 0\n\
            IMPLY G 1\n\
            JFRONT\n\
            DFRONT\n\
            XPATH\n\
            DISPLAY\n\
        ";
        let commands = parse_commands(text).unwrap();
        assert_eq!(commands.len(), 6);
        assert!(matches!(commands[0].kind, CommandKind::Fault { polarity: Polarity::Zero, .. }));
        assert!(matches!(commands[1].kind, CommandKind::Imply { value: Value::One, .. }));
        assert!(matches!(commands[2].kind, CommandKind::Jfront));
        assert_eq!(commands[5].index, 5);
    }

    #[test]
    fn is_case_insensitive_on_the_keyword() {
        let commands = parse_commands("fault G 1\n").unwrap();
        assert!(matches!(commands[0].kind, CommandKind::Fault { polarity: Polarity::One, .. }));
    }

    #[test]
    fn rejects_an_unknown_command() {
        let err = parse_commands("FROBNICATE G\n").unwrap_err();
        assert!(matches!(err, LoadError::BadCommand { line: 0 }));
    }

    #[test]
    fn rejects_a_fault_with_a_five_valued_polarity() {
        let err = parse_commands("FAULT G X\n").unwrap_err();
        assert!(matches!(err, LoadError::BadCommand { .. }));
    }
}
