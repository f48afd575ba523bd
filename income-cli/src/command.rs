//! Line commands accepted by the interactive session.

use std::str::FromStr;

use income_core::models::{Field, RowKind};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  add permanent|freelancer       append a row with default values
  set <index> <field> <value>    change one field of a row
                                 fields: year, monthly_salary, hourly_rate,
                                         hours_per_day, days_per_year
  remove <index>                 delete a row
  show                           print the table and totals
  submit                         validate every row
  log <level>                    change the log filter (e.g. debug)
  help                           print this message
  quit                           leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(RowKind),
    Set {
        index: usize,
        field: Field,
        value: String,
    },
    Remove(usize),
    Show,
    Submit,
    LogLevel(String),
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("unknown income kind '{0}', expected permanent or freelancer")]
    UnknownKind(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("'{0}' is not a row index")]
    InvalidIndex(String),
}

fn parse_index(raw: &str) -> Result<usize, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidIndex(raw.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("add", [kind]) => RowKind::parse(kind)
                .map(Command::Add)
                .ok_or_else(|| CommandError::UnknownKind(kind.to_string())),
            ("add", _) => Err(CommandError::Usage("add permanent|freelancer")),

            // Words after the field are rejoined, so "2 500" arrives grouped.
            ("set", [index, field, value @ ..]) if !value.is_empty() => Ok(Command::Set {
                index: parse_index(index)?,
                field: Field::parse(field)
                    .ok_or_else(|| CommandError::UnknownField(field.to_string()))?,
                value: value.join(" "),
            }),
            ("set", _) => Err(CommandError::Usage("set <index> <field> <value>")),

            ("remove" | "rm", [index]) => Ok(Command::Remove(parse_index(index)?)),
            ("remove" | "rm", _) => Err(CommandError::Usage("remove <index>")),

            ("log", [level]) => Ok(Command::LogLevel(level.to_string())),
            ("log", _) => Err(CommandError::Usage("log <level>")),

            ("show" | "ls", []) => Ok(Command::Show),
            ("submit", []) => Ok(Command::Submit),
            ("help" | "?", []) => Ok(Command::Help),
            ("quit" | "exit" | "q", []) => Ok(Command::Quit),

            _ => Err(CommandError::Unknown(line.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_add() {
        assert_eq!("add permanent".parse(), Ok(Command::Add(RowKind::Permanent)));
        assert_eq!("ADD Freelancer".parse(), Ok(Command::Add(RowKind::Freelancer)));
    }

    #[test]
    fn add_requires_known_kind() {
        assert_eq!(
            "add contractor".parse::<Command>(),
            Err(CommandError::UnknownKind("contractor".to_string()))
        );
        assert_eq!(
            "add".parse::<Command>(),
            Err(CommandError::Usage("add permanent|freelancer"))
        );
    }

    #[test]
    fn parses_set_with_spaced_value() {
        assert_eq!(
            "set 2 monthlySalary 2 500".parse(),
            Ok(Command::Set {
                index: 2,
                field: Field::MonthlySalary,
                value: "2 500".to_string(),
            })
        );
    }

    #[test]
    fn set_rejects_bad_index_and_field() {
        assert_eq!(
            "set one year 2024".parse::<Command>(),
            Err(CommandError::InvalidIndex("one".to_string()))
        );
        assert_eq!(
            "set 0 salary 2024".parse::<Command>(),
            Err(CommandError::UnknownField("salary".to_string()))
        );
        assert_eq!(
            "set 0 year".parse::<Command>(),
            Err(CommandError::Usage("set <index> <field> <value>"))
        );
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!("remove 1".parse(), Ok(Command::Remove(1)));
        assert_eq!("  show  ".parse(), Ok(Command::Show));
        assert_eq!("submit".parse(), Ok(Command::Submit));
        assert_eq!("log debug".parse(), Ok(Command::LogLevel("debug".to_string())));
        assert_eq!("?".parse(), Ok(Command::Help));
        assert_eq!("exit".parse(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_blank_and_unknown_lines() {
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "frobnicate 3".parse::<Command>(),
            Err(CommandError::Unknown("frobnicate 3".to_string()))
        );
        assert_eq!(
            "show everything".parse::<Command>(),
            Err(CommandError::Unknown("show everything".to_string()))
        );
    }
}
