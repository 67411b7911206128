//! Command-line arguments and the small grammars they use.

use clap::Parser;
use crwd_types::{BoxCause, Cause, CauseId, CauseRef, CollectiveId};
use std::path::PathBuf;
use std::str::FromStr;

/// Run a donation-split editing session from the command line
#[derive(Parser, Debug)]
#[command(name = "crwd-split")]
#[command(about = "Edit how a monthly donation is split across causes")]
#[command(version)]
pub struct Args {
    /// Monthly donation amount in dollars
    #[arg(short, long)]
    pub amount: f64,

    /// Cause in the box, as ID or ID:NAME (repeatable)
    #[arg(short, long = "cause", value_parser = parse_cause, required = true)]
    pub causes: Vec<Cause>,

    /// Previously saved entry, as ID=PCT or ID=PCT@COLLECTIVE (repeatable)
    #[arg(short, long = "saved", value_parser = parse_saved)]
    pub saved: Vec<BoxCause>,

    /// Edit to apply in order: slide:ID=VALUE, inc:ID, dec:ID, type:ID=TEXT or reset
    #[arg(short, long = "edit")]
    pub edits: Vec<EditCommand>,

    /// Allocator configuration file (defaults to $CRWD_CONFIG_PATH or crwd.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the save request as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

/// One scripted edit of the split.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Slide { cause_id: CauseId, value: f64 },
    Increment { cause_id: CauseId },
    Decrement { cause_id: CauseId },
    Type { cause_id: CauseId, text: String },
    Reset,
}

impl FromStr for EditCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "reset" {
            return Ok(Self::Reset);
        }

        let (verb, rest) = s
            .split_once(':')
            .ok_or_else(|| format!("expected VERB:ARGS or 'reset', got '{s}'"))?;

        match verb {
            "slide" => {
                let (id, value) = split_assignment(rest)?;
                let value = value
                    .parse::<f64>()
                    .map_err(|_| format!("invalid slider value '{value}'"))?;
                Ok(Self::Slide { cause_id: parse_id(id)?, value })
            }
            "inc" => Ok(Self::Increment { cause_id: parse_id(rest)? }),
            "dec" => Ok(Self::Decrement { cause_id: parse_id(rest)? }),
            "type" => {
                let (id, text) = split_assignment(rest)?;
                Ok(Self::Type { cause_id: parse_id(id)?, text: text.to_string() })
            }
            other => Err(format!("unknown edit '{other}'")),
        }
    }
}

fn split_assignment(s: &str) -> Result<(&str, &str), String> {
    s.split_once('=').ok_or_else(|| format!("expected ID=VALUE, got '{s}'"))
}

fn parse_id(s: &str) -> Result<CauseId, String> {
    s.trim().parse::<u64>().map(CauseId).map_err(|_| format!("invalid cause id '{s}'"))
}

/// `ID` or `ID:NAME`. A missing name defaults to "Cause ID".
pub fn parse_cause(s: &str) -> Result<Cause, String> {
    let (id, name) = match s.split_once(':') {
        Some((id, name)) => (parse_id(id)?, name.trim().to_string()),
        None => {
            let id = parse_id(s)?;
            (id, format!("Cause {id}"))
        }
    };
    Ok(Cause { id, name, image: None })
}

/// `ID=PCT` or `ID=PCT@COLLECTIVE`.
pub fn parse_saved(s: &str) -> Result<BoxCause, String> {
    let (id, rest) = split_assignment(s)?;
    let (percentage, collective) = match rest.split_once('@') {
        Some((percentage, collective)) => {
            let collective = collective
                .trim()
                .parse::<u64>()
                .map(CollectiveId)
                .map_err(|_| format!("invalid collective id '{collective}'"))?;
            (percentage, Some(collective))
        }
        None => (rest, None),
    };
    let percentage = percentage
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid saved percentage '{percentage}'"))?;

    Ok(BoxCause {
        cause: CauseRef { id: parse_id(id)? },
        percentage: Some(percentage),
        attributed_collective: collective,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_edit_form() {
        assert_eq!(
            "slide:3=70.5".parse::<EditCommand>().unwrap(),
            EditCommand::Slide { cause_id: CauseId(3), value: 70.5 }
        );
        assert_eq!(
            "inc:1".parse::<EditCommand>().unwrap(),
            EditCommand::Increment { cause_id: CauseId(1) }
        );
        assert_eq!(
            "dec:2".parse::<EditCommand>().unwrap(),
            EditCommand::Decrement { cause_id: CauseId(2) }
        );
        assert_eq!(
            "type:4=12.5%".parse::<EditCommand>().unwrap(),
            EditCommand::Type { cause_id: CauseId(4), text: "12.5%".to_string() }
        );
        assert_eq!("reset".parse::<EditCommand>().unwrap(), EditCommand::Reset);
    }

    #[test]
    fn typed_text_may_be_empty_or_contain_separators() {
        assert_eq!(
            "type:1=".parse::<EditCommand>().unwrap(),
            EditCommand::Type { cause_id: CauseId(1), text: String::new() }
        );
        assert_eq!(
            "type:1=a=b".parse::<EditCommand>().unwrap(),
            EditCommand::Type { cause_id: CauseId(1), text: "a=b".to_string() }
        );
    }

    #[test]
    fn rejects_malformed_edits() {
        for input in ["", "slide", "slide:1", "slide:x=4", "slide:1=abc", "jump:1", "inc:-1"] {
            assert!(input.parse::<EditCommand>().is_err(), "{input:?}");
        }
    }

    #[test]
    fn parses_causes_with_and_without_names() {
        assert_eq!(parse_cause("7:Clean Water").unwrap(), Cause::new(7, "Clean Water"));
        assert_eq!(parse_cause("8").unwrap(), Cause::new(8, "Cause 8"));
        assert!(parse_cause("water").is_err());
    }

    #[test]
    fn parses_saved_entries() {
        assert_eq!(parse_saved("2=30").unwrap(), BoxCause::with_percentage(2, 30.0));

        let attributed = parse_saved("2=30.5@91").unwrap();
        assert_eq!(attributed.percentage, Some(30.5));
        assert_eq!(attributed.attributed_collective, Some(CollectiveId(91)));

        assert!(parse_saved("2").is_err());
        assert!(parse_saved("2=30@x").is_err());
    }

    #[test]
    fn full_command_line() {
        let args = Args::try_parse_from([
            "crwd-split",
            "--amount",
            "34",
            "--cause",
            "1:Water",
            "--cause",
            "2",
            "--saved",
            "1=60@5",
            "--edit",
            "slide:1=70",
            "--edit",
            "reset",
            "--json",
        ])
        .unwrap();

        assert_eq!(args.amount, 34.0);
        assert_eq!(args.causes.len(), 2);
        assert_eq!(args.saved.len(), 1);
        assert_eq!(args.edits.len(), 2);
        assert!(args.json);
        assert!(!args.log_json);
    }

    #[test]
    fn causes_are_required() {
        assert!(Args::try_parse_from(["crwd-split", "--amount", "34"]).is_err());
    }
}
