//! Interactive command grammar
//!
//! One line of input is one [`Command`], parsed with clap.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gateway::dto::CollectionFilter;

/// One input line
#[derive(Parser, Debug)]
#[command(
    name = "pokecollect",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create an account
    Register {
        email: String,
        /// Prompted for when omitted
        password: Option<String>,
    },
    /// Sign in
    Login {
        email: String,
        /// Prompted for when omitted
        password: Option<String>,
    },
    /// Forget the credential
    Logout,
    /// Select the front image
    Front { path: PathBuf },
    /// Select the back image
    Back { path: PathBuf },
    /// Send both images for recognition
    Submit,
    /// List the candidates of the last submission
    Candidates,
    /// Build the draft from candidate <n> (1-based)
    Choose { n: usize },
    /// Start an empty draft
    Manual,
    /// Change one draft field
    Set {
        field: String,
        #[arg(num_args = 0.., allow_hyphen_values = true, trailing_var_arg = true)]
        value: Vec<String>,
    },
    /// Show the draft
    Draft,
    /// Add the draft to the collection
    Confirm,
    /// Drop images, candidates and draft
    Reset,
    /// Show session and workflow state
    Status,
    /// List the collection
    Collection {
        #[arg(long)]
        set: Option<String>,
        #[arg(long)]
        rarity: Option<String>,
        #[arg(long)]
        finish: Option<String>,
        #[arg(long)]
        min: Option<f64>,
        #[arg(long)]
        max: Option<f64>,
    },
    /// Total value of the collection
    Value,
    /// Collection statistics
    Stats,
    /// Show this help
    Help,
    /// Leave
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Parse one line; `Ok(None)` for a blank line
    ///
    /// Words are split shell-style, so quoted values may contain spaces.
    pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
        let words = shlex::split(line).ok_or_else(|| {
            clap::Error::raw(ErrorKind::InvalidValue, "unbalanced quotes in input\n")
        })?;
        if words.is_empty() {
            return Ok(None);
        }
        Line::try_parse_from(words).map(|line| Some(line.command))
    }

    /// Filter of a `collection` command
    pub fn collection_filter(
        set: Option<String>,
        rarity: Option<String>,
        finish: Option<String>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> CollectionFilter {
        CollectionFilter {
            set_name: set,
            rarity,
            finish,
            min_price: min,
            max_price: max,
        }
    }
}

pub const HELP: &str = "\
Commands:
  register <email> [password]   create an account
  login <email> [password]      sign in
  logout                        forget the credential
  front <path> / back <path>    select the card images
  submit                        send both images for recognition
  candidates                    list the candidates
  choose <n>                    draft from candidate n
  manual                        start an empty draft
  set <field> <value...>        name, set_name, number, rarity, price, image, finish
  draft                         show the draft
  confirm                       add the draft to the collection
  reset                         start over
  status                        session and workflow state
  collection [--set \"Base Set\"] [--rarity R] [--finish F] [--min P] [--max P]
  value / stats                 collection value and statistics
  quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse_line("submit").unwrap(), Some(Command::Submit));
        assert_eq!(Command::parse_line("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse_line("help").unwrap(), Some(Command::Help));
        assert_eq!(
            Command::parse_line("choose 2").unwrap(),
            Some(Command::Choose { n: 2 })
        );
        assert_eq!(
            Command::parse_line("front ./cards/front.jpg").unwrap(),
            Some(Command::Front {
                path: PathBuf::from("./cards/front.jpg")
            })
        );
    }

    #[test]
    fn test_parse_login_with_optional_password() {
        assert_eq!(
            Command::parse_line("login ash@example.com").unwrap(),
            Some(Command::Login {
                email: "ash@example.com".into(),
                password: None
            })
        );
        assert_eq!(
            Command::parse_line("login ash@example.com pikachu").unwrap(),
            Some(Command::Login {
                email: "ash@example.com".into(),
                password: Some("pikachu".into())
            })
        );
    }

    #[test]
    fn test_parse_set_keeps_all_words() {
        assert_eq!(
            Command::parse_line("set name Mr. Mime").unwrap(),
            Some(Command::Set {
                field: "name".into(),
                value: vec!["Mr.".into(), "Mime".into()]
            })
        );
        assert_eq!(
            Command::parse_line("set price -1").unwrap(),
            Some(Command::Set {
                field: "price".into(),
                value: vec!["-1".into()]
            })
        );
    }

    #[test]
    fn test_parse_collection_filters() {
        let command = Command::parse_line("collection --rarity Common --min 1.5").unwrap();
        assert_eq!(
            command,
            Some(Command::Collection {
                set: None,
                rarity: Some("Common".into()),
                finish: None,
                min: Some(1.5),
                max: None
            })
        );
    }

    #[test]
    fn test_parse_quoted_values() {
        assert_eq!(
            Command::parse_line(r#"collection --set "Base Set""#).unwrap(),
            Some(Command::Collection {
                set: Some("Base Set".into()),
                rarity: None,
                finish: None,
                min: None,
                max: None
            })
        );
        assert_eq!(
            Command::parse_line("front 'my card.jpg'").unwrap(),
            Some(Command::Front {
                path: PathBuf::from("my card.jpg")
            })
        );
        assert_eq!(
            Command::parse_line(r#"set name "Mr. Mime""#).unwrap(),
            Some(Command::Set {
                field: "name".into(),
                value: vec!["Mr. Mime".into()]
            })
        );
    }

    #[test]
    fn test_unbalanced_quotes_rejected() {
        let err = Command::parse_line(r#"collection --set "Base Set"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse_line("fly").is_err());
        assert!(Command::parse_line("choose two").is_err());
        assert!(Command::parse_line("front").is_err());
    }
}
