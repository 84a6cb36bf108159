//! Line protocol spoken over the indicator daemon's control socket.
//!
//! One request per line: a verb followed by whitespace separated arguments,
//! e.g. `scroll 1 0.35` or `sweep on`.

use directories::ProjectDirs;
use std::fmt;
use std::path::PathBuf;
use std::str::{FromStr, SplitWhitespace};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const FALLBACK_SOCKET_PATH: &str = "/tmp/pagedots.sock";

/// Socket in the user's runtime directory, or a fixed path under /tmp.
pub fn socket_path() -> PathBuf {
    ProjectDirs::from("org", "pagedots", "pagedots")
        .and_then(|dirs| dirs.runtime_dir().map(|p| p.join("pagedots.sock")))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_SOCKET_PATH))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Verb {
    Show,
    Hide,
    Count,
    Page,
    Scroll,
    Select,
    Sweep,
    Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
enum Switch {
    #[strum(serialize = "on", serialize = "start", serialize = "true")]
    On,
    #[strum(serialize = "off", serialize = "stop", serialize = "false")]
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Show,
    Hide,
    /// Change the number of pages.
    Count(i32),
    /// Glide to a page.
    Page(i32),
    /// Jump the scroll position without selecting.
    Scroll { page: i32, offset: f32 },
    Select(i32),
    Sweep(bool),
    Snapshot(PathBuf),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseRequestError {
    #[error("Empty request")]
    Empty,
    #[error("Unknown command '{0}'")]
    UnknownVerb(String),
    #[error("Missing argument <{1}> for '{0}'")]
    MissingArgument(Verb, &'static str),
    #[error("Invalid value '{value}' for <{name}>")]
    InvalidArgument { name: &'static str, value: String },
    #[error("Unexpected trailing input '{0}'")]
    Trailing(String),
}

struct Args<'a> {
    verb: Verb,
    words: SplitWhitespace<'a>,
}

impl Args<'_> {
    fn next<T: FromStr>(&mut self, name: &'static str) -> Result<T, ParseRequestError> {
        let word = self
            .words
            .next()
            .ok_or(ParseRequestError::MissingArgument(self.verb, name))?;
        word.parse().map_err(|_| ParseRequestError::InvalidArgument {
            name,
            value: word.to_string(),
        })
    }

    fn next_finite(&mut self, name: &'static str) -> Result<f32, ParseRequestError> {
        let value: f32 = self.next(name)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ParseRequestError::InvalidArgument {
                name,
                value: value.to_string(),
            })
        }
    }

    fn finish<T>(mut self, request: T) -> Result<T, ParseRequestError> {
        match self.words.next() {
            Some(extra) => Err(ParseRequestError::Trailing(extra.to_string())),
            None => Ok(request),
        }
    }
}

impl FromStr for Request {
    type Err = ParseRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        if line.is_empty() {
            return Err(ParseRequestError::Empty);
        }
        let (head, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let verb: Verb = head
            .parse()
            .map_err(|_| ParseRequestError::UnknownVerb(head.to_string()))?;

        // paths may contain spaces, so the rest of the line is taken whole
        if verb == Verb::Snapshot {
            let path = rest.trim();
            if path.is_empty() {
                return Err(ParseRequestError::MissingArgument(verb, "path"));
            }
            return Ok(Self::Snapshot(PathBuf::from(path)));
        }

        let mut args = Args {
            verb,
            words: rest.split_whitespace(),
        };
        match verb {
            Verb::Show => args.finish(Self::Show),
            Verb::Hide => args.finish(Self::Hide),
            Verb::Count => {
                let count = args.next("count")?;
                args.finish(Self::Count(count))
            }
            Verb::Page => {
                let page = args.next("page")?;
                args.finish(Self::Page(page))
            }
            Verb::Scroll => {
                let page = args.next("page")?;
                let offset = args.next_finite("offset")?;
                args.finish(Self::Scroll { page, offset })
            }
            Verb::Select => {
                let page = args.next("page")?;
                args.finish(Self::Select(page))
            }
            Verb::Sweep => {
                let switch: Switch = args.next("on|off")?;
                args.finish(Self::Sweep(switch == Switch::On))
            }
            Verb::Snapshot => unreachable!("handled above"),
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Show => write!(f, "{}", Verb::Show),
            Self::Hide => write!(f, "{}", Verb::Hide),
            Self::Count(n) => write!(f, "{} {}", Verb::Count, n),
            Self::Page(n) => write!(f, "{} {}", Verb::Page, n),
            Self::Scroll { page, offset } => write!(f, "{} {} {}", Verb::Scroll, page, offset),
            Self::Select(n) => write!(f, "{} {}", Verb::Select, n),
            Self::Sweep(on) => write!(f, "{} {}", Verb::Sweep, if *on { "on" } else { "off" }),
            Self::Snapshot(path) => write!(f, "{} {}", Verb::Snapshot, path.display()),
        }
    }
}
