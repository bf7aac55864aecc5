//! Tokenization of Dockerfile instruction lines using `nom`.
//!
//! Two jobs: recognizing the `ENV` / `ARG` keyword of a logical line, and
//! splitting instruction arguments into space-separated words while keeping
//! quoted spans (which may contain spaces) intact.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_till, take_till1, take_while1},
    character::complete::{char, one_of, space1},
    combinator::{eof, recognize, rest, value},
    multi::many1,
};

/// Instruction keywords envquack interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `ENV` runtime variable declaration.
    Env,
    /// `ARG` build-time variable declaration.
    Arg,
}

impl Keyword {
    /// Canonical upper-case spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Env => "ENV",
            Self::Arg => "ARG",
        }
    }
}

fn keyword(input: &str) -> IResult<&str, Keyword> {
    let (input, kw) = alt((
        value(Keyword::Env, tag_no_case("ENV")),
        value(Keyword::Arg, tag_no_case("ARG")),
    ))
    .parse(input)?;
    let (input, _) = alt((space1, eof)).parse(input)?;
    Ok((input, kw))
}

/// Splits a logical line into its keyword and the case-preserved remainder.
///
/// Returns `None` for instructions other than `ENV` and `ARG`, including
/// words that merely start with those letters (`ENVIRONMENT`).
#[must_use]
pub fn split_instruction(line: &str) -> Option<(Keyword, &str)> {
    keyword(line).ok().map(|(rest, kw)| (kw, rest.trim()))
}

/// A complete quoted span, quotes included.
fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        recognize((char('"'), take_till(|c: char| c == '"'), char('"'))),
        recognize((char('\''), take_till(|c: char| c == '\''), char('\''))),
    ))
    .parse(input)
}

/// An opening quote that is never closed swallows the rest of the line.
fn unterminated(input: &str) -> IResult<&str, &str> {
    recognize((one_of("\"'"), rest)).parse(input)
}

fn bare(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == ' ' || c == '"' || c == '\'')(input)
}

fn word(input: &str) -> IResult<&str, &str> {
    recognize(many1(alt((quoted, unterminated, bare)))).parse(input)
}

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c == ' ')(input)
}

/// Splits instruction arguments on spaces, keeping quoted spans whole.
///
/// Quotes are preserved in the returned words; callers strip them once a
/// word has been split into key and value.
#[must_use]
pub fn split_words(input: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut remaining = input;

    while !remaining.is_empty() {
        if let Ok((rest, _)) = spaces(remaining) {
            remaining = rest;
            continue;
        }
        match word(remaining) {
            Ok((rest, w)) => {
                words.push(w);
                remaining = rest;
            }
            Err(_) => break,
        }
    }

    words
}
