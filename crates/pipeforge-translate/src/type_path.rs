//! Fully-qualified type paths built on `nom`.
//!
//! A type path is a non-empty list of identifiers joined by `.`, such as
//! `sklearn.decomposition.PCA`. Registry keys must be valid type paths.

use std::fmt;

use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::char,
    combinator::{all_consuming, recognize},
    multi::separated_list1,
    sequence::pair,
};
use pipeforge_common::error::{PipeforgeError, Result};

/// A validated, dotted type path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypePath(String);

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char('.'), identifier).parse(input)
}

impl TypePath {
    /// Parses and validates a type path.
    ///
    /// # Errors
    ///
    /// Returns a configuration error pointing at the first offending byte
    /// if the input is not a dotted list of identifiers.
    pub fn parse(input: &str) -> Result<Self> {
        match all_consuming(segments).parse(input) {
            Ok(_) => Ok(Self(input.to_owned())),
            Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
                let offset = input.len() - e.input.len();
                Err(PipeforgeError::Config {
                    message: format!("invalid type path \"{input}\" at byte {offset}"),
                })
            }
            Err(nom::Err::Incomplete(_)) => Err(PipeforgeError::Config {
                message: format!("incomplete type path \"{input}\""),
            }),
        }
    }

    /// Returns the full dotted path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

/// Final `.`-separated segment of any name, valid path or not.
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
