//! Container parameters and `%name%` placeholder resolution.
//!
//! A placeholder is `%` followed by a name without `%` or whitespace and a
//! closing `%`. `%%` escapes a literal percent sign; any other `%` is kept
//! as is. Parameter values may themselves contain placeholders.

use indexmap::IndexMap;
use lscope_common::error::{LscopeError, Result};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{map, value},
    multi::many0,
    sequence::delimited,
};

/// A piece of a string value split around placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Percent,
    Placeholder(&'a str),
}

fn escaped_percent(input: &str) -> IResult<&str, Segment<'_>> {
    value(Segment::Percent, tag("%%")).parse(input)
}

fn placeholder(input: &str) -> IResult<&str, Segment<'_>> {
    map(
        delimited(
            char('%'),
            take_while1(|c: char| c != '%' && !c.is_whitespace()),
            char('%'),
        ),
        Segment::Placeholder,
    )
    .parse(input)
}

fn text(input: &str) -> IResult<&str, Segment<'_>> {
    map(take_while1(|c: char| c != '%'), Segment::Text).parse(input)
}

fn lone_percent(input: &str) -> IResult<&str, Segment<'_>> {
    map(tag("%"), Segment::Text).parse(input)
}

fn segments(input: &str) -> Vec<Segment<'_>> {
    many0(alt((escaped_percent, placeholder, text, lone_percent)))
        .parse(input)
        .map(|(_, parts)| parts)
        .unwrap_or_default()
}

/// Named string parameters of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag {
    values: IndexMap<String, String>,
}

impl ParameterBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let _ = self.values.insert(name.into(), value.into());
    }

    /// Raw, unresolved value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replaces every placeholder in `input` with its resolved value.
    ///
    /// # Errors
    ///
    /// Returns [`LscopeError::ParameterNotFound`] for an undefined parameter
    /// and [`LscopeError::CircularParameter`] when parameters refer to each
    /// other in a loop.
    pub fn resolve(&self, input: &str) -> Result<String> {
        self.resolve_with(input, &mut Vec::new())
    }

    fn resolve_with<'a>(&'a self, input: &str, resolving: &mut Vec<&'a str>) -> Result<String> {
        let mut out = String::with_capacity(input.len());
        for segment in segments(input) {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Percent => out.push('%'),
                Segment::Placeholder(name) => {
                    let (key, raw) = self.values.get_key_value(name).ok_or_else(|| {
                        LscopeError::ParameterNotFound {
                            name: name.to_string(),
                        }
                    })?;
                    if resolving.contains(&key.as_str()) {
                        return Err(LscopeError::CircularParameter { name: key.clone() });
                    }
                    resolving.push(key);
                    out.push_str(&self.resolve_with(raw, resolving)?);
                    let _ = resolving.pop();
                }
            }
        }
        Ok(out)
    }
}
