//! Console line parser using Pest
//!
//! Turns a line into the target object (`graph` or `g`) plus either the list
//! of method calls (call form) or the list of words (word form). Giving the
//! words meaning is left to [`super::command`].

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use serde_json::Value;

use super::{ConsoleError, ConsoleResult};

#[derive(Parser)]
#[grammar = "console/command.pest"]
struct CommandParser;

/// Object a command line is addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `graph ...`: the resource client
    Graph,
    /// `g ...`: a fresh traversal
    Traversal,
}

/// A single `.name(args)` call
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<Value>,
}

/// A word-form token. Quoted strings and JSON literals are never read as
/// step names.
#[derive(Debug, Clone, PartialEq)]
pub enum Word {
    Bare(String),
    Quoted(Value),
}

impl Word {
    pub fn into_value(self) -> Value {
        match self {
            Word::Bare(text) => Value::String(text),
            Word::Quoted(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Syntax {
    Calls(Vec<Invocation>),
    Words(Vec<Word>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLine {
    pub target: Target,
    pub syntax: Syntax,
}

/// Parse a line into its target and raw syntax
pub fn parse_line(input: &str) -> ConsoleResult<ParsedLine> {
    let mut pairs = CommandParser::parse(Rule::command, input)?;

    let command = pairs
        .next()
        .ok_or_else(|| ConsoleError::Syntax("empty command".to_string()))?;

    for inner in command.into_inner() {
        let target = match inner.as_rule() {
            Rule::graph_command => Target::Graph,
            Rule::traversal_command => Target::Traversal,
            _ => continue,
        };
        return Ok(ParsedLine {
            target,
            syntax: parse_body(inner)?,
        });
    }

    Err(ConsoleError::Syntax("expected a graph or g command".to_string()))
}

fn parse_body(pair: Pair<Rule>) -> ConsoleResult<Syntax> {
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::call_chain => {
                let calls = inner
                    .into_inner()
                    .map(parse_call)
                    .collect::<ConsoleResult<Vec<_>>>()?;
                return Ok(Syntax::Calls(calls));
            }
            Rule::word_list => {
                let words = inner
                    .into_inner()
                    .map(parse_word)
                    .collect::<ConsoleResult<Vec<_>>>()?;
                return Ok(Syntax::Words(words));
            }
            _ => {}
        }
    }
    Ok(Syntax::Words(Vec::new()))
}

fn parse_call(pair: Pair<Rule>) -> ConsoleResult<Invocation> {
    let mut name = String::new();
    let mut args = Vec::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::ident => name = inner.as_str().to_string(),
            _ => args.push(parse_value(inner)?),
        }
    }

    Ok(Invocation { name, args })
}

fn parse_word(pair: Pair<Rule>) -> ConsoleResult<Word> {
    match pair.as_rule() {
        Rule::bare => Ok(Word::Bare(pair.as_str().to_string())),
        _ => Ok(Word::Quoted(parse_value(pair)?)),
    }
}

fn parse_value(pair: Pair<Rule>) -> ConsoleResult<Value> {
    let text = pair.as_str();
    match pair.as_rule() {
        Rule::double_quoted => Ok(Value::String(serde_json::from_str(text)?)),
        Rule::single_quoted => {
            let unquoted = &text[1..text.len() - 1];
            Ok(Value::String(unquoted.replace("\\'", "'")))
        }
        Rule::number | Rule::literal | Rule::json_object | Rule::json_array => {
            Ok(serde_json::from_str(text)?)
        }
        rule => Err(ConsoleError::Syntax(format!("unexpected {:?}", rule))),
    }
}
