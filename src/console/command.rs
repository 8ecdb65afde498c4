//! Console commands and their interpretation

use serde_json::{Map, Value};

use super::parser::{parse_line, Invocation, Syntax, Target, Word};
use super::{ConsoleError, ConsoleResult};
use crate::graph::ResourceId;
use crate::traversal::TraversalBuilder;

/// Operation on the resource client
#[derive(Debug, Clone, PartialEq)]
pub enum GraphCommand {
    CreateNode {
        node_type: String,
        body: Value,
    },
    CreateEdge {
        edge_type: String,
        source: String,
        target: String,
        body: Value,
    },
    Get(ResourceId),
    Delete(ResourceId),
    QueryNodes {
        node_type: String,
        id: Option<String>,
        out: Option<String>,
    },
}

/// A fully interpreted console line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Graph(GraphCommand),
    Traverse(TraversalBuilder),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Is,
    Has,
    Out,
    In,
    Both,
    OutLimit,
    InLimit,
    BothLimit,
    OutFilter,
    InFilter,
    BothFilter,
    GroupBy,
    LimitTo,
}

impl Step {
    fn lookup(name: &str) -> Option<Step> {
        let step = match normalize(name).as_str() {
            "is" => Step::Is,
            "has" => Step::Has,
            "out" => Step::Out,
            "in" => Step::In,
            "both" => Step::Both,
            "outlimit" => Step::OutLimit,
            "inlimit" => Step::InLimit,
            "bothlimit" => Step::BothLimit,
            "outfilter" => Step::OutFilter,
            "infilter" => Step::InFilter,
            "bothfilter" => Step::BothFilter,
            "groupby" => Step::GroupBy,
            "limitto" | "limit" => Step::LimitTo,
            _ => return None,
        };
        Some(step)
    }

    /// Number of leading arguments that precede the optional edge-type list
    fn fixed_args(self) -> usize {
        match self {
            Step::Is | Step::GroupBy | Step::LimitTo => 1,
            Step::Has => 2,
            Step::Out | Step::In | Step::Both => 0,
            Step::OutLimit | Step::InLimit | Step::BothLimit => 1,
            Step::OutFilter | Step::InFilter | Step::BothFilter => 1,
        }
    }

    fn takes_types(self) -> bool {
        !matches!(self, Step::Is | Step::Has | Step::GroupBy | Step::LimitTo)
    }
}

/// Command names ignore case, `-` and `_`
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Parse and interpret a console line
pub fn parse_command(input: &str) -> ConsoleResult<Command> {
    let line = parse_line(input.trim())?;
    match line.target {
        Target::Graph => {
            let invocation = match line.syntax {
                Syntax::Calls(mut calls) => {
                    if calls.len() != 1 {
                        return Err(ConsoleError::Syntax(format!(
                            "graph takes a single operation, got {}",
                            calls.len()
                        )));
                    }
                    calls.remove(0)
                }
                Syntax::Words(words) => words_to_graph_invocation(words)?,
            };
            graph_command(invocation).map(Command::Graph)
        }
        Target::Traversal => {
            let steps = match line.syntax {
                Syntax::Calls(calls) => calls,
                Syntax::Words(words) => words_to_steps(words)?,
            };
            let builder = steps
                .into_iter()
                .try_fold(TraversalBuilder::new(), apply_step)?;
            Ok(Command::Traverse(builder))
        }
    }
}

fn words_to_graph_invocation(words: Vec<Word>) -> ConsoleResult<Invocation> {
    let mut words = words.into_iter().map(Word::into_value);
    let name = match words.next() {
        Some(Value::String(name)) => name,
        Some(other) => return Err(ConsoleError::UnknownCommand(other.to_string())),
        None => return Err(ConsoleError::Syntax("missing graph operation".to_string())),
    };
    Ok(Invocation {
        name,
        args: words.collect(),
    })
}

/// Split a word list into steps using each step's arity. Edge types are a
/// single comma separated word. A bare word that names a step starts the next
/// step instead; quoted words are always taken as types.
fn words_to_steps(words: Vec<Word>) -> ConsoleResult<Vec<Invocation>> {
    let mut steps = Vec::new();
    let mut words = words.into_iter().peekable();

    while let Some(word) = words.next() {
        let name = match word {
            Word::Bare(name) => name,
            Word::Quoted(other) => return Err(ConsoleError::UnknownStep(other.to_string())),
        };
        let step = Step::lookup(&name).ok_or_else(|| ConsoleError::UnknownStep(name.clone()))?;

        let mut args = Vec::new();
        for _ in 0..step.fixed_args() {
            match words.next() {
                Some(arg) => args.push(arg.into_value()),
                None => {
                    return Err(ConsoleError::Arity {
                        name,
                        expected: if step.fixed_args() == 2 { "2" } else { "1" },
                        got: args.len(),
                    })
                }
            }
        }

        if step.takes_types() {
            let is_type_list = match words.peek() {
                Some(Word::Bare(next)) => Step::lookup(next).is_none(),
                Some(Word::Quoted(next)) => next.is_string(),
                None => false,
            };
            let list = if is_type_list { words.next() } else { None };
            if let Some(Value::String(list)) = list.map(Word::into_value) {
                args.extend(
                    list.split(',')
                        .map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(|t| Value::String(t.to_string())),
                );
            }
        }

        steps.push(Invocation { name, args });
    }

    Ok(steps)
}

fn apply_step(builder: TraversalBuilder, call: Invocation) -> ConsoleResult<TraversalBuilder> {
    let step = Step::lookup(&call.name).ok_or_else(|| ConsoleError::UnknownStep(call.name.clone()))?;
    let name = call.name.as_str();
    let args = call.args;

    let builder = match step {
        Step::Is => builder.is(single_string(name, &args)?),
        Step::Has => {
            expect_args(name, &args, 2, "2")?;
            builder.has(&string_arg(name, &args[0])?, string_arg(name, &args[1])?)
        }
        Step::GroupBy => builder.group_by(single_string(name, &args)?),
        Step::LimitTo => {
            expect_args(name, &args, 1, "1")?;
            builder.limit_to(limit_arg(name, &args[0])?)
        }
        Step::Out => builder.out(type_list(name, &args)?),
        Step::In => builder.in_(type_list(name, &args)?),
        Step::Both => builder.both(type_list(name, &args)?),
        Step::OutLimit | Step::InLimit | Step::BothLimit => {
            let (first, rest) = args.split_first().ok_or_else(|| ConsoleError::Arity {
                name: name.to_string(),
                expected: "at least 1",
                got: 0,
            })?;
            let limit = limit_arg(name, first)?;
            let types = type_list(name, rest)?;
            match step {
                Step::OutLimit => builder.out_limit(limit, types),
                Step::InLimit => builder.in_limit(limit, types),
                _ => builder.both_limit(limit, types),
            }
        }
        Step::OutFilter | Step::InFilter | Step::BothFilter => {
            let (first, rest) = args.split_first().ok_or_else(|| ConsoleError::Arity {
                name: name.to_string(),
                expected: "at least 1",
                got: 0,
            })?;
            let filter = string_arg(name, first)?;
            let types = type_list(name, rest)?;
            match step {
                Step::OutFilter => builder.out_filter(filter, types),
                Step::InFilter => builder.in_filter(filter, types),
                _ => builder.both_filter(filter, types),
            }
        }
    };

    Ok(builder)
}

fn graph_command(call: Invocation) -> ConsoleResult<GraphCommand> {
    let name = call.name.as_str();
    let args = call.args;

    match normalize(name).as_str() {
        "createnode" => {
            expect_range(name, &args, 1, 2, "1 or 2")?;
            Ok(GraphCommand::CreateNode {
                node_type: string_arg(name, &args[0])?,
                body: body_arg(name, args.get(1))?,
            })
        }
        "createedge" => {
            expect_range(name, &args, 3, 4, "3 or 4")?;
            Ok(GraphCommand::CreateEdge {
                edge_type: string_arg(name, &args[0])?,
                source: string_arg(name, &args[1])?,
                target: string_arg(name, &args[2])?,
                body: body_arg(name, args.get(3))?,
            })
        }
        "get" => Ok(GraphCommand::Get(single_string(name, &args)?.into())),
        "del" | "delete" => Ok(GraphCommand::Delete(single_string(name, &args)?.into())),
        "query" | "querynodes" => {
            expect_range(name, &args, 1, 3, "1 to 3")?;
            Ok(GraphCommand::QueryNodes {
                node_type: string_arg(name, &args[0])?,
                id: args.get(1).map(|v| string_arg(name, v)).transpose()?,
                out: args.get(2).map(|v| string_arg(name, v)).transpose()?,
            })
        }
        _ => Err(ConsoleError::UnknownCommand(call.name.clone())),
    }
}

fn expect_args(name: &str, args: &[Value], count: usize, expected: &'static str) -> ConsoleResult<()> {
    expect_range(name, args, count, count, expected)
}

fn expect_range(
    name: &str,
    args: &[Value],
    min: usize,
    max: usize,
    expected: &'static str,
) -> ConsoleResult<()> {
    if args.len() < min || args.len() > max {
        return Err(ConsoleError::Arity {
            name: name.to_string(),
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

fn single_string(name: &str, args: &[Value]) -> ConsoleResult<String> {
    expect_args(name, args, 1, "1")?;
    string_arg(name, &args[0])
}

/// Strings pass through; numbers are accepted where ids are expected
fn string_arg(name: &str, value: &Value) -> ConsoleResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ConsoleError::InvalidArgument {
            name: name.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}

fn limit_arg(name: &str, value: &Value) -> ConsoleResult<u32> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(limit) if limit > 0 => Ok(limit),
        _ => Err(ConsoleError::InvalidArgument {
            name: name.to_string(),
            reason: format!("expected a positive integer limit, got {}", value),
        }),
    }
}

fn type_list(name: &str, args: &[Value]) -> ConsoleResult<Vec<String>> {
    args.iter().map(|v| string_arg(name, v)).collect()
}

fn body_arg(name: &str, value: Option<&Value>) -> ConsoleResult<Value> {
    match value {
        None => Ok(Value::Object(Map::new())),
        Some(body @ Value::Object(_)) => Ok(body.clone()),
        Some(other) => Err(ConsoleError::InvalidArgument {
            name: name.to_string(),
            reason: format!("body must be a JSON object, got {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::{Direction, DEFAULT_HOP_LIMIT};
    use serde_json::json;

    fn traversal(input: &str) -> TraversalBuilder {
        match parse_command(input).unwrap() {
            Command::Traverse(builder) => builder,
            other => panic!("expected traversal, got {:?}", other),
        }
    }

    #[test]
    fn test_word_and_call_forms_agree() {
        let words = traversal("g is Person has id p1 out friend is Person limit 10");
        let calls = traversal(r#"g.is("Person").has("id", "p1").out("friend").is("Person").limitTo(10)"#);
        assert_eq!(words, calls);

        let doc = words.build().unwrap();
        assert_eq!(doc.node_type.as_deref(), Some("Person"));
        assert_eq!(doc.id.as_deref(), Some("p1"));
        let hop = doc.next.as_ref().unwrap();
        assert_eq!(hop.direction, Direction::Out);
        assert_eq!(hop.limit, DEFAULT_HOP_LIMIT);
        assert_eq!(hop.types, vec!["friend".to_string()]);
        assert_eq!(hop.target.limit, 10);
    }

    #[test]
    fn test_hop_without_types() {
        let doc = traversal("g out in knows,likes both").build().unwrap();
        let hops: Vec<_> = doc.hops().collect();
        assert_eq!(hops.len(), 3);
        assert!(hops[0].types.is_empty());
        assert_eq!(hops[1].types, vec!["knows".to_string(), "likes".to_string()]);
        assert_eq!(hops[2].direction, Direction::Both);
    }

    #[test]
    fn test_quoted_edge_type_named_like_a_step() {
        let doc = traversal(r#"g is Person out "has" is Pet"#).build().unwrap();
        let hop = doc.next.as_ref().unwrap();
        assert_eq!(hop.types, vec!["has".to_string()]);
        assert_eq!(hop.target.node_type.as_deref(), Some("Pet"));

        let doc = traversal("g out 'in' is X").build().unwrap();
        assert_eq!(doc.depth(), 1);
        assert_eq!(doc.next.as_ref().unwrap().types, vec!["in".to_string()]);
        assert_eq!(doc.tip().node_type.as_deref(), Some("X"));
    }

    #[test]
    fn test_bare_step_name_is_not_an_edge_type() {
        let builder = traversal("g out in");
        assert_eq!(builder.stages().len(), 2);
        assert!(matches!(
            parse_command(r#"g "is" Person"#),
            Err(ConsoleError::UnknownStep(_))
        ));
    }

    #[test]
    fn test_limit_and_filter_variants() {
        let words = traversal(r#"g out-limit 50 knows in-filter "since > 2010" follows"#);
        let calls = traversal(r#"g.outLimit(50, "knows").inFilter("since > 2010", "follows")"#);
        assert_eq!(words, calls);

        let doc = words.build().unwrap();
        let hops: Vec<_> = doc.hops().collect();
        assert_eq!(hops[0].limit, 50);
        assert_eq!(hops[1].filter.as_deref(), Some("since > 2010"));
        assert_eq!(hops[1].direction, Direction::In);
    }

    #[test]
    fn test_word_with_apostrophe() {
        let doc = traversal("g is O'Brien").build().unwrap();
        assert_eq!(doc.node_type.as_deref(), Some("O'Brien"));
    }

    #[test]
    fn test_group_by_step() {
        let doc = traversal("g is Person group-by id").build().unwrap();
        assert_eq!(doc.filters, vec!["groupBy(id)".to_string()]);
    }

    #[test]
    fn test_unsupported_has_is_not_an_error() {
        let builder = traversal(r#"g.has("color", "red")"#);
        assert!(builder.is_empty());
    }

    #[test]
    fn test_graph_commands() {
        assert_eq!(
            parse_command(r#"graph create-node Person {"name": "Ann"}"#).unwrap(),
            Command::Graph(GraphCommand::CreateNode {
                node_type: "Person".into(),
                body: json!({"name": "Ann"}),
            })
        );
        assert_eq!(
            parse_command(r#"graph.createEdge("friend", "Person_a", "Person_b")"#).unwrap(),
            Command::Graph(GraphCommand::CreateEdge {
                edge_type: "friend".into(),
                source: "Person_a".into(),
                target: "Person_b".into(),
                body: json!({}),
            })
        );
        assert_eq!(
            parse_command("graph get node:Person_a").unwrap(),
            Command::Graph(GraphCommand::Get(ResourceId::from("node:Person_a")))
        );
        assert_eq!(
            parse_command(r#"graph.del("edge:friend.Person_a.Person_b")"#).unwrap(),
            Command::Graph(GraphCommand::Delete(ResourceId::edge("friend", "Person_a", "Person_b")))
        );
        assert_eq!(
            parse_command("graph query Person a friend").unwrap(),
            Command::Graph(GraphCommand::QueryNodes {
                node_type: "Person".into(),
                id: Some("a".into()),
                out: Some("friend".into()),
            })
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse_command("graph explode x"),
            Err(ConsoleError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_command("g jump Person"),
            Err(ConsoleError::UnknownStep(_))
        ));
        assert!(matches!(
            parse_command("g has id"),
            Err(ConsoleError::Arity { .. })
        ));
        assert!(matches!(
            parse_command("g limit zero"),
            Err(ConsoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_command(r#"graph.createNode("Person", [1, 2])"#),
            Err(ConsoleError::InvalidArgument { .. })
        ));
        assert!(matches!(
            parse_command(r#"graph.get("a").get("b")"#),
            Err(ConsoleError::Syntax(_))
        ));
    }
}
