//! Rendering of command results

use comfy_table::{ContentArrangement, Table};
use graphwire_sdk::{CommandOutput, StoredObject};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn render(output: &CommandOutput, format: OutputFormat) -> serde_json::Result<String> {
    match (output, format) {
        (CommandOutput::Object(object), OutputFormat::Json) => serde_json::to_string_pretty(object),
        (CommandOutput::Results(results), OutputFormat::Json) => {
            serde_json::to_string_pretty(&serde_json::json!({ "results": results }))
        }
        (CommandOutput::Object(None), OutputFormat::Table) => Ok("(no object)".to_string()),
        (CommandOutput::Object(Some(object)), OutputFormat::Table) => {
            Ok(table(std::slice::from_ref(object)).to_string())
        }
        (CommandOutput::Results(results), OutputFormat::Table) => {
            if results.is_empty() {
                return Ok("(no results)".to_string());
            }
            Ok(format!("{}\n{} result(s)", table(results), results.len()))
        }
    }
}

fn table(objects: &[StoredObject]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["key", "value"]);

    for object in objects {
        let value = match &object.value {
            Some(body) => serde_json::to_string(body).unwrap_or_default(),
            None => "null".to_string(),
        };
        table.add_row(vec![object.key.clone(), value]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(key: &str) -> StoredObject {
        serde_json::from_value(json!({"Key": key, "Val": {"name": key}})).unwrap()
    }

    #[test]
    fn test_render_empty() {
        let rendered = render(&CommandOutput::Results(Vec::new()), OutputFormat::Table).unwrap();
        assert_eq!(rendered, "(no results)");
        let rendered = render(&CommandOutput::Object(None), OutputFormat::Json).unwrap();
        assert_eq!(rendered, "null");
    }

    #[test]
    fn test_render_table_rows() {
        let output = CommandOutput::Results(vec![object("Person_a"), object("Person_b")]);
        let rendered = render(&output, OutputFormat::Table).unwrap();
        assert!(rendered.contains("Person_a"));
        assert!(rendered.contains("Person_b"));
        assert!(rendered.ends_with("2 result(s)"));
    }

    #[test]
    fn test_render_json_keeps_wire_names() {
        let output = CommandOutput::Object(Some(object("Person_a")));
        let rendered: serde_json::Value =
            serde_json::from_str(&render(&output, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(rendered, json!({"Key": "Person_a", "Val": {"name": "Person_a"}}));
    }
}
