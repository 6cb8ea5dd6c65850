//! Item commands against the durable store
//!
//! Every command prints its result as JSON on stdout.

use crate::commands::open_provider;
use crate::Settings;
use clap::Subcommand;
use serde::{Serialize, Serializer};
use serde_json::Value;
use storable_core::Storable;

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Store a value (parsed as JSON, otherwise taken as a string)
    Set { key: String, value: String },
    /// Print the value stored under a key, or null
    Get { key: String },
    /// Print whether a non-null value is stored under a key
    Exists { key: String },
    /// Print the key at a position, or null
    Key { index: usize },
    /// Print every key
    Keys,
    /// Print the number of items
    Count,
    /// Print every item with a truthy value
    All,
    /// Remove an item and print whether it existed
    Pop { key: String },
    /// Remove every item
    Clear,
}

pub fn execute(
    command: ItemCommand,
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error>> {
    let provider = open_provider(settings)?;
    let store = provider.local();

    let output = match command {
        ItemCommand::Set { key, value } => {
            let stored = store.set(&key, &parse_value(&value));
            println!("{}", stored);
            if !stored {
                return Err(format!("could not store the value for key '{}'", key).into());
            }
            return Ok(());
        }
        ItemCommand::Get { key } => store.get::<Value>(&key)?.unwrap_or(Value::Null),
        ItemCommand::Exists { key } => Value::Bool(store.exists(&key)?),
        ItemCommand::Key { index } => store.key(index).map_or(Value::Null, Value::String),
        ItemCommand::Keys => Value::from(store.keys()),
        ItemCommand::Count => Value::from(store.count()),
        ItemCommand::All => {
            let items = store.all::<Value>()?;
            println!("{}", serde_json::to_string(&OrderedItems(&items))?);
            return Ok(());
        }
        ItemCommand::Pop { key } => Value::Bool(store.pop(&key)),
        ItemCommand::Clear => {
            store.clear();
            Value::Bool(true)
        }
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

/// Items rendered as one JSON object, members in positional order
struct OrderedItems<'a>(&'a [(String, Value)]);

impl Serialize for OrderedItems<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

/// Interpret a command-line value as JSON, falling back to a plain string
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value_accepts_json() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value(r#"{"a":[true]}"#), json!({"a": [true]}));
        assert_eq!(parse_value(r#""quoted""#), json!("quoted"));
    }

    #[test]
    fn test_ordered_items_keep_position() {
        let items = vec![
            ("zeta".to_string(), json!(1)),
            ("alpha".to_string(), json!("a")),
        ];
        let text = serde_json::to_string(&OrderedItems(&items)).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":"a"}"#);
    }

    #[test]
    fn test_parse_value_falls_back_to_string() {
        assert_eq!(parse_value("somevalue"), json!("somevalue"));
        assert_eq!(parse_value("{broken"), json!("{broken"));
    }
}
