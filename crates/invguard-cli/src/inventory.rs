//! Inventory file loading.
//!
//! Inventories are read as YAML (JSON documents parse as YAML too) and
//! converted into the closed [`Value`] model. Tagged nodes such as Ansible's
//! `!vault |` ciphertext are unwrapped to their inner value, so encrypted
//! variables compare as plain strings. Merge keys (`<<: *anchor`) are
//! expanded before conversion; keys written next to `<<` win over merged ones.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

use invguard_types::{Mapping, Value};

/// Read and parse an inventory file.
pub fn load_inventory(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("inventory file not found or unreadable: {}", path.display()))?;
    let value = parse_inventory(&text)
        .with_context(|| format!("failed to parse inventory {}", path.display()))?;
    tracing::info!(path = %path.display(), "inventory loaded");
    Ok(value)
}

/// Parse inventory text. The root must be a mapping; an empty document is an
/// empty inventory.
pub fn parse_inventory(text: &str) -> anyhow::Result<Value> {
    let mut raw: serde_yaml::Value = serde_yaml::from_str(text)?;
    raw.apply_merge()?;
    match from_yaml(raw) {
        Value::Null => Ok(Value::Mapping(Mapping::new())),
        value @ Value::Mapping(_) => Ok(value),
        other => bail!("not a YAML mapping at root (found {})", other.kind()),
    }
}

fn from_yaml(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => Value::Integer(i),
            (None, Some(u)) => Value::Unsigned(u),
            _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Sequence(items.into_iter().map(from_yaml).collect())
        }
        serde_yaml::Value::Mapping(m) => Value::Mapping(
            m.into_iter()
                .map(|(k, v)| (key_text(k), from_yaml(v)))
                .collect::<Mapping>(),
        ),
        serde_yaml::Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

/// Mapping keys are strings in the value model; scalar keys keep their text.
fn key_text(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => key_text(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
