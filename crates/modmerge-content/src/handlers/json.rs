//! JSON (key/value tree) handler

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use modmerge_meta::{DocumentFormat, Rule};

use crate::error::{Error, Result};
use crate::format::{DocumentHandler, decode_utf8};
use crate::merge::merge_maps;

const INDENT: &[u8] = b"    ";

/// Handler for JSON documents whose root is an object
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonHandler;

impl JsonHandler {
    pub fn new() -> Self {
        Self
    }

    /// Render any serializable value as JSON with 4-space indentation.
    pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
        String::from_utf8(write_pretty(value)?).map_err(|e| Error::render("JSON", e.to_string()))
    }
}

impl DocumentHandler for JsonHandler {
    type Tree = Map<String, Value>;

    fn format(&self) -> DocumentFormat {
        DocumentFormat::KeyValue
    }

    fn parse(&self, source: &[u8]) -> Result<Self::Tree> {
        let text = decode_utf8(self.format(), source)?;
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(Error::parse(
                "JSON",
                format!("root must be an object, found {}", kind_of(&other)),
            )),
            Err(e) => Err(Error::parse("JSON", e.to_string())),
        }
    }

    fn merge(&self, target: &mut Self::Tree, source: Self::Tree, rule: &Rule) -> Result<()> {
        merge_maps(target, source, rule)
    }

    fn render(&self, tree: &Self::Tree) -> Result<Vec<u8>> {
        write_pretty(tree)
    }
}

fn write_pretty<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT));
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::render("JSON", e.to_string()))?;
    Ok(out)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
