//! Command input given inline, as `@file`, or as `@-` for stdin.

use std::io::Read;

use anyhow::{Context, Result, bail};
use serde::de::DeserializeOwned;

/// Where an input value came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline,
    Stdin,
    File(String),
}

impl std::fmt::Display for InputSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputSource::Inline => f.write_str("argument"),
            InputSource::Stdin => f.write_str("stdin"),
            InputSource::File(path) => write!(f, "file {path}"),
        }
    }
}

pub fn input_source(value: &str) -> InputSource {
    match value {
        "@-" => InputSource::Stdin,
        other => match other.strip_prefix('@') {
            Some(path) => InputSource::File(path.to_string()),
            None => InputSource::Inline,
        },
    }
}

/// Raw text of an input value. Blank input is an error.
pub fn read_input(value: &str) -> Result<String> {
    let source = input_source(value);
    let text = match &source {
        InputSource::Stdin => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read from stdin")?;
            buf
        }
        InputSource::File(path) => {
            std::fs::read_to_string(path).with_context(|| format!("failed to read {source}"))?
        }
        InputSource::Inline => value.to_string(),
    };
    if text.trim().is_empty() {
        bail!("no input in {source}");
    }
    Ok(text)
}

/// Reads an input value and parses it as JSON; `what` names the expected
/// document in the error.
pub fn read_json_input<T: DeserializeOwned>(value: &str, what: &str) -> Result<T> {
    let text = read_input(value)?;
    serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {what} from {}", input_source(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn classifies_sources() {
        assert_eq!(input_source("[]"), InputSource::Inline);
        assert_eq!(input_source("@-"), InputSource::Stdin);
        assert_eq!(input_source("@a.json"), InputSource::File("a.json".into()));
    }

    #[test]
    fn reads_file_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"ID":"x0"}]"#).unwrap();
        let value: Value = read_json_input(&format!("@{}", path.display()), "records").unwrap();
        assert_eq!(value[0]["ID"], "x0");
        assert!(read_input("@/definitely/not/here.json").is_err());
    }

    #[test]
    fn blank_and_malformed_input_name_their_source() {
        let err = read_input("  ").unwrap_err();
        assert_eq!(err.to_string(), "no input in argument");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[{").unwrap();
        let err = read_json_input::<Value>(&format!("@{}", path.display()), "HW inventory records")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("failed to parse HW inventory records from file {}", path.display())
        );
    }
}
