use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::alignment::DEFAULT_DELIMITER;

/// Output path used when neither the config nor the command line names one.
pub const DEFAULT_OUTPUT: &str = "results.txt";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    pub mapping_file: PathBuf,
    pub query_file: PathBuf,
    #[serde(default = "default_output")]
    pub output_file: PathBuf,
    #[serde(default = "default_delimiter", deserialize_with = "deserialize_delimiter")]
    pub delimiter: String,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_delimiter(&self.delimiter)
    }
}

/// Maps the spellings `\t` and `tab` to a tab character; other values are taken literally.
#[must_use]
pub fn parse_delimiter(value: &str) -> String {
    match value {
        "\\t" | "tab" => "\t".to_string(),
        other => other.to_string(),
    }
}

pub fn validate_delimiter(delimiter: &str) -> Result<()> {
    if delimiter.is_empty() {
        bail!("delimiter must not be empty");
    }
    if delimiter.contains(['\n', '\r']) {
        bail!("delimiter must not contain a line break: {delimiter:?}");
    }
    Ok(())
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn deserialize_delimiter<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_delimiter(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(json: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(json.as_bytes()).unwrap();
        f
    }

    #[test]
    fn valid_config_all_fields() {
        let json = r#"{
            "mappingFile": "data/map.tsv",
            "queryFile": "data/queries.tsv",
            "outputFile": "out/results.csv",
            "delimiter": ","
        }"#;
        let f = write_config(json);
        let config = RunConfig::from_file(f.path()).unwrap();
        assert_eq!(config.mapping_file, PathBuf::from("data/map.tsv"));
        assert_eq!(config.query_file, PathBuf::from("data/queries.tsv"));
        assert_eq!(config.output_file, PathBuf::from("out/results.csv"));
        assert_eq!(config.delimiter, ",");
    }

    #[test]
    fn valid_config_optional_fields_omitted() {
        let json = r#"{ "mappingFile": "map.tsv", "queryFile": "queries.tsv" }"#;
        let f = write_config(json);
        let config = RunConfig::from_file(f.path()).unwrap();
        assert_eq!(config.output_file, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.delimiter, "\t");
    }

    #[test]
    fn tab_spellings() {
        let json = r#"{ "mappingFile": "m", "queryFile": "q", "delimiter": "tab" }"#;
        let config = RunConfig::from_file(write_config(json).path()).unwrap();
        assert_eq!(config.delimiter, "\t");
        assert_eq!(parse_delimiter("\\t"), "\t");
        assert_eq!(parse_delimiter(";"), ";");
    }

    #[test]
    fn empty_delimiter_rejected() {
        let json = r#"{ "mappingFile": "m", "queryFile": "q", "delimiter": "" }"#;
        let err = RunConfig::from_file(write_config(json).path()).unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn missing_required_field() {
        let json = r#"{ "queryFile": "q" }"#;
        let err = RunConfig::from_file(write_config(json).path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn line_break_delimiter_rejected() {
        assert!(validate_delimiter("\n").is_err());
        assert!(validate_delimiter("\t").is_ok());
    }
}
