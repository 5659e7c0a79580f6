//! Where the initial record list comes from.
//!
//! The built-in seed set is embedded at compile time. A JSON file with the
//! same record shape can replace it.

use std::path::{Path, PathBuf};

use crate::error::{Context, Result};
use crate::model::UserRecord;

const SEED_JSON: &str = include_str!("../data/seed.json");

pub trait UserSource {
    fn load(&self) -> Result<Vec<UserRecord>>;

    /// Short label used in log lines.
    fn describe(&self) -> String;
}

/// The embedded seed data set.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSource;

impl UserSource for StaticSource {
    fn load(&self) -> Result<Vec<UserRecord>> {
        parse_records(SEED_JSON).with_ctx(|| "parse embedded seed data".to_string())
    }

    fn describe(&self) -> String {
        "embedded seed".to_string()
    }
}

/// A JSON array of records on disk.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    pub path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl UserSource for JsonFileSource {
    fn load(&self) -> Result<Vec<UserRecord>> {
        let contents = std::fs::read_to_string(&self.path)
            .with_ctx(|| format!("read {}", self.path.display()))?;
        parse_records(&contents).with_ctx(|| format!("parse {}", self.path.display()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn parse_records(json: &str) -> serde_json::Result<Vec<UserRecord>> {
    serde_json::from_str(json)
}

/// Pick the file source when a path is given, the embedded set otherwise.
pub fn from_path(path: Option<&Path>) -> Box<dyn UserSource> {
    match path {
        Some(p) => Box::new(JsonFileSource::new(p)),
        None => Box::new(StaticSource),
    }
}

/// Load records, logging and swallowing any failure so the table starts empty.
pub fn load_or_empty(source: &dyn UserSource) -> Vec<UserRecord> {
    match source.load() {
        Ok(users) => {
            tracing::info!(count = users.len(), source = %source.describe(), "loaded users");
            users
        }
        Err(err) => {
            tracing::error!(source = %source.describe(), error = %err, "failed to load users");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn embedded_seed_parses_with_sequential_ids() {
        let users = StaticSource.load().unwrap();
        assert!(users.len() > 10);
        for (i, u) in users.iter().enumerate() {
            assert_eq!(u.id as usize, i + 1);
        }
    }

    #[test]
    fn json_file_source_reads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":1,"firstName":"Ann","lastName":"Lee","email":"a@b.co","gender":"female","age":30,"city":"Rome"}}]"#
        )
        .unwrap();
        let users = JsonFileSource::new(file.path()).load().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].city, "Rome");
    }

    #[test]
    fn malformed_file_degrades_to_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let source = JsonFileSource::new(file.path());
        let err = source.load().unwrap_err();
        assert!(err.to_string().starts_with("parse "));
        assert!(load_or_empty(&source).is_empty());
    }

    #[test]
    fn missing_file_degrades_to_empty() {
        let source = JsonFileSource::new("/definitely/not/here.json");
        assert!(load_or_empty(&source).is_empty());
    }
}
