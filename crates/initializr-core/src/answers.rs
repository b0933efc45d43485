//! Collected answers and their per-project persistence
//!
//! Answers are stored as YAML next to the generated project and read back
//! as prompt defaults on the next run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Value given for one prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    List(Vec<String>),
    Text(String),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            AnswerValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AnswerValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Render the value as a single query parameter value
    pub fn to_param(&self) -> String {
        match self {
            AnswerValue::Flag(b) => b.to_string(),
            AnswerValue::List(items) => items.join(","),
            AnswerValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<bool> for AnswerValue {
    fn from(b: bool) -> Self {
        AnswerValue::Flag(b)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::List(items)
    }
}

/// Mapping from prompt key to the chosen value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, AnswerValue>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.0.get(key)
    }

    /// Text answer, ignoring empty strings
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(AnswerValue::as_text)
            .filter(|s| !s.is_empty())
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.get(key).and_then(AnswerValue::as_list)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(AnswerValue::as_flag)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnswerValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<AnswerValue>> FromIterator<(K, V)> for Answers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut answers = Answers::new();
        for (k, v) in iter {
            answers.set(k, v);
        }
        answers
    }
}

/// Per-project answer file
#[derive(Debug, Clone)]
pub struct AnswerStore {
    path: PathBuf,
}

impl AnswerStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store located in a project directory
    pub fn in_dir(dir: &Path, file_name: &str) -> Self {
        Self::new(dir.join(file_name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read previously saved answers; a missing file yields no answers
    pub fn load(&self) -> Result<Answers> {
        if !self.path.exists() {
            return Ok(Answers::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        if content.trim().is_empty() {
            return Ok(Answers::new());
        }
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Write each answer over the stored ones and save the result.
    ///
    /// Fails without touching the file when the stored answers cannot be read.
    pub fn save(&self, answers: &Answers) -> Result<()> {
        let mut stored = self.load()?;
        for (key, value) in answers.iter() {
            stored.set(key, value.clone());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(&stored).context("Failed to serialize answers")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnswerStore::in_dir(dir.path(), ".spring-init.yaml");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_value_shapes() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnswerStore::in_dir(dir.path(), ".spring-init.yaml");

        let mut answers = Answers::new();
        answers.set("groupId", "com.example");
        answers.set("javaVersion", "17");
        answers.set("dependencies", vec!["web".to_string(), "data-jpa".to_string()]);
        answers.set("extract", true);
        store.save(&answers).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.text("javaVersion"), Some("17"));
        assert_eq!(loaded.flag("extract"), Some(true));
        assert_eq!(
            loaded.list("dependencies"),
            Some(&["web".to_string(), "data-jpa".to_string()][..])
        );
        assert_eq!(loaded, answers);
    }

    #[test]
    fn test_save_merges_over_previous_answers() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnswerStore::in_dir(dir.path(), ".spring-init.yaml");

        store
            .save(&[("groupId", "org.old"), ("name", "legacy")].into_iter().collect())
            .unwrap();
        store
            .save(&[("groupId", "org.new")].into_iter().collect())
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.text("groupId"), Some("org.new"));
        assert_eq!(loaded.text("name"), Some("legacy"));
    }

    #[test]
    fn test_unreadable_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnswerStore::in_dir(dir.path(), ".spring-init.yaml");
        std::fs::write(store.path(), "groupId: [unclosed\n").unwrap();

        let err = store
            .save(&[("groupId", "com.example")].into_iter().collect())
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Failed to parse"));
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "groupId: [unclosed\n"
        );
    }

    #[test]
    fn test_empty_text_is_not_an_answer() {
        let answers: Answers = [("groupId", "")].into_iter().collect();
        assert!(answers.contains("groupId"));
        assert_eq!(answers.text("groupId"), None);
    }

    #[test]
    fn test_to_param() {
        assert_eq!(AnswerValue::from(true).to_param(), "true");
        assert_eq!(
            AnswerValue::from(vec!["web".to_string(), "h2".to_string()]).to_param(),
            "web,h2"
        );
        assert_eq!(AnswerValue::from("jar").to_param(), "jar");
    }
}
