//! Prompt schema built from the option catalog
//!
//! Every supported catalog field becomes one `PromptSpec`. Text fields come
//! first, then single-select fields, then multi-select fields, each group in
//! catalog order. The toolchain, format and extract questions are not part
//! of the catalog and always close the sequence.

use super::search::DependencyIndex;
use crate::answers::{AnswerValue, Answers};
use crate::catalog::{Choice, OptionCatalog, OptionField};

pub const TOOLCHAIN_KEY: &str = "toolchain";
pub const FORMAT_KEY: &str = "format";
pub const EXTRACT_KEY: &str = "extract";
pub const PACKAGE_NAME_KEY: &str = "packageName";
pub const GROUP_ID_KEY: &str = "groupId";
pub const ARTIFACT_ID_KEY: &str = "artifactId";

/// Format value for a full project archive
pub const FORMAT_PROJECT: &str = "project";
/// Format value for a lone build descriptor
pub const FORMAT_BUILD: &str = "build";

/// Human-readable messages for well-known catalog keys
const LABELS: &[(&str, &str)] = &[
    ("packaging", "How do you want your app to be packaged?"),
    ("javaVersion", "Which Java version do you want to use?"),
    ("language", "Which language do you want to use?"),
    ("bootVersion", "Which Spring Boot version do you want to use?"),
    ("groupId", "What's your group ID?"),
    ("artifactId", "What's your artifact ID?"),
    ("version", "What version do you want to start at?"),
    ("name", "What's the name of your app?"),
    ("description", "Describe your app in a few words:"),
    ("packageName", "Your app's package name will be as follows:"),
    ("dependencies", "Pick and choose the dependencies you want to use:"),
];

/// Message shown for a catalog key
pub fn label_for(key: &str) -> String {
    LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| key.to_string())
}

/// How a prompt is presented
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Free-text input
    Text,
    /// Single choice from a list
    Select { choices: Vec<Choice> },
    /// Multiple choices, narrowed by searching the bound index
    Search { index: DependencyIndex },
    /// Yes/no question
    Confirm,
}

/// How the default answer is determined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultRule {
    Fixed(AnswerValue),
    /// Package name derived from the group and artifact ids
    PackageName {
        /// Derived from the persisted group and artifact ids
        persisted: Option<String>,
        catalog: String,
    },
}

/// When a prompt is asked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    Always,
    /// Only when an earlier answer has the given text value
    WhenEquals {
        key: &'static str,
        value: &'static str,
    },
}

/// One question to put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub key: String,
    pub message: String,
    pub kind: PromptKind,
    pub default: DefaultRule,
    pub when: Applicability,
}

impl PromptSpec {
    /// Whether this prompt applies given the answers collected so far
    pub fn is_applicable(&self, answers: &Answers) -> bool {
        match &self.when {
            Applicability::Always => true,
            Applicability::WhenEquals { key, value } => answers.text(key) == Some(*value),
        }
    }

    /// Default answer given the answers collected so far
    pub fn default_value(&self, answers: &Answers) -> AnswerValue {
        match &self.default {
            DefaultRule::Fixed(value) => match &self.kind {
                PromptKind::Select { choices } => select_default(value, choices),
                _ => value.clone(),
            },
            DefaultRule::PackageName { persisted, catalog } => derive_package_name(answers)
                .or_else(|| persisted.clone())
                .unwrap_or_else(|| catalog.clone())
                .into(),
        }
    }
}

/// The given choice when the list offers it, else the first choice
fn select_default(value: &AnswerValue, choices: &[Choice]) -> AnswerValue {
    match value.as_text() {
        Some(id) if choices.iter().any(|c| c.id == id) => value.clone(),
        _ => choices
            .first()
            .map(|c| AnswerValue::Text(c.id.clone()))
            .unwrap_or_else(|| value.clone()),
    }
}

/// `groupId.artifactId` from whichever of the two is answered
fn derive_package_name(answers: &Answers) -> Option<String> {
    let parts: Vec<&str> = [GROUP_ID_KEY, ARTIFACT_ID_KEY]
        .iter()
        .filter_map(|key| answers.text(key))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("."))
    }
}

/// Turn a catalog into the ordered prompt sequence.
///
/// `persisted` holds answers from a previous run; they take precedence over
/// catalog defaults.
pub fn build_prompts(catalog: &OptionCatalog, persisted: &Answers) -> Vec<PromptSpec> {
    let mut prompts = Vec::new();

    for (key, field) in catalog.fields() {
        if let OptionField::Text { default } = field {
            prompts.push(text_prompt(key, default, persisted));
        }
    }

    for (key, field) in catalog.fields() {
        if let OptionField::SingleSelect { default, values } = field {
            prompts.push(PromptSpec {
                key: key.to_string(),
                message: label_for(key),
                kind: PromptKind::Select {
                    choices: values.clone(),
                },
                default: DefaultRule::Fixed(persisted_or(persisted, key, default)),
                when: Applicability::Always,
            });
        }
    }

    for (key, field) in catalog.fields() {
        if let OptionField::HierarchicalMultiSelect { values } = field {
            let selection = persisted.list(key).map(<[String]>::to_vec).unwrap_or_default();
            prompts.push(PromptSpec {
                key: key.to_string(),
                message: label_for(key),
                kind: PromptKind::Search {
                    index: DependencyIndex::build(values),
                },
                default: DefaultRule::Fixed(AnswerValue::List(selection)),
                when: Applicability::Always,
            });
        }
    }

    prompts.push(PromptSpec {
        key: TOOLCHAIN_KEY.to_string(),
        message: "Which toolchain do you want to use?".to_string(),
        kind: PromptKind::Select {
            choices: vec![Choice::new("gradle", "Gradle"), Choice::new("maven", "Maven")],
        },
        default: DefaultRule::Fixed(persisted_or(persisted, TOOLCHAIN_KEY, "gradle")),
        when: Applicability::Always,
    });

    prompts.push(PromptSpec {
        key: FORMAT_KEY.to_string(),
        message: "In which format do you want to download your app?".to_string(),
        kind: PromptKind::Select {
            choices: vec![
                Choice::new(FORMAT_PROJECT, "Project archive file (ZIP)"),
                Choice::new(FORMAT_BUILD, "Build descriptor file"),
            ],
        },
        default: DefaultRule::Fixed(persisted_or(persisted, FORMAT_KEY, FORMAT_PROJECT)),
        when: Applicability::Always,
    });

    prompts.push(PromptSpec {
        key: EXTRACT_KEY.to_string(),
        message: "Do you want to extract/initialise the project after downloading?".to_string(),
        kind: PromptKind::Confirm,
        default: DefaultRule::Fixed(AnswerValue::Flag(
            persisted.flag(EXTRACT_KEY).unwrap_or(true),
        )),
        when: Applicability::WhenEquals {
            key: FORMAT_KEY,
            value: FORMAT_PROJECT,
        },
    });

    prompts
}

fn text_prompt(key: &str, catalog_default: &str, persisted: &Answers) -> PromptSpec {
    let default = match persisted.text(key) {
        Some(value) => DefaultRule::Fixed(value.into()),
        None if key == PACKAGE_NAME_KEY => DefaultRule::PackageName {
            persisted: derive_package_name(persisted),
            catalog: catalog_default.to_string(),
        },
        None => DefaultRule::Fixed(catalog_default.into()),
    };

    PromptSpec {
        key: key.to_string(),
        message: label_for(key),
        kind: PromptKind::Text,
        default,
        when: Applicability::Always,
    }
}

fn persisted_or(persisted: &Answers, key: &str, fallback: &str) -> AnswerValue {
    persisted.text(key).unwrap_or(fallback).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ChoiceGroup;

    fn catalog() -> OptionCatalog {
        OptionCatalog::from_fields(vec![
            (
                "dependencies",
                OptionField::HierarchicalMultiSelect {
                    values: vec![ChoiceGroup {
                        name: "Web".to_string(),
                        values: vec![Choice::new("web", "Spring Web")],
                    }],
                },
            ),
            (
                "packaging",
                OptionField::SingleSelect {
                    default: "jar".to_string(),
                    values: vec![Choice::new("jar", "Jar"), Choice::new("war", "War")],
                },
            ),
            (
                "groupId",
                OptionField::Text {
                    default: "com.example".to_string(),
                },
            ),
            (
                "language",
                OptionField::SingleSelect {
                    default: "java".to_string(),
                    values: vec![Choice::new("java", "Java"), Choice::new("kotlin", "Kotlin")],
                },
            ),
            (
                "artifactId",
                OptionField::Text {
                    default: "demo".to_string(),
                },
            ),
            (
                "packageName",
                OptionField::Text {
                    default: "com.example.demo".to_string(),
                },
            ),
            (
                "customField",
                OptionField::Text {
                    default: String::new(),
                },
            ),
        ])
    }

    fn keys(prompts: &[PromptSpec]) -> Vec<&str> {
        prompts.iter().map(|p| p.key.as_str()).collect()
    }

    fn find<'a>(prompts: &'a [PromptSpec], key: &str) -> &'a PromptSpec {
        prompts.iter().find(|p| p.key == key).unwrap()
    }

    #[test]
    fn test_prompt_order_groups_by_kind() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        assert_eq!(
            keys(&prompts),
            vec![
                "groupId",
                "artifactId",
                "packageName",
                "customField",
                "packaging",
                "language",
                "dependencies",
                "toolchain",
                "format",
                "extract",
            ]
        );
    }

    #[test]
    fn test_one_text_prompt_per_text_field() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        let text: Vec<&str> = prompts
            .iter()
            .filter(|p| p.kind == PromptKind::Text)
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(text, vec!["groupId", "artifactId", "packageName", "customField"]);
    }

    #[test]
    fn test_messages_use_label_table_or_raw_key() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        assert_eq!(find(&prompts, "groupId").message, "What's your group ID?");
        assert_eq!(find(&prompts, "customField").message, "customField");
    }

    #[test]
    fn test_single_select_copies_choices_in_order() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        assert_eq!(
            find(&prompts, "packaging").kind,
            PromptKind::Select {
                choices: vec![Choice::new("jar", "Jar"), Choice::new("war", "War")]
            }
        );
    }

    #[test]
    fn test_persisted_answers_override_catalog_defaults() {
        let persisted: Answers = [("groupId", "org.acme"), ("packaging", "war")]
            .into_iter()
            .collect();
        let prompts = build_prompts(&catalog(), &persisted);
        let none = Answers::new();

        assert_eq!(find(&prompts, "groupId").default_value(&none), AnswerValue::from("org.acme"));
        assert_eq!(find(&prompts, "packaging").default_value(&none), AnswerValue::from("war"));
        assert_eq!(find(&prompts, "language").default_value(&none), AnswerValue::from("java"));
    }

    #[test]
    fn test_stale_persisted_choice_falls_back_to_first_choice() {
        let persisted: Answers = [("packaging", "ear"), ("toolchain", "ant")]
            .into_iter()
            .collect();
        let prompts = build_prompts(&catalog(), &persisted);
        let none = Answers::new();

        assert_eq!(find(&prompts, "packaging").default_value(&none), AnswerValue::from("jar"));
        assert_eq!(find(&prompts, "toolchain").default_value(&none), AnswerValue::from("gradle"));
    }

    #[test]
    fn test_package_name_derived_from_persisted_ids() {
        let persisted: Answers = [("groupId", "com.example"), ("artifactId", "demo")]
            .into_iter()
            .collect();
        let prompts = build_prompts(&catalog(), &persisted);

        assert_eq!(
            find(&prompts, "packageName").default_value(&Answers::new()),
            AnswerValue::Text("com.example.demo".to_string())
        );
    }

    #[test]
    fn test_package_name_follows_answers_given_this_run() {
        let persisted: Answers = [("groupId", "com.example"), ("artifactId", "demo")]
            .into_iter()
            .collect();
        let prompts = build_prompts(&catalog(), &persisted);
        let current: Answers = [("groupId", "io.acme"), ("artifactId", "shop")]
            .into_iter()
            .collect();

        assert_eq!(
            find(&prompts, "packageName").default_value(&current),
            AnswerValue::from("io.acme.shop")
        );
    }

    #[test]
    fn test_package_name_from_single_known_id() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        let package_name = find(&prompts, "packageName");

        let group_only: Answers = [("groupId", "io.acme")].into_iter().collect();
        assert_eq!(
            package_name.default_value(&group_only),
            AnswerValue::from("io.acme")
        );

        let artifact_only: Answers = [("groupId", ""), ("artifactId", "shop")]
            .into_iter()
            .collect();
        assert_eq!(
            package_name.default_value(&artifact_only),
            AnswerValue::from("shop")
        );
    }

    #[test]
    fn test_persisted_package_name_wins() {
        let persisted: Answers = [("packageName", "net.fixed"), ("groupId", "com.example")]
            .into_iter()
            .collect();
        let prompts = build_prompts(&catalog(), &persisted);
        let current: Answers = [("groupId", "io.acme")].into_iter().collect();

        assert_eq!(
            find(&prompts, "packageName").default_value(&current),
            AnswerValue::from("net.fixed")
        );
    }

    #[test]
    fn test_package_name_falls_back_to_catalog() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        assert_eq!(
            find(&prompts, "packageName").default_value(&Answers::new()),
            AnswerValue::from("com.example.demo")
        );
    }

    #[test]
    fn test_dependencies_bound_to_index() {
        let persisted: Answers = [("dependencies", vec!["web".to_string()])]
            .into_iter()
            .collect();
        let prompts = build_prompts(&catalog(), &persisted);
        let deps = find(&prompts, "dependencies");

        match &deps.kind {
            PromptKind::Search { index } => {
                assert_eq!(index.entries()[0].display_name, "Web Spring Web");
            }
            other => panic!("unexpected kind: {:?}", other),
        }
        assert_eq!(
            deps.default_value(&Answers::new()),
            AnswerValue::List(vec!["web".to_string()])
        );
    }

    #[test]
    fn test_dependencies_default_to_empty_selection() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        assert_eq!(
            find(&prompts, "dependencies").default_value(&Answers::new()),
            AnswerValue::List(Vec::new())
        );
    }

    #[test]
    fn test_builtin_prompts_have_fixed_choices() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        assert_eq!(
            find(&prompts, "toolchain").kind,
            PromptKind::Select {
                choices: vec![Choice::new("gradle", "Gradle"), Choice::new("maven", "Maven")]
            }
        );
        assert_eq!(find(&prompts, "extract").kind, PromptKind::Confirm);
    }

    #[test]
    fn test_extract_only_applies_to_project_format() {
        let prompts = build_prompts(&catalog(), &Answers::new());
        let extract = find(&prompts, "extract");

        let project: Answers = [("format", FORMAT_PROJECT)].into_iter().collect();
        let build: Answers = [("format", FORMAT_BUILD)].into_iter().collect();

        assert!(extract.is_applicable(&project));
        assert!(!extract.is_applicable(&build));
        assert!(!extract.is_applicable(&Answers::new()));
        assert!(find(&prompts, "format").is_applicable(&build));
    }

    #[test]
    fn test_empty_catalog_still_asks_builtin_questions() {
        let prompts = build_prompts(&OptionCatalog::default(), &Answers::new());
        assert_eq!(keys(&prompts), vec!["toolchain", "format", "extract"]);
    }
}
