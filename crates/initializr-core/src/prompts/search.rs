//! Searchable, flattened view of the dependency catalog

use crate::catalog::ChoiceGroup;

/// One selectable dependency, labelled with its group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub display_name: String,
    pub id: String,
}

/// Dependencies of a hierarchical multi-select field, in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyIndex {
    entries: Vec<DependencyEntry>,
}

impl DependencyIndex {
    /// Flatten groups into entries named `"<group> <dependency>"`
    pub fn build(groups: &[ChoiceGroup]) -> Self {
        let entries = groups
            .iter()
            .flat_map(|group| {
                group.values.iter().map(move |choice| DependencyEntry {
                    display_name: format!("{} {}", group.name, choice.name),
                    id: choice.id.clone(),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[DependencyEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&DependencyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Entries whose display name matches `filter`, in build order
    pub fn search(&self, filter: &str) -> Vec<&DependencyEntry> {
        let needle = filter.trim().to_lowercase();
        if needle.is_empty() {
            return self.entries.iter().collect();
        }
        self.entries
            .iter()
            .filter(|e| fuzzy_match(&needle, &e.display_name.to_lowercase()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Substring match, else every needle char appears in order in the haystack
fn fuzzy_match(needle: &str, haystack: &str) -> bool {
    if haystack.contains(needle) {
        return true;
    }
    let mut rest = haystack.chars();
    needle
        .chars()
        .filter(|c| !c.is_whitespace())
        .all(|c| rest.any(|h| h == c))
}

/// Fold one search round into the running selection.
///
/// Ids shown in this round are replaced by `picked`; ids selected in earlier
/// rounds but not visible now are kept.
pub fn merge_selection(selected: &mut Vec<String>, visible: &[&DependencyEntry], picked: Vec<String>) {
    selected.retain(|id| !visible.iter().any(|e| &e.id == id));
    for id in picked {
        if !selected.contains(&id) {
            selected.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Choice;

    fn groups() -> Vec<ChoiceGroup> {
        vec![
            ChoiceGroup {
                name: "Web".to_string(),
                values: vec![Choice::new("web", "Starter")],
            },
            ChoiceGroup {
                name: "Data".to_string(),
                values: vec![Choice::new("jpa", "JPA")],
            },
        ]
    }

    fn catalog_like() -> DependencyIndex {
        DependencyIndex::build(&[
            ChoiceGroup {
                name: "Web".to_string(),
                values: vec![
                    Choice::new("web", "Spring Web"),
                    Choice::new("webflux", "Spring Reactive Web"),
                ],
            },
            ChoiceGroup {
                name: "SQL".to_string(),
                values: vec![
                    Choice::new("data-jpa", "Spring Data JPA"),
                    Choice::new("postgresql", "PostgreSQL Driver"),
                ],
            },
        ])
    }

    #[test]
    fn test_build_prefixes_group_names() {
        let index = DependencyIndex::build(&groups());
        assert_eq!(
            index.entries(),
            &[
                DependencyEntry {
                    display_name: "Web Starter".to_string(),
                    id: "web".to_string()
                },
                DependencyEntry {
                    display_name: "Data JPA".to_string(),
                    id: "jpa".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let index = catalog_like();
        let ids: Vec<&str> = index.search("").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["web", "webflux", "data-jpa", "postgresql"]);
        assert_eq!(index.search("   ").len(), 4);
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(catalog_like().search("kubernetes").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let index = catalog_like();
        let ids: Vec<&str> = index.search("REACTIVE").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["webflux"]);
    }

    #[test]
    fn test_search_matches_group_prefix() {
        let index = catalog_like();
        let ids: Vec<&str> = index.search("sql").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["data-jpa", "postgresql"]);
    }

    #[test]
    fn test_search_matches_characters_in_order() {
        let index = catalog_like();
        let ids: Vec<&str> = index.search("pgdrv").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["postgresql"]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let index = catalog_like();
        assert_eq!(index.search("web"), index.search("web"));
        assert_eq!(index, catalog_like());
    }

    #[test]
    fn test_merge_selection_replaces_visible_ids_only() {
        let index = catalog_like();
        let mut selected = vec!["web".to_string(), "data-jpa".to_string()];

        let visible = index.search("sql");
        merge_selection(&mut selected, &visible, vec!["postgresql".to_string()]);

        assert_eq!(selected, vec!["web".to_string(), "postgresql".to_string()]);
    }
}
