use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SortKey;
use crate::store::Storage;
use crate::validate;
use crate::vault::Vault;

/// View parameters for the catalogue listing.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub pattern: Option<String>,
    pub case_sensitive: bool,
    pub tag: Option<String>,
    pub sort: Option<String>,
}

/// Apply the view parameters to the vault's query state and return the
/// filtered-then-sorted projection. A pattern the engine rejects degrades
/// to "no pattern" with a warning; it never aborts the listing.
pub fn run<S: Storage>(vault: &mut Vault<S>, query: ListQuery) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if let Some(raw) = &query.pattern {
        let check = validate::validate_regex_pattern(raw);
        if check.valid {
            vault.set_search_pattern(validate::compile_regex(raw, query.case_sensitive));
        } else {
            result.add_message(CmdMessage::warning(check.message));
            vault.set_search_pattern(None);
        }
    }

    if let Some(tag) = &query.tag {
        vault.set_tag_filter(tag.clone());
    }

    if let Some(sort) = &query.sort {
        match SortKey::parse(sort) {
            Some(key) => vault.set_sort_key(Some(key)),
            None => {
                result.add_message(CmdMessage::warning(format!(
                    "Unknown sort key \"{sort}\", keeping current order."
                )));
                vault.set_sort_key(None);
            }
        }
    }

    let listed: Vec<_> = vault.query().into_iter().cloned().collect();
    let total = vault.records().len();
    if !listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "Showing {} of {} book{}",
            listed.len(),
            total,
            if total == 1 { "" } else { "s" }
        )));
    }

    Ok(result.with_records(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::store::memory::InMemoryStore;
    use crate::validate::RawFields;

    fn seed(vault: &mut Vault<InMemoryStore>, title: &str, author: &str, tag: &str, date: &str) {
        add::run(
            vault,
            RawFields {
                title: title.into(),
                author: author.into(),
                pages: "100".into(),
                date_added: date.into(),
                tag: tag.into(),
                isbn: String::new(),
                notes: String::new(),
            },
        )
        .unwrap();
    }

    #[test]
    fn filters_by_pattern_across_fields() {
        let mut vault = Vault::open(InMemoryStore::new());
        seed(&mut vault, "Dune", "Frank Herbert", "Sci-Fi", "2024-01-01");
        seed(&mut vault, "Emma", "Jane Austen", "Classic", "2024-01-02");

        let result = run(
            &mut vault,
            ListQuery {
                pattern: Some("herbert".into()),
                ..ListQuery::default()
            },
        )
        .unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].title, "Dune");
    }

    #[test]
    fn case_sensitive_pattern_respects_case() {
        let mut vault = Vault::open(InMemoryStore::new());
        seed(&mut vault, "Dune", "Frank Herbert", "Sci-Fi", "2024-01-01");

        let result = run(
            &mut vault,
            ListQuery {
                pattern: Some("herbert".into()),
                case_sensitive: true,
                ..ListQuery::default()
            },
        )
        .unwrap();
        assert!(result.records.is_empty());
    }

    #[test]
    fn invalid_pattern_degrades_to_no_filter() {
        let mut vault = Vault::open(InMemoryStore::new());
        seed(&mut vault, "Dune", "Frank Herbert", "Sci-Fi", "2024-01-01");

        let result = run(
            &mut vault,
            ListQuery {
                pattern: Some("[unclosed".into()),
                ..ListQuery::default()
            },
        )
        .unwrap();
        assert_eq!(result.records.len(), 1);
        assert!(result
            .messages
            .iter()
            .any(|m| m.content.starts_with("Invalid regex")));
    }

    #[test]
    fn tag_filter_is_exact() {
        let mut vault = Vault::open(InMemoryStore::new());
        seed(&mut vault, "Dune", "Frank Herbert", "Sci-Fi", "2024-01-01");
        seed(&mut vault, "Emma", "Jane Austen", "Classic", "2024-01-02");

        let result = run(
            &mut vault,
            ListQuery {
                tag: Some("Classic".into()),
                ..ListQuery::default()
            },
        )
        .unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].title, "Emma");
    }

    #[test]
    fn sorts_by_requested_key() {
        let mut vault = Vault::open(InMemoryStore::new());
        seed(&mut vault, "Zebra", "Author One", "Fiction", "2024-01-01");
        seed(&mut vault, "apple", "Author Two", "Fiction", "2024-01-02");

        let result = run(
            &mut vault,
            ListQuery {
                sort: Some("title-asc".into()),
                ..ListQuery::default()
            },
        )
        .unwrap();
        let titles: Vec<&str> = result.records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["apple", "Zebra"]);
    }
}
