//! Stable reordering and dedup helpers used by the catalog and the
//! composition engine, plus the disable-list match policy.

/// Reorder `items` so that objects whose extracted key appears in `preferred`
/// come first, in `preferred` order; all remaining items follow in their
/// original relative order. Duplicate preferred keys keep the first
/// occurrence. The input slice is not mutated.
///
/// Used for groups (key = group id), for elements within a composition pass
/// (key = template id), and for seeding persisted palette order (key =
/// instance id).
pub fn order_by_keys<T, F>(items: &[T], preferred: &[String], key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> &str,
{
    let keys = unique(preferred.iter().cloned());
    let mut taken = vec![false; items.len()];
    let mut ordered = Vec::with_capacity(items.len());

    for wanted in &keys {
        for (i, item) in items.iter().enumerate() {
            if !taken[i] && key(item) == wanted {
                taken[i] = true;
                ordered.push(item.clone());
            }
        }
    }
    for (i, item) in items.iter().enumerate() {
        if !taken[i] {
            ordered.push(item.clone());
        }
    }
    ordered
}

/// First-occurrence dedup of an id list, preserving order.
pub fn unique(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Disable-list match policy: case-insensitive substring match of any
/// pattern against `id`. Empty patterns never match.
pub fn is_disabled(id: &str, patterns: &[String]) -> bool {
    let id = id.to_lowercase();
    patterns
        .iter()
        .filter(|p| !p.is_empty())
        .any(|p| id.contains(&p.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_order_by_keys_preferred_first() {
        let items = strings(&["checkbox", "button", "select"]);
        let ordered = order_by_keys(&items, &strings(&["button"]), |s| s.as_str());
        assert_eq!(ordered, strings(&["button", "checkbox", "select"]));
    }

    #[test]
    fn test_order_by_keys_keeps_relative_order_of_rest() {
        let items = strings(&["a", "b", "c", "d"]);
        let ordered = order_by_keys(&items, &strings(&["c", "a"]), |s| s.as_str());
        assert_eq!(ordered, strings(&["c", "a", "b", "d"]));
    }

    #[test]
    fn test_order_by_keys_ignores_unknown_and_duplicate_keys() {
        let items = strings(&["a", "b"]);
        let ordered = order_by_keys(&items, &strings(&["x", "b", "b"]), |s| s.as_str());
        assert_eq!(ordered, strings(&["b", "a"]));
    }

    #[test]
    fn test_order_by_keys_does_not_mutate_input() {
        let items = strings(&["a", "b"]);
        let _ = order_by_keys(&items, &strings(&["b"]), |s| s.as_str());
        assert_eq!(items, strings(&["a", "b"]));
    }

    #[test]
    fn test_unique_keeps_first_occurrence() {
        let deduped = unique(strings(&["common", "html", "common", "layout"]));
        assert_eq!(deduped, strings(&["common", "html", "layout"]));
    }

    #[test]
    fn test_is_disabled_case_insensitive_substring() {
        let patterns = strings(&["HTML", "divider"]);
        assert!(is_disabled("html", &patterns));
        assert!(is_disabled("divider", &patterns));
        assert!(!is_disabled("checkbox", &patterns));
    }

    #[test]
    fn test_is_disabled_empty_pattern_never_matches() {
        assert!(!is_disabled("anything", &strings(&[""])));
        assert!(!is_disabled("anything", &[]));
    }
}
