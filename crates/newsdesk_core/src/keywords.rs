use std::collections::HashSet;

/// Trims every keyword, drops empty entries and removes duplicates.
///
/// Comparison is case-sensitive and the first occurrence wins, so the input
/// order is preserved.
pub fn normalize_keywords<I, S>(keywords: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();
    for keyword in keywords {
        let trimmed = keyword.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            normalized.push(trimmed.to_string());
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::normalize_keywords;

    #[test]
    fn trims_and_drops_empty() {
        let out = normalize_keywords(["  beauty ", "", "   ", "cosmetics"]);
        assert_eq!(out, vec!["beauty", "cosmetics"]);
    }

    #[test]
    fn dedupe_is_case_sensitive_and_keeps_first() {
        let out = normalize_keywords(["Beauty", "beauty", " Beauty", "pet food", "Beauty "]);
        assert_eq!(out, vec!["Beauty", "beauty", "pet food"]);
    }
}
