//! Post validation rules shared by create and update.

use crate::error::{DomainError, DomainResult};

pub const MIN_WORDS: usize = 100;
pub const MAX_WORDS: usize = 3000;
pub const MAX_TAGS: usize = 4;

/// Number of whitespace-separated words in `content`.
pub fn word_count(content: &str) -> usize {
    content.split_whitespace().count()
}

pub fn validate_content(content: &str) -> DomainResult<()> {
    let words = word_count(content);
    if words < MIN_WORDS {
        return Err(DomainError::validation(format!(
            "Content must be at least {MIN_WORDS} words"
        )));
    }
    if words > MAX_WORDS {
        return Err(DomainError::validation(format!(
            "Content must not exceed {MAX_WORDS} words"
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("Title is required"));
    }
    Ok(())
}

/// Trim tags, drop blanks and repeats (first occurrence wins), then enforce the limit.
pub fn normalize_tags(tags: Vec<String>) -> DomainResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() || normalized.iter().any(|t| t == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }

    if normalized.len() > MAX_TAGS {
        return Err(DomainError::validation(format!(
            "Maximum {MAX_TAGS} tags allowed"
        )));
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[rstest]
    #[case(0, false)]
    #[case(99, false)]
    #[case(100, true)]
    #[case(3000, true)]
    #[case(3001, false)]
    fn content_word_bounds(#[case] n: usize, #[case] ok: bool) {
        assert_eq!(validate_content(&words(n)).is_ok(), ok);
    }

    #[test]
    fn word_count_ignores_whitespace_runs() {
        assert_eq!(word_count("  one\n\ntwo\t three  "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn tags_are_trimmed_and_deduplicated() {
        let tags = normalize_tags(vec![
            " rust ".to_string(),
            "".to_string(),
            "redis".to_string(),
            "rust".to_string(),
        ])
        .unwrap();
        assert_eq!(tags, vec!["rust".to_string(), "redis".to_string()]);
    }

    #[test]
    fn five_distinct_tags_are_rejected() {
        let tags = ["a", "b", "c", "d", "e"].map(String::from).to_vec();
        assert!(matches!(
            normalize_tags(tags),
            Err(DomainError::Validation(_))
        ));
    }

    #[rstest]
    #[case("  ", false)]
    #[case("Ok 1", true)]
    #[case("???", true)]
    #[case("Привет мир", true)]
    fn title_must_not_be_blank(#[case] title: &str, #[case] ok: bool) {
        assert_eq!(validate_title(title).is_ok(), ok);
    }
}
