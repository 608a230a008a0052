/// Derive the public slug of a post title.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen and drops hyphens at either end.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Public slug of a post: the title slug, or the post id when the title has
/// no ASCII letters or digits at all.
pub fn post_slug(title: &str, post_id: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        post_id.to_string()
    } else {
        slug
    }
}

/// Normalized form used to detect duplicate titles: lowercase ASCII letters only.
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}
