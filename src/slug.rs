//! Slug derivation for post identifiers.

use std::path::Path;

/// Lowercase `text`, transliterating non-ASCII letters and collapsing every
/// run of other characters into a single hyphen. Leading and trailing
/// hyphens are dropped.
pub fn slugify(text: &str) -> String {
    ::slug::slugify(text)
}

/// Slug for a source document, taken from its file stem.
///
/// Returns `None` when the stem yields an empty slug (e.g. `___.md`).
pub fn slug_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let slug = slugify(stem);
    (!slug.is_empty()).then_some(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("hello_world"), "hello-world");
    }

    #[test]
    fn collapses_runs_and_trims_edges() {
        assert_eq!(slugify("  --Rust: 2024 -- Edition!!  "), "rust-2024-edition");
        assert_eq!(slugify("a...b"), "a-b");
    }

    #[test]
    fn non_ascii_is_transliterated() {
        assert_eq!(slugify("café au lait"), "cafe-au-lait");
        assert_eq!(slugify("Über Straße"), "uber-strasse");

        let hanzi = slugify("你好");
        assert!(!hanzi.is_empty());
        assert!(hanzi.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-'));
    }

    #[test]
    fn already_slugged_text_is_unchanged() {
        assert_eq!(slugify("hello-world-2"), "hello-world-2");
    }

    #[test]
    fn slug_from_path_uses_file_stem() {
        assert_eq!(
            slug_from_path(&PathBuf::from("content/posts/Hello World.md")).as_deref(),
            Some("hello-world")
        );
        assert_eq!(
            slug_from_path(&PathBuf::from("content/posts/hello_world.md")).as_deref(),
            Some("hello-world")
        );
        assert_eq!(slug_from_path(&PathBuf::from("content/posts/___.md")), None);
    }
}
