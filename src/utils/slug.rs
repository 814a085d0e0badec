use rand::{distributions::Alphanumeric, Rng};

const MAX_BASE_LENGTH: usize = 32;
const TOKEN_LENGTH: usize = 11;

/// Builds an article slug from its title.
///
/// The random suffix makes collisions unlikely but not impossible: nothing
/// checks the generated value against existing slugs, so a collision surfaces
/// as a unique constraint failure on insert.
pub fn generate_slug(title: &str) -> String {
    let mut base = ::slug::slugify(title);
    // slugify only emits ASCII, any byte index is a char boundary
    base.truncate(MAX_BASE_LENGTH);
    let base = base.trim_end_matches('-');

    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();

    if base.is_empty() {
        token
    } else {
        format!("{base}-{token}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_derived_from_title() {
        let slug = generate_slug("Hello, World!");
        assert!(slug.starts_with("hello-world-"), "{slug}");
        assert_eq!(slug.len(), "hello-world-".len() + TOKEN_LENGTH);
    }

    #[test]
    fn long_titles_are_truncated() {
        let slug = generate_slug(&"word ".repeat(40));
        let (base, token) = slug.rsplit_once('-').unwrap();
        assert!(base.len() <= MAX_BASE_LENGTH);
        assert!(!base.ends_with('-'));
        assert_eq!(token.len(), TOKEN_LENGTH);
    }

    #[test]
    fn same_title_gives_different_slugs() {
        assert_ne!(generate_slug("Hello"), generate_slug("Hello"));
    }

    #[test]
    fn title_without_letters_still_gets_a_slug() {
        let slug = generate_slug("!!!");
        assert_eq!(slug.len(), TOKEN_LENGTH);
    }
}
