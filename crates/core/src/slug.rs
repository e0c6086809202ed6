//! Slug rules shared by filenames and parent references.

/// Parent line value meaning "this node is a root".
pub const NO_PARENT: &str = "-";

/// Derive a filesystem-safe identifier from a display name.
///
/// Lowercases the input and collapses every run of characters outside
/// `[a-z0-9]` into a single `_`. Leading and trailing separators are dropped,
/// so `"  The Iron Hills! "` becomes `"the_iron_hills"`. Already-slugged input
/// comes back unchanged.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_sep = false;

    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }

    out
}

/// Best-effort display name for a slug: `north_reach` -> `North Reach`.
pub fn unslug(slug: &str) -> String {
    slug.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a parent reference to the slug it points at.
///
/// `-` and blank values mean "no parent". Path-style references such as
/// `/continents/edoras` resolve to their last segment.
pub fn parent_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NO_PARENT {
        return None;
    }

    let last = trimmed.rsplit('/').find(|segment| !segment.trim().is_empty())?;
    let slug = slugify(last);
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation_and_spaces() {
        assert_eq!(slugify("The Iron  Hills!"), "the_iron_hills");
        assert_eq!(slugify("  --Avelon--  "), "avelon");
        assert_eq!(slugify("Kael'thas"), "kael_thas");
        assert_eq!(slugify("Zone 51"), "zone_51");
    }

    #[test]
    fn slugify_of_nothing_useful_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn unslug_title_cases_words() {
        assert_eq!(unslug("north_reach"), "North Reach");
        assert_eq!(unslug("edoras"), "Edoras");
        assert_eq!(unslug(""), "");
    }

    #[test]
    fn parent_key_handles_sentinel_paths_and_names() {
        assert_eq!(parent_key("-"), None);
        assert_eq!(parent_key("   "), None);
        assert_eq!(parent_key("edoras"), Some("edoras".to_string()));
        assert_eq!(parent_key("Edoras"), Some("edoras".to_string()));
        assert_eq!(parent_key("/continents/edoras"), Some("edoras".to_string()));
        assert_eq!(parent_key("/continents/edoras/"), Some("edoras".to_string()));
        assert_eq!(parent_key("///"), None);
    }
}
