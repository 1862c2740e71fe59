//! Query-variant generation for catalog lookups.
//!
//! The catalog is strict about how trailing qualifiers (`ex`, `gx`, `v`, ...)
//! and ampersands in set names are written, so a single card name expands to
//! an ordered list of query strings. Order matters: the resolver stops at the
//! first variant that returns anything.

use std::sync::LazyLock;

use regex::Regex;

use crate::card::SetHint;

/// Trailing qualifier tokens that the catalog writes inconsistently.
const QUALIFIERS: &[&str] = &["ex", "gx", "v", "vmax", "vstar"];

/// `<base><space or hyphen><qualifier>` at the end of a lower-cased name.
static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = QUALIFIERS.join("|");
    Regex::new(&format!(r"^(?P<base>.+?)[\s-]+(?P<suffix>{alternatives})$"))
        .expect("qualifier pattern is valid")
});

/// Ordered name variants for a trimmed, non-empty card name.
///
/// The exact (lower-cased) name always comes first, followed by the
/// space-separated, hyphenated and concatenated qualifier forms when the
/// name ends in a known qualifier. Duplicates are dropped, keeping the
/// earliest position.
pub fn name_variants(name: &str) -> Vec<String> {
    let exact = name.trim().to_lowercase();
    let mut variants = vec![exact.clone()];

    if let Some(caps) = QUALIFIED_NAME.captures(&exact) {
        let base = caps["base"].trim_end();
        let suffix = &caps["suffix"];
        for candidate in [
            format!("{base} {suffix}"),
            format!("{base}-{suffix}"),
            format!("{base}{suffix}"),
        ] {
            push_unique(&mut variants, candidate);
        }
    }

    variants
}

/// Ordered set-filter fragments for a set hint.
///
/// A set name yields the literal form first and the `&` → `and` form second
/// (only when it differs). A set id yields a single fragment.
pub fn set_filters(hint: &SetHint) -> Vec<String> {
    match hint {
        SetHint::Name(name) => {
            let literal = name.trim().to_string();
            let mut filters = vec![format!("set.name:\"{}\"", escape(&literal))];
            let spelled = literal.replace('&', "and");
            push_unique(&mut filters, format!("set.name:\"{}\"", escape(&spelled)));
            filters
        }
        SetHint::Id(id) => vec![format!("set.id:\"{}\"", escape(id.trim()))],
    }
}

/// Build every catalog query for a name and optional set hint.
///
/// Name variants form the outer loop and set filters the inner loop, so all
/// set filters are tried for the first name variant before the second name
/// variant is considered.
pub fn build_queries(name: &str, set_hint: Option<&SetHint>) -> Vec<String> {
    let names = name_variants(name);
    let Some(hint) = set_hint else {
        return names.iter().map(|n| name_filter(n)).collect();
    };

    let sets = set_filters(hint);
    names
        .iter()
        .flat_map(|n| sets.iter().map(move |s| format!("{} {s}", name_filter(n))))
        .collect()
}

fn name_filter(name: &str) -> String {
    format!("name:\"{}\"", escape(name))
}

/// Escape embedded double quotes for the catalog's query language.
fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

fn push_unique(list: &mut Vec<String>, candidate: String) {
    if !list.contains(&candidate) {
        list.push(candidate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_has_single_variant() {
        assert_eq!(name_variants("  Charizard "), vec!["charizard"]);
    }

    #[test]
    fn space_qualifier_keeps_exact_form_first() {
        assert_eq!(
            name_variants("Blastoise ex"),
            vec!["blastoise ex", "blastoise-ex", "blastoiseex"]
        );
    }

    #[test]
    fn hyphen_qualifier_tries_space_form_next() {
        assert_eq!(
            name_variants("Mewtwo-GX"),
            vec!["mewtwo-gx", "mewtwo gx", "mewtwogx"]
        );
    }

    #[test]
    fn words_ending_in_ex_are_not_split() {
        assert_eq!(name_variants("Vortex"), vec!["vortex"]);
    }

    #[test]
    fn ampersand_literal_before_spelled_out() {
        assert_eq!(
            set_filters(&SetHint::Name("Scarlet & Violet".into())),
            vec![
                "set.name:\"Scarlet & Violet\"",
                "set.name:\"Scarlet and Violet\"",
            ]
        );
    }

    #[test]
    fn set_without_ampersand_has_one_filter() {
        assert_eq!(
            set_filters(&SetHint::Name("Base Set".into())),
            vec!["set.name:\"Base Set\""]
        );
        assert_eq!(
            set_filters(&SetHint::Id("sv3pt5".into())),
            vec!["set.id:\"sv3pt5\""]
        );
    }

    #[test]
    fn name_loop_is_outer_and_set_loop_inner() {
        let queries = build_queries(
            "Pikachu ex",
            Some(&SetHint::Name("Scarlet & Violet".into())),
        );
        assert_eq!(
            queries,
            vec![
                "name:\"pikachu ex\" set.name:\"Scarlet & Violet\"",
                "name:\"pikachu ex\" set.name:\"Scarlet and Violet\"",
                "name:\"pikachu-ex\" set.name:\"Scarlet & Violet\"",
                "name:\"pikachu-ex\" set.name:\"Scarlet and Violet\"",
                "name:\"pikachuex\" set.name:\"Scarlet & Violet\"",
                "name:\"pikachuex\" set.name:\"Scarlet and Violet\"",
            ]
        );
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(
            build_queries("Farfetch\"d", None),
            vec!["name:\"farfetch\\\"d\""]
        );
    }
}
