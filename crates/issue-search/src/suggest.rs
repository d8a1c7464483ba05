//! "Did you mean" hints for names the query vocabulary does not accept.

use strsim::levenshtein;

/// Largest case-folded edit distance that still earns a hint.
const MAX_HINT_DISTANCE: usize = 3;

/// Picks the accepted name closest to `input`, if any is close enough.
///
/// Names are matched case-sensitively, so a hint is offered whenever `input`
/// is not itself accepted. `Resolved` yields `resolved` even though the two
/// only differ in case. Candidates are ranked by case-folded distance first
/// and exact-case distance second.
pub(crate) fn closest_name<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let folded_input = input.to_lowercase();
    let mut best: Option<(&'a str, usize, usize)> = None;

    for name in candidates {
        if name == input {
            return None;
        }
        if name.is_empty() {
            continue;
        }

        let folded = levenshtein(&folded_input, &name.to_lowercase());
        if folded > MAX_HINT_DISTANCE {
            continue;
        }
        let exact = levenshtein(input, name);
        if best.map_or(true, |(_, f, e)| (folded, exact) < (f, e)) {
            best = Some((name, folded, exact));
        }
    }

    best.map(|(name, _, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUSES: [&str; 3] = ["resolved", "unresolved", "ignored"];

    #[test]
    fn test_hint_for_typo() {
        assert_eq!(closest_name("resovled", STATUSES), Some("resolved"));
        assert_eq!(closest_name("ignord", STATUSES), Some("ignored"));
    }

    #[test]
    fn test_hint_for_case_only_difference() {
        assert_eq!(closest_name("Resolved", STATUSES), Some("resolved"));
        assert_eq!(closest_name("UNRESOLVED", STATUSES), Some("unresolved"));
    }

    #[test]
    fn test_exact_case_breaks_ties() {
        let names = ["muted", "Muted"];
        assert_eq!(closest_name("MUTED", names), Some("Muted"));
        assert_eq!(closest_name("mutd", names), Some("muted"));
    }

    #[test]
    fn test_no_hint_for_accepted_name() {
        assert_eq!(closest_name("resolved", STATUSES), None);
    }

    #[test]
    fn test_no_hint_for_distant_name() {
        assert_eq!(closest_name("banana", STATUSES), None);
    }

    #[test]
    fn test_no_hint_without_candidates() {
        assert_eq!(closest_name("x", []), None);
        assert_eq!(closest_name("x", [""]), None);
    }
}
