// Loose-matching string forms used by the resolver and suggestions

/// Characters replaced by a space before loose comparison.
/// `&` and `'` are intentionally absent: "AP & AR" keeps its ampersand.
pub const PUNCTUATION: &[char] = &['-', '_', '/', '\\', '.', ',', ':', ';', '(', ')', '[', ']', '|'];

/// Lowercase, punctuation to spaces, whitespace runs collapsed, trimmed.
pub fn normalize(input: &str) -> String {
    let lowered: String = input
        .to_lowercase()
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized form joined with hyphens.
pub fn slugify(input: &str) -> String {
    normalize(input).replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  OKR / Performance   Scorecard "), "okr performance scorecard");
        assert_eq!(normalize("company-kpi"), "company kpi");
        assert_eq!(normalize("Sales_Targets.(FY25)"), "sales targets fy25");
        assert_eq!(normalize("\tA\n\nB "), "a b");
        assert_eq!(normalize("---"), "");
    }

    #[test]
    fn test_ampersand_and_apostrophe_are_kept() {
        assert_eq!(normalize("Risk & Compliance"), "risk & compliance");
        assert_eq!(normalize("AP&AR"), "ap&ar");
        assert_eq!(normalize("Owner's View"), "owner's view");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Company KPI Dashboard"), "company-kpi-dashboard");
        assert_eq!(slugify("company-kpi"), "company-kpi");
        assert_eq!(slugify("Budget vs. Actual"), "budget-vs-actual");
        assert_eq!(slugify(""), "");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "\\PC{0,40}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn normalized_output_has_no_stripped_punctuation(s in "[a-zA-Z0-9 &'/._()\\-]{0,30}") {
            let out = normalize(&s);
            prop_assert!(!out.chars().any(|c| PUNCTUATION.contains(&c)));
            prop_assert!(!out.contains("  "));
            prop_assert_eq!(out.trim(), out.as_str());
        }

        #[test]
        fn slug_has_no_spaces(s in "\\PC{0,40}") {
            prop_assert!(!slugify(&s).contains(' '));
        }
    }
}
