//! Structural cleanup pass over a token sequence.
//!
//! The normalizer is a best-effort repairer, not a grammar checker: it
//! fixes boundary and local-adjacency defects and leaves everything else
//! (including unmatched parentheses in the middle of the sequence) alone.

use super::token::Token;

/// Rewrite `tokens` until no rule fires in a full pass.
///
/// Rules, in priority order, rescanning from the top after any firing:
/// 1. delete the first adjacent `(` `)` pair as a unit;
/// 2. strip leading operators other than `(`;
/// 3. strip trailing operators other than `)`;
/// 4. for the first pair of consecutive operators where the second does
///    not open a group and the first does not close one, drop the second.
///
/// Every firing strictly shortens the sequence, so the loop terminates.
/// Idempotent at its fixed point.
pub fn normalize(mut tokens: Vec<Token>) -> Vec<Token> {
    let mut changed = true;
    while changed {
        changed = false;

        if let Some(i) = (0..tokens.len().saturating_sub(1))
            .find(|&i| tokens[i].is_open_paren() && tokens[i + 1].is_close_paren())
        {
            tokens.drain(i..i + 2);
            changed = true;
            continue;
        }

        while tokens
            .first()
            .is_some_and(|t| t.is_operator() && !t.is_open_paren())
        {
            tokens.remove(0);
            changed = true;
        }
        while tokens
            .last()
            .is_some_and(|t| t.is_operator() && !t.is_close_paren())
        {
            tokens.pop();
            changed = true;
        }
        if changed {
            continue;
        }

        if let Some(i) = (1..tokens.len()).find(|&i| {
            tokens[i - 1].is_operator()
                && tokens[i].is_operator()
                && !tokens[i].is_open_paren()
                && !tokens[i - 1].is_close_paren()
        }) {
            tokens.remove(i);
            changed = true;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tokenizer::tokens;

    fn texts(toks: &[Token]) -> Vec<&str> {
        toks.iter().map(|t| t.text.as_str()).collect()
    }

    fn normalized(query: &str) -> Vec<Token> {
        normalize(tokens(query))
    }

    #[test]
    fn test_empty_sequence() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_terms_only_is_fixed_point() {
        let toks = tokens("a b c");
        assert_eq!(normalize(toks.clone()), toks);
    }

    #[test]
    fn test_leading_operator_stripped() {
        assert_eq!(texts(&normalized("AND a")), vec!["a"]);
        assert_eq!(texts(&normalized("NOT OR a")), vec!["a"]);
    }

    #[test]
    fn test_trailing_operator_stripped() {
        assert_eq!(texts(&normalized("a OR")), vec!["a"]);
        assert_eq!(texts(&normalized("a AND NOT")), vec!["a"]);
    }

    #[test]
    fn test_stray_boundary_parens_stripped() {
        // a leading ')' and a trailing '(' are both boundary defects
        assert_eq!(texts(&normalized(") a (")), vec!["a"]);
    }

    #[test]
    fn test_leading_open_paren_kept() {
        assert_eq!(texts(&normalized("( a )")), vec!["(", "a", ")"]);
    }

    #[test]
    fn test_empty_paren_pair_elided() {
        // eliding the pair leaves `AND OR`, which the adjacency rule then
        // collapses by dropping the second operator
        assert_eq!(texts(&normalized("a AND ( ) OR b")), vec!["a", "AND", "b"]);
    }

    #[test]
    fn test_nested_empty_pairs_elide_inside_out() {
        assert_eq!(texts(&normalized("( ( ) )")), Vec::<&str>::new());
        assert_eq!(texts(&normalized("a AND ( ( ) )")), vec!["a"]);
    }

    #[test]
    fn test_adjacent_binary_collapse_keeps_first() {
        assert_eq!(texts(&normalized("a AND OR b")), vec!["a", "AND", "b"]);
        assert_eq!(texts(&normalized("a OR AND AND b")), vec!["a", "OR", "b"]);
    }

    #[test]
    fn test_operator_before_open_paren_survives() {
        let toks = tokens("a AND ( b OR c )");
        assert_eq!(normalize(toks.clone()), toks);
    }

    #[test]
    fn test_close_paren_before_operator_survives() {
        let toks = tokens("( a ) AND b");
        assert_eq!(normalize(toks.clone()), toks);
    }

    #[test]
    fn test_not_collapses_after_binary() {
        // `AND NOT` is itself an adjacent operator pair, so the pass drops
        // the NOT; only removal-introduced defects keep NOT intact because
        // the removal algorithm deletes it before normalizing
        assert_eq!(texts(&normalized("a AND NOT b")), vec!["a", "AND", "b"]);
        assert_eq!(texts(&normalized("NOT a")), vec!["a"]);
    }

    #[test]
    fn test_unmatched_paren_mid_sequence_untouched() {
        // only boundary and adjacency defects are repaired
        let toks = tokens("a AND ( b");
        assert_eq!(normalize(toks.clone()), toks);
    }

    #[test]
    fn test_pinned_underspecified_group_boundary() {
        // `OR )` is an operator pair whose second member is not `(` and
        // whose first is not `)`, so the rule drops the `)` even though a
        // human might have dropped the `OR`; pinned, not inferred.
        assert_eq!(
            texts(&normalized("a AND ( b OR ) c")),
            vec!["a", "AND", "(", "b", "OR", "c"]
        );
    }

    #[test]
    fn test_idempotent() {
        for query in [
            "",
            "a",
            "AND a OR",
            "a AND ( ) OR b",
            "a AND ( b OR ) c",
            "( ( ) )",
            "NOT NOT NOT",
            ") ( ) (",
            "[1,2,3] AND OR [4,5,6]",
        ] {
            let once = normalize(tokens(query));
            let twice = normalize(once.clone());
            assert_eq!(once, twice, "normalize not idempotent for {query:?}");
        }
    }

    #[test]
    fn test_all_operators_collapse_to_nothing() {
        assert!(normalized("AND OR NOT").is_empty());
        assert!(normalized("( )").is_empty());
    }
}
