//! Whitespace tokenizer with atomic bracket literals.

use super::token::{classify, Token};

/// Split a raw query string into token substrings.
///
/// Tokens are whitespace-delimited runs, except that a `[` opening a
/// bracket literal swallows everything up to the next `]` (inclusive) as a
/// single token, embedded spaces and all. An unterminated `[` degrades to
/// ordinary whitespace tokenization instead of erroring; the first `]`
/// after a `[` always closes it (no nesting).
pub fn tokenize(input: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];
        let c = match rest.chars().next() {
            Some(c) => c,
            None => break,
        };

        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }

        if c == '[' {
            if let Some(close) = rest[1..].find(']') {
                let end = i + 1 + close + 1;
                out.push(&input[i..end]);
                i = end;
                continue;
            }
            // no matching ']': fall through to whitespace-delimited scan
        }

        let start = i;
        for ch in rest.chars() {
            if ch.is_whitespace() {
                break;
            }
            i += ch.len_utf8();
        }
        out.push(&input[start..i]);
    }

    out.retain(|t| !t.is_empty());
    out
}

/// Tokenize and classify in one step: the projection the editor surface
/// recomputes on every render.
pub fn tokens(input: &str) -> Vec<Token> {
    tokenize(input).into_iter().map(classify).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::token::TokenKind;

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t  ").is_empty());
    }

    #[test]
    fn test_whitespace_runs_are_skipped() {
        assert_eq!(tokenize("  a   b\t c  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_coordinate_atomicity() {
        assert_eq!(
            tokenize("[ -1, 2.5, 0 ] AND x"),
            vec!["[ -1, 2.5, 0 ]", "AND", "x"]
        );
    }

    #[test]
    fn test_bracket_token_without_inner_spaces() {
        assert_eq!(tokenize("[-22,-4,18] NOT emotion"), vec![
            "[-22,-4,18]",
            "NOT",
            "emotion"
        ]);
    }

    #[test]
    fn test_bracket_closes_at_first_rbracket() {
        // nested brackets are not supported
        assert_eq!(tokenize("[a [b] c]"), vec!["[a [b]", "c]"]);
    }

    #[test]
    fn test_unterminated_bracket_degrades() {
        assert_eq!(tokenize("[1, 2, 3 AND x"), vec!["[1,", "2,", "3", "AND", "x"]);
    }

    #[test]
    fn test_token_follows_bracket_without_space() {
        assert_eq!(tokenize("[1,2,3]x y"), vec!["[1,2,3]", "x", "y"]);
    }

    #[test]
    fn test_round_trip_single_space_join() {
        let toks = vec!["(", "a", "AND", "[ 1, 2, 3 ]", ")", "OR", "b"];
        let joined = toks.join(" ");
        assert_eq!(tokenize(&joined), toks);
    }

    #[test]
    fn test_multibyte_input() {
        assert_eq!(tokenize("émotion AND 杏仁核"), vec!["émotion", "AND", "杏仁核"]);
    }

    #[test]
    fn test_tokens_classifies() {
        let toks = tokens("[ -1, 2.5, 0 ] AND x");
        assert_eq!(toks.len(), 3);
        assert!(toks[0].is_term());
        assert!(toks[0].is_coordinate());
        assert!(matches!(toks[1].kind, TokenKind::Operator(_)));
        assert!(toks[2].is_term());
    }
}
