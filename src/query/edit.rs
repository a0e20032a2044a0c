//! Query editing: the single owned query string, its chip projection, and
//! the term-removal algorithm behind a chip's `×` action.

use super::normalize::normalize;
use super::token::Token;
use super::tokenizer::tokens;

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rejoin a token sequence into a whitespace-collapsed query string.
pub fn join_tokens(toks: &[Token]) -> String {
    collapse_whitespace(
        &toks
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Remove the term at `index` and repair the sequence around it.
///
/// `index` must refer to a term (chips only ever target terms); an
/// out-of-range or operator index is a no-op. After deleting the term, a
/// directly preceding `NOT` is deleted too, then at most one adjacent
/// binary operator: preferring the one that followed the removed term,
/// falling back to the one before it. A final normalize pass catches any
/// boundary defect the deletions introduced.
pub fn remove_term_at(mut toks: Vec<Token>, index: usize) -> Vec<Token> {
    if index >= toks.len() || !toks[index].is_term() {
        return toks;
    }

    let mut idx = index;
    toks.remove(idx);

    if idx >= 1 && toks[idx - 1].is_not() {
        toks.remove(idx - 1);
        idx -= 1;
    }

    if idx < toks.len() && toks[idx].is_binary() {
        toks.remove(idx);
    } else if idx >= 1 && toks[idx - 1].is_binary() {
        toks.remove(idx - 1);
    }

    normalize(toks)
}

/// A removable chip: one term token, addressed by its position in the full
/// token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub token_index: usize,
    pub text: String,
}

/// The editor's sole piece of state: the raw query string. Everything else
/// (tokens, chips) is a stateless projection recomputed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryEditor {
    query: String,
}

impl QueryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Replace the raw string wholesale (free-text editing path).
    pub fn set(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Live typing: append one character, no processing.
    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    /// Backspace: drop the last character.
    pub fn pop(&mut self) {
        self.query.pop();
    }

    /// Delete the last word (trailing spaces, then the word itself).
    pub fn delete_word(&mut self) {
        while self.query.ends_with(' ') {
            self.query.pop();
        }
        while !self.query.is_empty() && !self.query.ends_with(' ') {
            self.query.pop();
        }
    }

    /// Append a structural token, space-joined. Deliberately does NOT
    /// normalize: a lone leading `AND` stays until the user fixes it.
    pub fn append(&mut self, token: &str) {
        if self.query.is_empty() {
            self.query = token.to_string();
        } else {
            self.query = format!("{} {}", self.query, token);
        }
    }

    pub fn reset(&mut self) {
        self.query.clear();
    }

    /// Commit the free-text box (Enter): collapse whitespace runs and trim,
    /// nothing more — the user may be mid-edit, so no tokenize/normalize.
    pub fn commit(&mut self) {
        self.query = collapse_whitespace(&self.query);
    }

    /// The classified token sequence for the current string.
    pub fn tokens(&self) -> Vec<Token> {
        tokens(&self.query)
    }

    /// Chip projection: one chip per term token, in order. Operators are
    /// never chips.
    pub fn chips(&self) -> Vec<Chip> {
        self.tokens()
            .into_iter()
            .enumerate()
            .filter(|(_, t)| t.is_term())
            .map(|(token_index, t)| Chip {
                token_index,
                text: t.text,
            })
            .collect()
    }

    /// Remove the `chip_index`-th chip (the chip's `×` action) and commit
    /// the repaired sequence as the new query. Returns false when the index
    /// does not name a chip.
    pub fn remove_chip(&mut self, chip_index: usize) -> bool {
        let chips = self.chips();
        let Some(chip) = chips.get(chip_index) else {
            return false;
        };
        let repaired = remove_term_at(self.tokens(), chip.token_index);
        self.query = join_tokens(&repaired);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn removed(query: &str, term: &str) -> String {
        let toks = tokens(query);
        let idx = toks
            .iter()
            .position(|t| t.text == term)
            .expect("term present");
        join_tokens(&remove_term_at(toks, idx))
    }

    #[test]
    fn test_remove_middle_term_takes_one_operator() {
        assert_eq!(removed("A AND B AND C", "B"), "A AND C");
    }

    #[test]
    fn test_remove_first_term() {
        assert_eq!(removed("A AND B AND C", "A"), "B AND C");
    }

    #[test]
    fn test_remove_last_term() {
        assert_eq!(removed("A AND B AND C", "C"), "A AND B");
    }

    #[test]
    fn test_remove_strips_attached_not() {
        assert_eq!(removed("A AND NOT B", "B"), "A");
    }

    #[test]
    fn test_remove_not_term_keeps_other_side() {
        assert_eq!(removed("NOT A OR B", "A"), "B");
    }

    #[test]
    fn test_remove_only_term_empties_query() {
        assert_eq!(removed("A", "A"), "");
        assert_eq!(removed("NOT A", "A"), "");
    }

    #[test]
    fn test_remove_inside_group_keeps_parens() {
        assert_eq!(removed("( A OR B )", "B"), "( A )");
    }

    #[test]
    fn test_remove_sole_grouped_term_elides_pair() {
        assert_eq!(removed("( A ) AND B", "A"), "B");
    }

    #[test]
    fn test_remove_coordinate_term() {
        assert_eq!(removed("[ -1, 2.5, 0 ] AND x", "[ -1, 2.5, 0 ]"), "x");
    }

    #[test]
    fn test_remove_operator_index_is_noop() {
        let toks = tokens("A AND B");
        assert_eq!(remove_term_at(toks.clone(), 1), toks);
        assert_eq!(remove_term_at(toks.clone(), 99), toks);
    }

    #[test]
    fn test_append_does_not_normalize() {
        let mut editor = QueryEditor::new();
        editor.append("AND");
        assert_eq!(editor.query(), "AND");
        // operators are never chips, so an unnormalized leading operator
        // renders no chip while the raw text shows it
        assert!(editor.chips().is_empty());

        editor.append("amygdala");
        assert_eq!(editor.query(), "AND amygdala");
        assert_eq!(editor.chips().len(), 1);
    }

    #[test]
    fn test_append_space_joins() {
        let mut editor = QueryEditor::with_query("a");
        editor.append("OR");
        editor.append("b");
        assert_eq!(editor.query(), "a OR b");
    }

    #[test]
    fn test_commit_collapses_whitespace_only() {
        let mut editor = QueryEditor::with_query("  a   AND\t ( b  ");
        editor.commit();
        // the dangling operator and paren survive: commit never normalizes
        assert_eq!(editor.query(), "a AND ( b");
    }

    #[test]
    fn test_commit_collapses_inside_coordinates() {
        let mut editor = QueryEditor::with_query("[  -1,   2.5, 0 ]");
        editor.commit();
        assert_eq!(editor.query(), "[ -1, 2.5, 0 ]");
    }

    #[test]
    fn test_chips_map_terms_in_order() {
        let editor = QueryEditor::with_query("( a AND [1,2,3] ) OR NOT b");
        let chips = editor.chips();
        let texts: Vec<&str> = chips.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "[1,2,3]", "b"]);
        assert_eq!(chips[0].token_index, 1);
        assert_eq!(chips[1].token_index, 3);
    }

    #[test]
    fn test_remove_chip_commits_new_query() {
        let mut editor = QueryEditor::with_query("A AND B AND C");
        assert!(editor.remove_chip(1));
        assert_eq!(editor.query(), "A AND C");
        assert!(!editor.remove_chip(5));
    }

    #[test]
    fn test_delete_word() {
        let mut editor = QueryEditor::with_query("a AND amygdala");
        editor.delete_word();
        assert_eq!(editor.query(), "a AND ");
        editor.delete_word();
        assert_eq!(editor.query(), "a ");
    }

    #[test]
    fn test_reset() {
        let mut editor = QueryEditor::with_query("a AND b");
        editor.reset();
        assert!(editor.is_empty());
    }

    #[test]
    fn test_join_tokens_round_trip() {
        let toks = tokens("( a AND [ 1, 2, 3 ] ) OR b");
        assert_eq!(join_tokens(&toks), "( a AND [ 1, 2, 3 ] ) OR b");
    }
}
