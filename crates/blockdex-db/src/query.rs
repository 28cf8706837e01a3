//! FTS5 MATCH expression building.
//!
//! The index backend has no relevance model beyond literal and prefix
//! matching, so confidence tiers are expressed as OR-combined phrasing
//! variants of the same terms and re-ranked later by the scorer.

/// Build the FTS5 MATCH expression for the given search terms.
///
/// Variants, strongest first:
/// 1. the exact phrase,
/// 2. every term as a prefix (trailing `*`),
/// 3. for multi-term input, an `AND` conjunction allowing any positions.
///
/// Terms are re-quoted (embedded `"` doubled) so user input cannot alter
/// the expression syntax. An empty term list yields an empty expression,
/// which signals "browse, unranked by text relevance" to the executor.
pub fn build_match_expression(terms: &[String]) -> String {
    if terms.is_empty() {
        return String::new();
    }

    let quoted: Vec<String> = terms.iter().map(|t| quote_term(t)).collect();

    let phrase = quote_term(&terms.join(" "));
    let prefix = quoted
        .iter()
        .map(|q| format!("{q}*"))
        .collect::<Vec<_>>()
        .join(" ");

    let mut variants = vec![format!("({phrase})"), format!("({prefix})")];
    if terms.len() > 1 {
        variants.push(format!("({})", quoted.join(" AND ")));
    }

    variants.join(" OR ")
}

/// Quote a term for embedding in a MATCH expression, neutralizing any
/// embedded quote characters.
fn quote_term(term: &str) -> String {
    format!("\"{}\"", term.replace('"', "\"\""))
}

/// Escape LIKE wildcard characters (`%`, `_`, `\`) in user input.
///
/// Patterns built from the result must carry an `ESCAPE '\'` clause.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
