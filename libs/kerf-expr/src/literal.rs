//! Reusable atomic literal matchers for grammar definitions.

/// Matches an unsigned decimal number: digits, an optional fraction, an
/// optional exponent. Signs are left to the grammar's prefix operators.
///
/// A trailing bare dot or exponent letter is not consumed, so `5.` matches
/// as `5` and `2e` as `2`.
///
/// # Examples
/// ```
/// assert_eq!(kerf_expr::literal::number("3.25 + 1"), Some((4, 3.25)));
/// assert_eq!(kerf_expr::literal::number("1e-2"), Some((4, 0.01)));
/// assert_eq!(kerf_expr::literal::number(".5"), None);
/// ```
#[must_use]
pub fn number(src: &str) -> Option<(usize, f64)> {
    let bytes = src.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == 0 {
        return None;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        if frac > end + 1 {
            end = frac;
        }
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && (bytes[exp] == b'+' || bytes[exp] == b'-') {
            exp += 1;
        }
        let first_digit = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > first_digit {
            end = exp;
        }
    }
    src[..end].parse().ok().map(|value| (end, value))
}

/// Case-insensitively matches `word` at the start of `src`, refusing to
/// split an alphanumeric run (`pi` does not match inside `pixel`).
///
/// # Examples
/// ```
/// assert_eq!(kerf_expr::literal::keyword_ci("PI + 1", "pi"), Some(2));
/// assert_eq!(kerf_expr::literal::keyword_ci("pixel", "pi"), None);
/// ```
#[must_use]
pub fn keyword_ci(src: &str, word: &str) -> Option<usize> {
    let head = src.get(..word.len())?;
    if !head.eq_ignore_ascii_case(word) {
        return None;
    }
    match src[word.len()..].chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(word.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_scans_common_forms() {
        assert_eq!(number("42"), Some((2, 42.0)));
        assert_eq!(number("3.5)"), Some((3, 3.5)));
        assert_eq!(number("6.02e23"), Some((7, 6.02e23)));
        assert_eq!(number("1E+3"), Some((4, 1000.0)));
    }

    #[test]
    fn number_stops_at_bare_dot_or_exponent() {
        assert_eq!(number("5."), Some((1, 5.0)));
        assert_eq!(number("2e"), Some((1, 2.0)));
        assert_eq!(number("2e+"), Some((1, 2.0)));
    }

    #[test]
    fn number_rejects_non_digits() {
        assert_eq!(number(".5"), None);
        assert_eq!(number("-1"), None);
        assert_eq!(number("x"), None);
    }

    #[test]
    fn keyword_respects_boundaries() {
        assert_eq!(keyword_ci("pi", "pi"), Some(2));
        assert_eq!(keyword_ci("Pi*2", "pi"), Some(2));
        assert_eq!(keyword_ci("pint", "pi"), None);
        assert_eq!(keyword_ci("π", "π"), Some("π".len()));
    }
}
