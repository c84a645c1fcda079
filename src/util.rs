//! Small shared parsing helpers for the tab and list grammars.

/// Split `input` on `sep`, ignoring separators that occur inside square
/// brackets. mzTab list values nest CV parameters (which contain commas and
/// may contain the list separator) inside `[...]`, so a plain `str::split`
/// would tear parameters apart.
pub(crate) fn split_outside_brackets(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in input.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

/// Parse an mzTab floating point token. In addition to ordinary decimal
/// notation the format allows the literals `NaN`, `INF` and `-INF`.
pub(crate) fn parse_double(token: &str) -> Option<f64> {
    match token {
        "NaN" => Some(f64::NAN),
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        other => other.parse::<f64>().ok(),
    }
}

/// Format a float back into its mzTab token form.
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_respects_brackets() {
        let parts = split_outside_brackets("[SEP, SEP:00142, enzyme digestion, ]|[MS, MS:1001251, Trypsin, ]", '|');
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0], "[SEP, SEP:00142, enzyme digestion, ]");

        let parts = split_outside_brackets("3-MOD:00412,8[MS,MS:1001876, probability, 0.3]-MOD:00412", ',');
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn split_without_separator() {
        assert_eq!(split_outside_brackets("plain", '|'), vec!["plain"]);
    }

    #[test]
    fn doubles() {
        assert!(parse_double("NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_double("INF"), Some(f64::INFINITY));
        assert_eq!(parse_double("-INF"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_double("0.4"), Some(0.4));
        assert_eq!(parse_double("inf"), None);
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(0.4), "0.4");
    }
}
