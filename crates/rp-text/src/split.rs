//! Splitting text lines into terms.

use crate::{TextError, TextResult};

fn is_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// Split `line` on blanks and commas.
///
/// A term may be quoted with `'` or `"` to keep separators inside it; a
/// quoted term is kept even when empty. An unmatched quote is a parse error
/// reported at `line_no`.
pub fn split_terms(line: &str, line_no: usize) -> TextResult<Vec<String>> {
    let mut terms = Vec::new();
    let mut rest = line;
    loop {
        rest = rest.trim_start_matches(is_separator);
        let Some(first) = rest.chars().next() else {
            break;
        };
        if first == '"' || first == '\'' {
            let body = &rest[1..];
            let end = body.find(first).ok_or_else(|| {
                TextError::parse(line_no, format!("missing closing quote {first}"))
            })?;
            terms.push(body[..end].trim().to_string());
            rest = &body[end + 1..];
        } else {
            let end = rest.find(is_separator).unwrap_or(rest.len());
            terms.push(rest[..end].to_string());
            rest = &rest[end..];
        }
    }
    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blanks_and_commas_separate() {
        assert_eq!(
            split_terms("  WELL, DATE  WOPR,,WBHP ", 1).unwrap(),
            ["WELL", "DATE", "WOPR", "WBHP"]
        );
        assert!(split_terms("   ", 1).unwrap().is_empty());
    }

    #[test]
    fn quoted_terms() {
        assert_eq!(
            split_terms("\"A 1\"  01.01.2020 'x,y' \"\"", 1).unwrap(),
            ["A 1", "01.01.2020", "x,y", ""]
        );
    }

    #[test]
    fn unmatched_quote_reports_line() {
        match split_terms("\"OP1  01.01.2020", 7) {
            Err(TextError::Parse { line, .. }) => assert_eq!(line, 7),
            other => panic!("unexpected {other:?}"),
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn separators_never_leak_into_terms(
            words in prop::collection::vec("[A-Z0-9.:-]{1,8}", 0..12),
            seps in prop::collection::vec(prop::sample::select(vec![" ", ",", "\t", " , ", ",,"]), 12),
        ) {
            let mut line = String::new();
            for (w, s) in words.iter().zip(&seps) {
                line.push_str(s);
                line.push_str(w);
            }
            let terms = split_terms(&line, 1).unwrap();
            prop_assert_eq!(terms, words);
        }
    }
}
