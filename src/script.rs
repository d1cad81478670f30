//! Script line classification and option-line tokenizing.
//!
//! A script is processed one raw line at a time:
//!
//! ```text
//! # lines that start with '#' are comments
//! # lines that start with '-' re-run the option parser:
//! -p 1000 --wait=100
//! # lines that start with '\' escape these markers:
//! \# the pound sign here is typed, not a comment
//! # any other line is typed; its newline becomes a carriage return,
//! # unless the line ends with a backslash (continuation):
//! this turns into \
//! one line
//! ```

/// What a raw script line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// First character `#`: the whole line is ignored.
    Comment,
    /// First character `-`: the line (terminator stripped) is an option
    /// invocation to re-parse.
    Options(&'a str),
    /// Anything else: text for the escape decoder. `append_cr` is set when
    /// the line ended in an unescaped newline, which types a carriage
    /// return after the content.
    Data { text: &'a str, append_cr: bool },
}

/// Classify one raw line, terminator included if the source had one.
pub fn classify(raw: &str) -> Line<'_> {
    match raw.as_bytes().first() {
        Some(b'#') => Line::Comment,
        Some(b'-') => Line::Options(raw.strip_suffix('\n').unwrap_or(raw)),
        _ => {
            let (text, append_cr) = match raw.strip_suffix('\n') {
                // A backslash right before the newline is a continuation:
                // both are removed and no carriage return is typed.
                Some(body) => match body.strip_suffix('\\') {
                    Some(cont) => (cont, false),
                    None => (body, true),
                },
                None => (raw, false),
            };
            // A leading backslash lets a data line start with '#' or '-'.
            let text = text.strip_prefix('\\').unwrap_or(text);
            Line::Data { text, append_cr }
        }
    }
}

/// The synthetic argv\[0\] placed in front of tokenized option lines so the
/// option parser sees a complete invocation.
pub const ARGV0: &str = "stuffty";

/// The most tokens one option line may produce, placeholder included.
const MAX_TOKENS: usize = 32;

/// Split an option line into tokens, starting with [`ARGV0`].
///
/// Splitting is quote-aware: an unescaped `"` toggles quoting and is
/// dropped, and whitespace inside quotes does not end the token. A
/// backslash drops itself from the output but does *not* shield the next
/// character, which is interpreted by the same rules on the next step; so
/// `\"` still toggles quoting and `a\ b` is still two tokens. Tokens past
/// the fixed maximum are discarded.
pub fn split_args(line: &str) -> Vec<String> {
    let mut tokens = vec![ARGV0.to_string()];
    let mut current: Option<String> = None;
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == '\\' {
            current.get_or_insert_with(String::new);
            continue;
        }
        if ch == '"' {
            current.get_or_insert_with(String::new);
            in_quotes = !in_quotes;
            continue;
        }
        if ch.is_ascii_whitespace() && !in_quotes {
            if let Some(token) = current.take() {
                if tokens.len() < MAX_TOKENS {
                    tokens.push(token);
                }
            }
            continue;
        }
        current.get_or_insert_with(String::new).push(ch);
    }

    if let Some(token) = current {
        if tokens.len() < MAX_TOKENS {
            tokens.push(token);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        let tokens = split_args(line);
        assert_eq!(tokens[0], ARGV0);
        tokens[1..].to_vec()
    }

    #[test]
    fn test_split_simple() {
        assert_eq!(args("-w 100"), vec!["-w", "100"]);
        assert_eq!(args("  -p  1000  "), vec!["-p", "1000"]);
    }

    #[test]
    fn test_split_quoted_token() {
        assert_eq!(args(r#"-w 100 "two words""#), vec!["-w", "100", "two words"]);
    }

    #[test]
    fn test_split_quote_inside_token() {
        assert_eq!(args(r#"ab"cd ef"gh"#), vec!["abcd efgh"]);
    }

    #[test]
    fn test_split_empty_quotes_make_empty_token() {
        assert_eq!(args(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_backslash_is_dropped() {
        assert_eq!(args(r"a\bc"), vec!["abc"]);
    }

    #[test]
    fn test_split_backslash_does_not_shield_whitespace() {
        // The backslash only removes itself; the space still splits.
        assert_eq!(args(r"a\ b"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_backslash_does_not_shield_quotes() {
        // Likewise, \" still toggles quoting.
        assert_eq!(args(r#"a\"b c"d"#), vec!["ab cd"]);
    }

    #[test]
    fn test_split_lone_backslash_is_empty_token() {
        assert_eq!(args(r"a \ b"), vec!["a", "", "b"]);
    }

    #[test]
    fn test_split_empty_line() {
        assert_eq!(split_args(""), vec![ARGV0.to_string()]);
        assert_eq!(split_args("   "), vec![ARGV0.to_string()]);
    }

    #[test]
    fn test_split_caps_token_count() {
        let line = "x ".repeat(50);
        assert_eq!(split_args(&line).len(), 32);
    }

    #[test]
    fn test_classify_comment() {
        assert_eq!(classify("# hello\n"), Line::Comment);
        assert_eq!(classify("#"), Line::Comment);
    }

    #[test]
    fn test_classify_options_strips_newline() {
        assert_eq!(classify("-w 100\n"), Line::Options("-w 100"));
        assert_eq!(classify("--pause=1s"), Line::Options("--pause=1s"));
    }

    #[test]
    fn test_classify_data_appends_cr() {
        assert_eq!(
            classify("echo hi\n"),
            Line::Data { text: "echo hi", append_cr: true }
        );
    }

    #[test]
    fn test_classify_data_without_terminator() {
        assert_eq!(
            classify("echo hi"),
            Line::Data { text: "echo hi", append_cr: false }
        );
    }

    #[test]
    fn test_classify_continuation() {
        assert_eq!(
            classify("this turns into \\\n"),
            Line::Data { text: "this turns into ", append_cr: false }
        );
    }

    #[test]
    fn test_classify_leading_backslash_escapes_marker() {
        assert_eq!(
            classify("\\# not a comment\n"),
            Line::Data { text: "# not a comment", append_cr: true }
        );
        assert_eq!(
            classify("\\-not options\n"),
            Line::Data { text: "-not options", append_cr: true }
        );
    }

    #[test]
    fn test_classify_blank_line_is_a_return() {
        // An empty line still types Enter.
        assert_eq!(classify("\n"), Line::Data { text: "", append_cr: true });
    }

    #[test]
    fn test_classify_lone_continuation() {
        assert_eq!(classify("\\\n"), Line::Data { text: "", append_cr: false });
    }
}
