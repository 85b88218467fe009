//! Escaping of text runs for LaTeX.

use std::sync::LazyLock;

use regex::Regex;

/// Three or more dot-separated identifiers (`org.example.app`), which the
/// backend's URL detection would otherwise turn into hyperlinks.
static DOTTED_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z$_][a-zA-Z0-9$_]*\.[a-zA-Z$_][a-zA-Z0-9$_]*\.[a-zA-Z$_][a-zA-Z0-9$_]*(?:\.[a-zA-Z$_][a-zA-Z0-9$_]*)*)")
        .unwrap()
});

/// Characters escaped by prefixing a backslash.
const BACKSLASH_ESCAPED: &[char] = &['#', '$', '%', '&', '~', '_', '^'];

/// Escape `text` for use in LaTeX body text.
///
/// Every character is mapped independently; characters outside the fixed
/// set are copied unchanged.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '{' => out.push_str("\\{"),
            '}' => out.push_str("\\}"),
            '\\' => out.push_str("\\localBackslash{}"),
            '\u{00A0}' => out.push(' '),
            '\u{201C}' => out.push_str("``"),
            '\u{201D}' => out.push_str("''"),
            '\u{2019}' => out.push('\''),
            '\u{2192}' => out.push_str("$\\rightarrow$"),
            '\u{2014}' => out.push_str("---"),
            '\u{2013}' => out.push_str("--"),
            '\u{FEFF}' => out.push_str("\\hspace{0pt}"),
            c if BACKSLASH_ESCAPED.contains(&c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Escape a raw text run, wrapping dotted identifiers in
/// `\protect\noclickurl{...}`.
///
/// Identifiers are found in the raw text so a match never starts inside an
/// escape sequence. Both the identifier and the text around it are escaped.
pub fn text_run(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 8);
    let mut last = 0;
    for m in DOTTED_IDENTIFIER.find_iter(raw) {
        out.push_str(&escape_latex(&raw[last..m.start()]));
        out.push_str("\\protect\\noclickurl{");
        out.push_str(&escape_latex(m.as_str()));
        out.push('}');
        last = m.end();
    }
    out.push_str(&escape_latex(&raw[last..]));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_escape_specials() {
        assert_eq!(escape_latex("50% & café\\coffee"), "50\\% \\& café\\localBackslash{}coffee");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
        assert_eq!(escape_latex("a_b^c~d#e$f"), "a\\_b\\^c\\~d\\#e\\$f");
    }

    #[test]
    fn test_escape_typography() {
        assert_eq!(escape_latex("heat \u{2192} cold"), "heat $\\rightarrow$ cold");
        assert_eq!(escape_latex("\u{201C}quoted\u{201D}"), "``quoted''");
        assert_eq!(escape_latex("it\u{2019}s"), "it's");
        assert_eq!(escape_latex("a\u{2014}b\u{2013}c"), "a---b--c");
        assert_eq!(escape_latex("no\u{00A0}break"), "no break");
        assert_eq!(escape_latex("\u{FEFF}"), "\\hspace{0pt}");
    }

    #[test]
    fn test_escape_leaves_other_text_alone() {
        assert_eq!(escape_latex("Plain text, 123 (ok)!"), "Plain text, 123 (ok)!");
        assert_eq!(escape_latex("\u{2018}single"), "\u{2018}single");
    }

    #[test]
    fn test_dotted_identifiers_are_protected() {
        assert_eq!(
            text_run("use org.example.app now"),
            "use \\protect\\noclickurl{org.example.app} now"
        );
        assert_eq!(text_run("a.b.c.d"), "\\protect\\noclickurl{a.b.c.d}");
    }

    #[test]
    fn test_two_segments_not_protected() {
        assert_eq!(text_run("file.txt"), "file.txt");
        assert_eq!(text_run("Version 1.2.3"), "Version 1.2.3");
    }

    #[test]
    fn test_text_run_escapes_inside_identifier() {
        assert_eq!(
            text_run("see com.acme.my_app"),
            "see \\protect\\noclickurl{com.acme.my\\_app}"
        );
    }

    #[test]
    fn test_identifier_after_escaped_character() {
        let out = text_run("foo_bar.baz.qux");
        assert_eq!(out, "\\protect\\noclickurl{foo\\_bar.baz.qux}");
        assert!(!out.contains("\\\\protect"));

        assert_eq!(
            text_run("cost $ref.a.b & x"),
            "cost \\protect\\noclickurl{\\$ref.a.b} \\& x"
        );
        assert_eq!(
            text_run("50%my_pkg.sub.mod"),
            "50\\%\\protect\\noclickurl{my\\_pkg.sub.mod}"
        );
    }

    /// Expected escape of a single character.
    fn escape_char(c: char) -> String {
        match c {
            '{' => "\\{".to_string(),
            '}' => "\\}".to_string(),
            '\\' => "\\localBackslash{}".to_string(),
            '\u{00A0}' => " ".to_string(),
            '\u{201C}' => "``".to_string(),
            '\u{201D}' => "''".to_string(),
            '\u{2019}' => "'".to_string(),
            '\u{2192}' => "$\\rightarrow$".to_string(),
            '\u{2014}' => "---".to_string(),
            '\u{2013}' => "--".to_string(),
            '\u{FEFF}' => "\\hspace{0pt}".to_string(),
            '#' | '$' | '%' | '&' | '~' | '_' | '^' => format!("\\{c}"),
            c => c.to_string(),
        }
    }

    proptest! {
        #[test]
        fn prop_escape_is_per_character(s in any::<String>()) {
            let expected: String = s.chars().map(escape_char).collect();
            prop_assert_eq!(escape_latex(&s), expected);
        }

        #[test]
        fn prop_escape_handles_specials_mixed_with_text(
            s in "[a-z\\{}#$%&~_^\u{00A0}\u{201C}\u{201D}\u{2019}\u{2192}\u{2014}\u{2013}\u{FEFF}é漢]*"
        ) {
            let expected: String = s.chars().map(escape_char).collect();
            prop_assert_eq!(escape_latex(&s), expected);
        }

        #[test]
        fn prop_text_run_never_splits_an_escape(s in "[a-z_$.%& ]{0,24}") {
            let out = text_run(&s);
            prop_assert!(!out.contains("\\\\protect"));
            let stripped = out.replace("\\protect\\noclickurl{", "").replace('}', "");
            prop_assert_eq!(stripped, escape_latex(&s));
        }
    }
}
