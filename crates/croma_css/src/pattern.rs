//! Selector pattern combinators.
//!
//! Utility matchers are assembled from small pieces instead of
//! hand-written regex strings: a literal fragment, an alternation over
//! fragments, a dash-joined sequence, or a numeric slot. A pattern
//! compiles into an anchored [`Regex`] and also renders a
//! human-readable template for autocomplete metadata.

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// A fixed fragment, matched verbatim.
    Literal(String),
    /// An alternation; compiles to a capturing group.
    Alt(Vec<Pattern>),
    /// Sub-patterns joined with `-`.
    Seq(Vec<Pattern>),
    /// Sub-patterns concatenated with nothing in between.
    Cat(Vec<Pattern>),
    /// A (possibly fractional) number, e.g. `4` or `2.5`.
    Number,
}

impl Pattern {
    pub fn literal(text: impl Into<String>) -> Pattern {
        Pattern::Literal(text.into())
    }

    /// An alternation over plain literals.
    pub fn any_of<I, S>(options: I) -> Pattern
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Pattern::Alt(options.into_iter().map(Pattern::literal).collect())
    }

    /// Compiles the pattern into an anchored regular expression.
    pub fn compile(&self) -> Result<Regex, regex::Error> {
        let mut source = String::from("^");
        self.write_regex(&mut source);
        source.push('$');
        Regex::new(&source)
    }

    fn write_regex(&self, out: &mut String) {
        match self {
            Pattern::Literal(text) => out.push_str(&regex::escape(text)),
            Pattern::Alt(options) => {
                out.push('(');
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    option.write_regex(out);
                }
                out.push(')');
            }
            Pattern::Seq(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        out.push('-');
                    }
                    part.write_regex(out);
                }
            }
            Pattern::Cat(parts) => {
                for part in parts {
                    part.write_regex(out);
                }
            }
            Pattern::Number => out.push_str(r"\d*\.?\d*"),
        }
    }

    /// Renders the autocomplete template: alternations keep their
    /// `(a|b)` shape and numeric slots become `<number>`.
    pub fn template(&self) -> String {
        let mut out = String::new();
        self.write_template(&mut out);
        out
    }

    fn write_template(&self, out: &mut String) {
        match self {
            Pattern::Literal(text) => out.push_str(text),
            Pattern::Alt(options) => {
                out.push('(');
                for (i, option) in options.iter().enumerate() {
                    if i > 0 {
                        out.push('|');
                    }
                    option.write_template(out);
                }
                out.push(')');
            }
            Pattern::Seq(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        out.push('-');
                    }
                    part.write_template(out);
                }
            }
            Pattern::Cat(parts) => {
                for part in parts {
                    part.write_template(out);
                }
            }
            Pattern::Number => out.push_str("<number>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn literals_are_escaped() {
        let re = Pattern::literal("w+h").compile().unwrap();
        assert!(re.is_match("w+h"));
        assert!(!re.is_match("wwh"));
    }

    #[test]
    fn sequences_join_with_dashes() {
        let pattern = Pattern::Seq(vec![
            Pattern::any_of(["w", "h"]),
            Pattern::any_of(["small", "large"]),
        ]);
        let re = pattern.compile().unwrap();
        assert!(re.is_match("w-small"));
        assert!(re.is_match("h-large"));
        assert!(!re.is_match("w-medium"));
        assert_eq!(
            re.captures("h-large").unwrap().get(1).unwrap().as_str(),
            "h"
        );
    }

    #[test]
    fn matches_are_anchored() {
        let re = Pattern::Seq(vec![
            Pattern::any_of(["m"]),
            Pattern::literal("layout-margin"),
        ])
        .compile()
        .unwrap();
        assert!(re.is_match("m-layout-margin"));
        assert!(!re.is_match("-m-layout-margin"));
        assert!(!re.is_match("m-layout-margins"));
    }

    #[test]
    fn number_slots_accept_fractions() {
        let pattern = Pattern::Cat(vec![
            Pattern::Number,
            Pattern::literal("/"),
            Pattern::any_of(["8", "12"]),
            Pattern::literal("col"),
        ]);
        let re = pattern.compile().unwrap();
        assert!(re.is_match("4/12col"));
        assert!(re.is_match("2.5/8col"));
        assert!(!re.is_match("4/10col"));
    }

    #[test]
    fn templates_render_for_autocomplete() {
        let pattern = Pattern::Seq(vec![
            Pattern::any_of(["w", "h"]),
            Pattern::Cat(vec![
                Pattern::Number,
                Pattern::literal("/"),
                Pattern::any_of(["8", "12"]),
                Pattern::literal("col"),
            ]),
        ]);
        assert_eq!(pattern.template(), "(w|h)-<number>/(8|12)col");
    }
}
