//! Default property names derived from qualified expressions.
//!
//! `config.MaxRetries` names the property `MaxRetries`: the text after the
//! last `.` divider. Resolution only slices the borrowed input.

const DIVIDER: char = '.';

/// A borrowed, possibly dotted identifier such as `a.b.Count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedName<'a> {
    expression: &'a str,
    divider: Option<usize>,
}

impl<'a> QualifiedName<'a> {
    #[must_use]
    pub fn new(expression: &'a str) -> Self {
        // A trailing divider names nothing, so the expression is kept whole.
        let divider = expression
            .rfind(DIVIDER)
            .filter(|idx| idx + DIVIDER.len_utf8() < expression.len());
        Self {
            expression,
            divider,
        }
    }

    /// The full expression.
    #[must_use]
    pub fn expression(&self) -> &'a str {
        self.expression
    }

    /// Text after the last divider, or the whole expression.
    #[must_use]
    pub fn default_name(&self) -> &'a str {
        match self.divider {
            Some(idx) => &self.expression[idx + DIVIDER.len_utf8()..],
            None => self.expression,
        }
    }

    /// Text before the last divider, if there is one.
    #[must_use]
    pub fn qualifier(&self) -> Option<&'a str> {
        self.divider.map(|idx| &self.expression[..idx])
    }
}

/// Returns the segment of `expression` after its last `.`.
///
/// Without a divider, or when the divider is the last character, the input is
/// returned unchanged.
///
/// ```
/// use jsonnaming::resolve_default_name;
///
/// assert_eq!(resolve_default_name("a.b.Count"), "Count");
/// assert_eq!(resolve_default_name("Count"), "Count");
/// assert_eq!(resolve_default_name("a."), "a.");
/// ```
#[must_use]
pub fn resolve_default_name(expression: &str) -> &str {
    QualifiedName::new(expression).default_name()
}
