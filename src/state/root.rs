//! The process-wide published theme.

use time::OffsetDateTime;

use crate::{state::theme_machine::RunToken, theme::builder::ThemeVariableSet};

/// The last theme written to the document root.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedTheme {
    /// Published variables.
    pub variables: ThemeVariableSet,
    /// Run that produced them.
    pub token: RunToken,
    /// When they were applied.
    pub applied_at: OffsetDateTime,
}

/// Process-wide document root holding the published CSS variables.
///
/// Readable by anyone; written only by the theme controller.
#[derive(Debug, Clone, Default)]
pub struct ThemeRoot {
    published: Option<PublishedTheme>,
}

impl ThemeRoot {
    /// Empty root, nothing published yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest publication, if any.
    pub fn published(&self) -> Option<&PublishedTheme> {
        self.published.as_ref()
    }

    /// Latest published variables, if any.
    pub fn variables(&self) -> Option<&ThemeVariableSet> {
        self.published.as_ref().map(|published| &published.variables)
    }

    /// Replace the whole set at once.
    pub(crate) fn apply(&mut self, variables: ThemeVariableSet, token: RunToken) -> &PublishedTheme {
        self.published.insert(PublishedTheme {
            variables,
            token,
            applied_at: OffsetDateTime::now_utc(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{builder::ThemeBuilder, swatch::Palette};

    #[test]
    fn starts_empty_and_replaces_wholesale() {
        let mut root = ThemeRoot::new();
        assert!(root.variables().is_none());

        let set = ThemeBuilder::default().build(&Palette::empty());
        root.apply(set.clone(), 3);
        let published = root.published().unwrap();
        assert_eq!(published.variables, set);
        assert_eq!(published.token, 3);

        root.apply(ThemeVariableSet::default(), 4);
        assert!(root.variables().unwrap().is_empty());
    }
}
