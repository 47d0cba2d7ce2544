//! Wiki namespaces: integer ids, their title prefixes, and filter sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A MediaWiki namespace id.
///
/// Negative ids (Special, Media) are valid namespaces but never appear in
/// category listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Namespace(i32);

impl Namespace {
    pub const MAIN: Namespace = Namespace(0);
    pub const TALK: Namespace = Namespace(1);
    pub const USER: Namespace = Namespace(2);
    pub const USER_TALK: Namespace = Namespace(3);
    pub const PROJECT: Namespace = Namespace(4);
    pub const PROJECT_TALK: Namespace = Namespace(5);
    pub const FILE: Namespace = Namespace(6);
    pub const FILE_TALK: Namespace = Namespace(7);
    pub const MEDIAWIKI: Namespace = Namespace(8);
    pub const MEDIAWIKI_TALK: Namespace = Namespace(9);
    pub const TEMPLATE: Namespace = Namespace(10);
    pub const TEMPLATE_TALK: Namespace = Namespace(11);
    pub const HELP: Namespace = Namespace(12);
    pub const HELP_TALK: Namespace = Namespace(13);
    pub const CATEGORY: Namespace = Namespace(14);
    pub const CATEGORY_TALK: Namespace = Namespace(15);

    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> i32 {
        self.0
    }

    pub fn is_talk(self) -> bool {
        self.0 > 0 && self.0 % 2 == 1
    }

    /// The prefix titles in this namespace are displayed with, if known.
    ///
    /// The project namespace uses the English Wikipedia name, matching the
    /// default endpoint.
    pub fn display_prefix(self) -> Option<&'static str> {
        PREFIXES
            .iter()
            .find(|(_, ns)| *ns == self)
            .map(|(prefix, _)| *prefix)
    }

    /// Resolves a title prefix such as `"category"` or `"File_talk"`.
    ///
    /// Matching ignores case and treats underscores as spaces, the way
    /// MediaWiki does.
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        let wanted = prefix.trim().replace('_', " ");
        PREFIXES
            .iter()
            .chain(ALIASES)
            .find(|(name, _)| name.eq_ignore_ascii_case(&wanted))
            .map(|(_, ns)| *ns)
    }
}

/// Display prefixes, one per namespace.
const PREFIXES: &[(&str, Namespace)] = &[
    ("Talk", Namespace::TALK),
    ("User", Namespace::USER),
    ("User talk", Namespace::USER_TALK),
    ("Wikipedia", Namespace::PROJECT),
    ("Wikipedia talk", Namespace::PROJECT_TALK),
    ("File", Namespace::FILE),
    ("File talk", Namespace::FILE_TALK),
    ("MediaWiki", Namespace::MEDIAWIKI),
    ("MediaWiki talk", Namespace::MEDIAWIKI_TALK),
    ("Template", Namespace::TEMPLATE),
    ("Template talk", Namespace::TEMPLATE_TALK),
    ("Help", Namespace::HELP),
    ("Help talk", Namespace::HELP_TALK),
    ("Category", Namespace::CATEGORY),
    ("Category talk", Namespace::CATEGORY_TALK),
];

/// Alternative prefixes MediaWiki accepts on input.
const ALIASES: &[(&str, Namespace)] = &[
    ("Project", Namespace::PROJECT),
    ("Project talk", Namespace::PROJECT_TALK),
    ("WP", Namespace::PROJECT),
    ("Image", Namespace::FILE),
    ("Image talk", Namespace::FILE_TALK),
];

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_prefix() {
            Some(prefix) => write!(f, "{}", prefix),
            None if *self == Namespace::MAIN => write!(f, "(Main)"),
            None => write!(f, "namespace {}", self.0),
        }
    }
}

impl From<i32> for Namespace {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

/// A set of namespaces to restrict a listing to.
///
/// Ordered so the rendered API parameter is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceFilter(BTreeSet<Namespace>);

impl NamespaceFilter {
    pub fn new(namespaces: impl IntoIterator<Item = Namespace>) -> Self {
        Self(namespaces.into_iter().collect())
    }

    pub fn single(namespace: Namespace) -> Self {
        Self::new([namespace])
    }

    pub fn contains(&self, namespace: Namespace) -> bool {
        self.0.contains(&namespace)
    }

    /// Returns the filter extended with `namespace`.
    pub fn with(mut self, namespace: Namespace) -> Self {
        self.0.insert(namespace);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Namespace> + '_ {
        self.0.iter().copied()
    }

    /// Renders the filter as a pipe-separated id list (`"0|14"`).
    pub fn to_api_param(&self) -> String {
        self.0
            .iter()
            .map(|ns| ns.id().to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl FromIterator<Namespace> for NamespaceFilter {
    fn from_iter<I: IntoIterator<Item = Namespace>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_resolution() {
        assert_eq!(Namespace::from_prefix("Category"), Some(Namespace::CATEGORY));
        assert_eq!(Namespace::from_prefix("category"), Some(Namespace::CATEGORY));
        assert_eq!(
            Namespace::from_prefix("Wikipedia_talk"),
            Some(Namespace::PROJECT_TALK)
        );
        assert_eq!(Namespace::from_prefix("Project"), Some(Namespace::PROJECT));
        assert_eq!(Namespace::from_prefix("Image"), Some(Namespace::FILE));
        assert_eq!(Namespace::from_prefix("Risk"), None);
    }

    #[test]
    fn test_display_prefix_is_canonical() {
        assert_eq!(Namespace::PROJECT.display_prefix(), Some("Wikipedia"));
        assert_eq!(Namespace::FILE.display_prefix(), Some("File"));
        assert_eq!(Namespace::MAIN.display_prefix(), None);
        assert_eq!(Namespace::MAIN.to_string(), "(Main)");
    }

    #[test]
    fn test_talk_namespaces() {
        assert!(Namespace::TALK.is_talk());
        assert!(Namespace::CATEGORY_TALK.is_talk());
        assert!(!Namespace::CATEGORY.is_talk());
        assert!(!Namespace::MAIN.is_talk());
    }

    #[test]
    fn test_filter_api_param_is_sorted() {
        let filter = NamespaceFilter::new([Namespace::CATEGORY, Namespace::MAIN])
            .with(Namespace::PROJECT);
        assert_eq!(filter.to_api_param(), "0|4|14");
        assert!(filter.contains(Namespace::PROJECT));
        assert!(!filter.contains(Namespace::FILE));
    }
}
