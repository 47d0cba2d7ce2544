//! Page identity values: `PageRef`, `Category`, and category counts.

use super::{Namespace, ValidationError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use tokio::sync::OnceCell;

/// Characters MediaWiki never allows inside a title.
const ILLEGAL_TITLE_CHARS: &[char] = &['#', '<', '>', '[', ']', '|', '{', '}'];

/// Identity of a wiki page: namespace plus full, prefixed title.
///
/// Two refs to the same page compare equal regardless of where they came
/// from. Titles built by [`PageRef::parse`] are canonicalized; titles coming
/// back from the API are already canonical and are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageRef {
    #[serde(rename = "ns")]
    namespace: Namespace,
    title: String,
}

impl PageRef {
    /// Builds a ref from values the remote already canonicalized.
    pub fn new(namespace: Namespace, title: impl Into<String>) -> Self {
        Self {
            namespace,
            title: title.into(),
        }
    }

    /// Parses a user-supplied title such as `"Category:Wikipedia_categories"`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = canonical_spacing(input);
        // A leading colon forces a link to the page itself (`:Category:Foo`).
        let cleaned = cleaned.strip_prefix(':').unwrap_or(&cleaned).trim();

        if let Some(bad) = cleaned.chars().find(|c| ILLEGAL_TITLE_CHARS.contains(c)) {
            return Err(ValidationError::InvalidTitle {
                title: input.to_string(),
                reason: format!("contains the illegal character '{}'", bad),
            });
        }

        let (namespace, name) = match cleaned.split_once(':') {
            Some((prefix, rest)) => match Namespace::from_prefix(prefix) {
                Some(ns) => (ns, rest.trim()),
                None => (Namespace::MAIN, cleaned),
            },
            None => (Namespace::MAIN, cleaned),
        };

        if name.is_empty() {
            return Err(ValidationError::EmptyField("title"));
        }

        let name = capitalize_first(name);
        let title = match namespace.display_prefix() {
            Some(prefix) => format!("{}:{}", prefix, name),
            None => name,
        };

        Ok(Self { namespace, title })
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// The full title including the namespace prefix.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The title without its namespace prefix.
    pub fn name(&self) -> &str {
        if self.namespace == Namespace::MAIN {
            return &self.title;
        }
        self.title
            .split_once(':')
            .map(|(_, name)| name)
            .unwrap_or(&self.title)
    }

    pub fn is_category(&self) -> bool {
        self.namespace == Namespace::CATEGORY
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Underscores become spaces and whitespace runs collapse, as MediaWiki does.
fn canonical_spacing(input: &str) -> String {
    lazy_static::lazy_static! {
        static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+")
            .expect("Failed to compile whitespace regex - this is a bug in the code");
    }
    WHITESPACE_RUN
        .replace_all(&input.replace('_', " "), " ")
        .trim()
        .to_string()
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Aggregate counts MediaWiki keeps for a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub pages: u64,
    pub files: u64,
    pub subcats: u64,
    pub size: u64,
}

impl CategoryInfo {
    /// Members of every kind (pages, files and subcategories).
    pub fn member_total(&self) -> u64 {
        self.pages + self.files + self.subcats
    }

    pub fn is_empty(&self) -> bool {
        self.member_total() == 0
    }
}

/// A page in the Category namespace.
///
/// Carries an optional sort key, used only when rendering a category link,
/// and a memo cell for its [`CategoryInfo`] that is filled on first access
/// and lives as long as this value. Equality and hashing look at the page
/// identity only.
#[derive(Debug, Clone)]
pub struct Category {
    page: PageRef,
    sort_key: Option<String>,
    info: OnceCell<CategoryInfo>,
}

impl Category {
    /// Parses a category title, with or without the `Category:` prefix.
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        let page = PageRef::parse(title)?;
        let page = match page.namespace() {
            Namespace::CATEGORY => page,
            Namespace::MAIN => PageRef::parse(&format!("Category:{}", page.title()))?,
            _ => {
                return Err(ValidationError::WrongNamespace {
                    title: page.title().to_string(),
                    expected: Namespace::CATEGORY,
                })
            }
        };
        Ok(Self::from_page(page))
    }

    fn from_page(page: PageRef) -> Self {
        Self {
            page,
            sort_key: None,
            info: OnceCell::new(),
        }
    }

    pub fn with_sort_key(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = Some(sort_key.into());
        self
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn page(&self) -> &PageRef {
        &self.page
    }

    pub fn title(&self) -> &str {
        self.page.title()
    }

    pub fn into_page(self) -> PageRef {
        self.page
    }

    /// Renders the category as wikitext link, e.g. `[[Category:Foo|Key]]`.
    ///
    /// `sort_key` overrides the stored key for this rendering only.
    pub fn as_link(&self, sort_key: Option<&str>) -> String {
        match sort_key.or(self.sort_key.as_deref()) {
            Some(key) => format!("[[{}|{}]]", self.page.title(), key),
            None => format!("[[{}]]", self.page.title()),
        }
    }

    /// Counts fetched so far, without touching the remote.
    pub fn cached_info(&self) -> Option<&CategoryInfo> {
        self.info.get()
    }

    pub(crate) fn info_cell(&self) -> &OnceCell<CategoryInfo> {
        &self.info
    }
}

impl TryFrom<PageRef> for Category {
    type Error = ValidationError;

    fn try_from(page: PageRef) -> Result<Self, Self::Error> {
        if page.is_category() {
            Ok(Self::from_page(page))
        } else {
            Err(ValidationError::WrongNamespace {
                title: page.title().to_string(),
                expected: Namespace::CATEGORY,
            })
        }
    }
}

impl From<Category> for PageRef {
    fn from(category: Category) -> Self {
        category.page
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.page == other.page
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.page.hash(state);
    }
}

impl PartialEq<PageRef> for Category {
    fn eq(&self, other: &PageRef) -> bool {
        &self.page == other
    }
}

impl PartialEq<Category> for PageRef {
    fn eq(&self, other: &Category) -> bool {
        self == &other.page
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.page)
    }
}
