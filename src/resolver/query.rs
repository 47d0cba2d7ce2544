// src/resolver/query.rs
//! Options that shape one membership listing.

use crate::error::AppError;
use crate::types::{Namespace, NamespaceFilter};

/// How far below the starting category a listing descends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Recurse {
    /// Direct members only.
    #[default]
    Direct,
    /// Descend into subcategories up to this many levels below the root.
    Depth(u32),
    Unbounded,
}

impl Recurse {
    /// Interprets a numeric depth: `0` lists direct members only.
    pub fn from_depth(depth: i64) -> Result<Self, AppError> {
        match depth {
            d if d < 0 => Err(AppError::InvalidArgument(format!(
                "recursion depth must not be negative (got {})",
                d
            ))),
            0 => Ok(Recurse::Direct),
            d => Ok(u32::try_from(d).map_or(Recurse::Unbounded, Recurse::Depth)),
        }
    }

    /// Whether members of this level's subcategories are listed too.
    pub fn can_descend(self) -> bool {
        !matches!(self, Recurse::Direct | Recurse::Depth(0))
    }

    /// The setting that applies one level further down.
    pub fn descend(self) -> Self {
        match self {
            Recurse::Depth(d) if d > 1 => Recurse::Depth(d - 1),
            Recurse::Depth(_) | Recurse::Direct => Recurse::Direct,
            Recurse::Unbounded => Recurse::Unbounded,
        }
    }

    /// Levels left below the current one; `None` when unbounded.
    fn levels(self) -> Option<u32> {
        match self {
            Recurse::Direct => Some(0),
            Recurse::Depth(d) => Some(d),
            Recurse::Unbounded => None,
        }
    }

    /// Whether this setting reaches strictly deeper than `other`.
    pub fn outreaches(self, other: Recurse) -> bool {
        match (self.levels(), other.levels()) {
            (None, Some(_)) => true,
            (Some(mine), Some(theirs)) => mine > theirs,
            (_, None) => false,
        }
    }
}

impl From<bool> for Recurse {
    fn from(recurse: bool) -> Self {
        if recurse {
            Recurse::Unbounded
        } else {
            Recurse::Direct
        }
    }
}

/// Filter, recursion and cap for a listing.
///
/// ```
/// use wikicat::{MemberQuery, Namespace, Recurse};
///
/// let query = MemberQuery::new()
///     .namespace(Namespace::CATEGORY)
///     .recurse(Recurse::Depth(2))
///     .total(10);
/// assert_eq!(query.total_cap(), Some(10));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberQuery {
    namespaces: Option<NamespaceFilter>,
    recurse: Recurse,
    total: Option<usize>,
}

impl MemberQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to these namespaces. An empty filter matches nothing.
    pub fn namespaces(mut self, namespaces: NamespaceFilter) -> Self {
        self.namespaces = Some(namespaces);
        self
    }

    /// Adds one namespace to the filter.
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces = Some(self.namespaces.unwrap_or_default().with(namespace));
        self
    }

    pub fn recurse(mut self, recurse: impl Into<Recurse>) -> Self {
        self.recurse = recurse.into();
        self
    }

    /// Caps the number of items yielded across the whole traversal.
    pub fn total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    /// Like [`MemberQuery::total`], for caps coming from untyped input.
    pub fn checked_total(self, total: i64) -> Result<Self, AppError> {
        let total = usize::try_from(total).map_err(|_| {
            AppError::InvalidArgument(format!("total must not be negative (got {})", total))
        })?;
        Ok(self.total(total))
    }

    pub fn namespace_filter(&self) -> Option<&NamespaceFilter> {
        self.namespaces.as_ref()
    }

    pub fn recursion(&self) -> Recurse {
        self.recurse
    }

    pub fn total_cap(&self) -> Option<usize> {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_zero_is_direct() {
        assert_eq!(Recurse::from_depth(0).unwrap(), Recurse::Direct);
        assert_eq!(Recurse::from_depth(3).unwrap(), Recurse::Depth(3));
        assert_eq!(Recurse::from_depth(i64::MAX).unwrap(), Recurse::Unbounded);
    }

    #[test]
    fn test_negative_depth_is_rejected() {
        assert!(matches!(
            Recurse::from_depth(-1),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_descend_counts_down_to_direct() {
        let mut level = Recurse::Depth(2);
        assert!(level.can_descend());
        level = level.descend();
        assert_eq!(level, Recurse::Depth(1));
        assert!(level.can_descend());
        level = level.descend();
        assert_eq!(level, Recurse::Direct);
        assert!(!level.can_descend());
        assert_eq!(Recurse::Unbounded.descend(), Recurse::Unbounded);
    }

    #[test]
    fn test_outreaches_orders_budgets() {
        assert!(Recurse::Depth(2).outreaches(Recurse::Depth(1)));
        assert!(Recurse::Depth(1).outreaches(Recurse::Direct));
        assert!(Recurse::Unbounded.outreaches(Recurse::Depth(u32::MAX)));
        assert!(!Recurse::Depth(0).outreaches(Recurse::Direct));
        assert!(!Recurse::Unbounded.outreaches(Recurse::Unbounded));
        assert!(!Recurse::Depth(3).outreaches(Recurse::Unbounded));
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(Recurse::from(true), Recurse::Unbounded);
        assert_eq!(Recurse::from(false), Recurse::Direct);
    }

    #[test]
    fn test_namespace_builder_accumulates() {
        let query = MemberQuery::new()
            .namespace(Namespace::MAIN)
            .namespace(Namespace::CATEGORY);
        let filter = query.namespace_filter().unwrap();
        assert!(filter.contains(Namespace::MAIN));
        assert!(filter.contains(Namespace::CATEGORY));
        assert!(!filter.contains(Namespace::TALK));
    }

    #[test]
    fn test_checked_total() {
        assert_eq!(
            MemberQuery::new().checked_total(5).unwrap().total_cap(),
            Some(5)
        );
        assert!(matches!(
            MemberQuery::new().checked_total(-2),
            Err(AppError::InvalidArgument(_))
        ));
    }
}
