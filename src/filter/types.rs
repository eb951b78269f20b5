use chrono::NaiveDate;

use crate::database::models::{Category, Region};

/// Literal that disables a predicate
pub const WILDCARD: &str = "*";

/// A predicate operand that is either "no filter" or a concrete value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard<T> {
    Any,
    Only(T),
}

impl<T> Wildcard<T> {
    /// `"*"` becomes `Any`; anything else goes through `parse`
    pub fn parse_with<E>(raw: &str, parse: impl FnOnce(&str) -> Result<T, E>) -> Result<Self, E> {
        if raw == WILDCARD {
            Ok(Wildcard::Any)
        } else {
            parse(raw).map(Wildcard::Only)
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Wildcard::Any)
    }
}

impl<T> Default for Wildcard<T> {
    fn default() -> Self {
        Wildcard::Any
    }
}

/// Resolved ListStories predicates. All-`Any` selects everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoryQuery {
    pub category: Wildcard<Category>,
    pub region: Wildcard<Region>,
    /// Inclusive lower bound on `creation_date`
    pub since: Wildcard<NaiveDate>,
}

impl StoryQuery {
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Wildcard::Only(category);
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = Wildcard::Only(region);
        self
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Wildcard::Only(since);
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        self.category.is_any() && self.region.is_any() && self.since.is_any()
    }
}
