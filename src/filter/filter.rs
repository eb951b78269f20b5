use crate::database::models::NewsStory;

use super::types::{StoryQuery, Wildcard};

/// Conjunctive category / region / since-date filter over a story sequence.
/// Input order is preserved; nothing is re-sorted.
pub struct StoryFilter {
    query: StoryQuery,
}

impl StoryFilter {
    pub fn new(query: StoryQuery) -> Self {
        Self { query }
    }

    pub fn matches(&self, story: &NewsStory) -> bool {
        self.category_matches(story) && self.region_matches(story) && self.date_matches(story)
    }

    pub fn apply(&self, stories: Vec<NewsStory>) -> Vec<NewsStory> {
        if self.query.is_unfiltered() {
            return stories;
        }

        let total = stories.len();
        let kept: Vec<NewsStory> = stories.into_iter().filter(|s| self.matches(s)).collect();
        tracing::debug!("Story filter kept {} of {} ({:?})", kept.len(), total, self.query);
        kept
    }

    fn category_matches(&self, story: &NewsStory) -> bool {
        match self.query.category {
            Wildcard::Any => true,
            Wildcard::Only(category) => story.category == category,
        }
    }

    fn region_matches(&self, story: &NewsStory) -> bool {
        match self.query.region {
            Wildcard::Any => true,
            Wildcard::Only(region) => story.region == region,
        }
    }

    // Inclusive: a story created on `since` itself is kept
    fn date_matches(&self, story: &NewsStory) -> bool {
        match self.query.since {
            Wildcard::Any => true,
            Wildcard::Only(since) => story.creation_date >= since,
        }
    }
}
