use serde::{Deserialize, Serialize};

use crate::database::models::{Author, Category, NewsStory, Region};
use crate::validation::date::format_story_date;

/// Public wire shape of a single story in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryView {
    pub key: i64,
    pub headline: String,
    pub story_cat: Category,
    pub story_region: Region,
    /// Display name of the owning author, never their id
    pub author: String,
    /// `DD/MM/YYYY`
    pub story_date: String,
    pub story_details: String,
}

/// `{"stories": [...]}` envelope returned by the listing endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoriesResponse {
    pub stories: Vec<StoryView>,
}

/// Project a stored story and its author into the wire shape
pub fn story_to_view(story: &NewsStory, author: &Author) -> StoryView {
    StoryView {
        key: story.id.0,
        headline: story.headline.clone(),
        story_cat: story.category,
        story_region: story.region,
        author: author.name.clone(),
        story_date: format_story_date(story.creation_date),
        story_details: story.details.clone(),
    }
}
