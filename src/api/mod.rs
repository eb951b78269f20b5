pub mod format;

pub use format::{story_to_view, StoriesResponse, StoryView};
