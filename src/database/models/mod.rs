pub mod author;
pub mod story;

pub use author::{Author, AuthorId, AuthorRow, AUTHOR_FIELD_MAX_LEN};
pub use story::{
    Category, InvalidEnum, NewStory, NewsStory, Region, StoryId, StoryRow, DETAILS_MAX_LEN, HEADLINE_MAX_LEN,
};
