pub mod commands;
pub mod date;
pub mod payload;

pub use commands::{DeleteStoryCommand, ListStoriesCommand, LoginCommand, PublishStoryCommand};
pub use date::{format_story_date, parse_story_date, server_today};
pub use payload::{parse_json_object, parse_utf8_json_object, RawPayload, JSON_ONLY, UTF8_JSON_ONLY};
