// handlers/protected/mod.rs - Handlers that require a bound session
pub mod logout;
pub mod story;

pub use logout::logout;
pub use story::{delete_story, post_story};
