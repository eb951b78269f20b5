pub mod filter;
pub mod types;

pub use filter::StoryFilter;
pub use types::*;
