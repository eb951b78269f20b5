// handlers/public/mod.rs - Handlers reachable without a session
pub mod login;
pub mod stories;

pub use login::login;
pub use stories::list_stories;
