pub mod response;
pub mod session;

pub use response::{ApiResponse, ApiResult, TextResponse, TextResult};
pub use session::{session_clear_cookie, session_context_middleware, session_set_cookie};
