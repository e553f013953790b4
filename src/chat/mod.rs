pub mod models;
pub mod prompt;
pub mod session;

pub use models::*;
pub use session::*;
