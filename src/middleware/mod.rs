pub mod auth;
pub mod page_gate;

pub use auth::AuthUser;
pub use page_gate::browser_gate;
