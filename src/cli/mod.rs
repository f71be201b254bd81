mod auth;
mod run;
mod session;

pub use auth::print_auth_url;
pub use run::{RunOptions, run};
pub use session::{Session, SessionState};
