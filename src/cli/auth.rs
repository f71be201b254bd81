use crate::{config::Config, spotify};

/// Prints the authorization URL for a manual login.
pub fn print_auth_url(config: &Config) {
    println!("{}", spotify::auth::authorize_url(config));
}
