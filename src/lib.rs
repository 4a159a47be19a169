//! # Gatekeep
//!
//! `gatekeep` provides user registration, login and logout over HTTP.
//!
//! - **Register** validates the payload, rejects duplicate usernames or emails,
//!   stores a bcrypt hash of the password and never echoes user data back.
//! - **Login** verifies the password and issues a 7 day HS256 JWT in an
//!   `HttpOnly` cookie named `token`. Unknown users and wrong passwords get the
//!   same response.
//! - **Logout** clears the cookie. The server keeps no session state.
//!
//! Accounts live in Postgres; see `sql/schema.sql`.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
