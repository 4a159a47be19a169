//! Auth handlers and supporting modules.
//!
//! ## Endpoints
//!
//! - `POST /api/auth/register`: create an account (username and email unique).
//! - `POST /api/auth/login`: verify the password and set the `token` cookie.
//! - `POST /api/auth/logout`: clear the `token` cookie.
//!
//! ## Sessions
//!
//! The `token` cookie carries an HS256 JWT with the user id and `isAdmin: false`,
//! valid for seven days. Nothing is stored server side, so logout only clears
//! the cookie.
//!
//! ## Failure responses
//!
//! Unknown usernames and wrong passwords produce the same `400` body, and the
//! unknown-user path still performs a bcrypt comparison. Internal error details
//! are only returned when running with `--environment development`.

pub mod error;
pub mod login;
pub mod logout;
mod memory;
mod password;
pub mod register;
pub mod session;
mod state;
mod storage;
pub mod types;
mod validation;

pub use error::{AuthError, BadRequest, ValidationErrors, Violation};
pub use login::login;
pub use logout::logout;
pub use memory::MemoryUserStore;
pub use password::PasswordError;
pub use register::register;
pub use state::{AuthConfig, AuthState, Environment, DEFAULT_BCRYPT_COST};
pub use storage::{InsertOutcome, NewUser, PgUserStore, StoreError, User, UserStore};
