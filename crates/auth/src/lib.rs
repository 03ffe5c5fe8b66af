//! PacSocial - Team Authentication
//!
//! Competition teams share a passcode. Clients present it as
//! `Authorization: Bearer <passcode>`; the server stores only Argon2id
//! hashes plus a short lookup tag, and verifies the presented value against
//! the teams sharing its tag.
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | no `Authorization` header | [`AuthError::MissingToken`] (401) |
//! | header carries no usable passcode | [`AuthError::UnknownPasscode`] (403) |
//! | passcode matches no team | [`AuthError::UnknownPasscode`] (403) |
//! | passcode matches a team | that team's id |

mod authenticator;
mod error;
pub mod password;

pub use authenticator::{TeamAuthenticator, TeamCredential, TeamDirectory, bearer_token};
pub use error::{AuthError, Result};
