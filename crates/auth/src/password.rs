//! Passcode hashing and verification
//!
//! Team passcodes are hashed with Argon2id and stored in PHC format.
//! Next to the hash sits a short tag: a cheap, unsalted Argon2id digest cut
//! to 16 bits. It narrows a lookup to a few candidate teams so a request
//! pays for one full verification, and it is too short to confirm a guess.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AuthError, Result};

/// Hash a passcode using Argon2id
///
/// Returns the hash in PHC format: `$argon2id$v=19$m=...,t=...,p=...$salt$hash`
///
/// # Example
///
/// ```
/// use pacsocial_auth::password::hash_passcode;
///
/// let hash = hash_passcode("team-rocket").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_passcode(passcode: &str) -> Result<String> {
    if passcode.is_empty() {
        return Err(AuthError::EmptyPasscode);
    }

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(passcode.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(format!("hashing failed: {}", e)))
}

const TAG_SALT: &[u8] = b"pacsocial-team-tag";
const TAG_BYTES: usize = 2;

/// Lookup tag for a passcode: 4 hex chars, equal for equal passcodes
pub fn passcode_tag(passcode: &str) -> Result<String> {
    let params = Params::new(Params::MIN_M_COST, 1, 1, Some(Params::MIN_OUTPUT_LEN))
        .map_err(|e| AuthError::Hash(format!("tag parameters: {}", e)))?;
    let mut digest = [0u8; Params::MIN_OUTPUT_LEN];
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(passcode.as_bytes(), TAG_SALT, &mut digest)
        .map_err(|e| AuthError::Hash(format!("tagging failed: {}", e)))?;

    Ok(digest[..TAG_BYTES].iter().map(|b| format!("{:02x}", b)).collect())
}

/// Verify a presented passcode against a stored hash
pub fn verify_passcode(passcode: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AuthError::Hash(format!("invalid stored hash: {}", e)))?;

    match Argon2::default().verify_password(passcode.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hash(format!("verification failed: {}", e))),
    }
}
