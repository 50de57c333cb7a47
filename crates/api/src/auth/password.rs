//! Argon2id password hashing and verification.
//!
//! Hashes are stored as PHC strings so the algorithm parameters and salt
//! travel with the hash. Password policy lives in `todoapp_core::users`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// A PHC hash of no real password, with the parameters of `Argon2::default()`.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$SBDIOuD9NcwqY9ovh4hvWg$37GqWEmlfb7L6h+2tD7pLNZ5D17yj1kpNmQMIv8EqN8";

/// Hash a plaintext password using Argon2id with a random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only for unparseable hashes.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Run one full verification against a hash that matches nothing.
///
/// Login calls this when there is no stored hash to check (unknown or
/// inactive username), so every failed login costs one Argon2 run.
pub fn verify_dummy(password: &str) {
    let _ = verify_password(password, DUMMY_HASH);
}
