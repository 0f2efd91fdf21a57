use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash a signup password into an argon2 PHC string with a fresh salt.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    match Argon2::default().hash_password(plain.as_bytes(), &salt) {
        Ok(hash) => Ok(hash.to_string()),
        Err(e) => {
            error!(error = %e, "password hashing failed");
            Err(anyhow::anyhow!("password hashing failed: {e}"))
        }
    }
}

/// Check a submitted password against a stored PHC string. A mismatch is
/// `Ok(false)`; only an unparseable stored hash is an error.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "stored password hash is malformed");
        anyhow::anyhow!("malformed password hash: {e}")
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_hash_verifies_the_original_password() {
        let hash = hash_password("hunter2hunter2").expect("hash");
        assert!(verify_password("hunter2hunter2", &hash).expect("verify"));
        // The cleartext never appears in the PHC string.
        assert!(!hash.contains("hunter2"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn close_guesses_do_not_verify() {
        let hash = hash_password("str0ng and long").expect("hash");
        for guess in ["str0ng and lonG", "str0ng and long ", ""] {
            assert!(!verify_password(guess, &hash).expect("verify"));
        }
    }

    #[test]
    fn salts_differ_between_hashes() {
        let a = hash_password("same-input").expect("hash");
        let b = hash_password("same-input").expect("hash");
        assert_ne!(a, b);
        assert!(verify_password("same-input", &b).expect("verify"));
    }

    #[test]
    fn malformed_stored_hash_is_an_error_not_a_match() {
        assert!(verify_password("whatever", "corrupt-db-value").is_err());
    }
}
