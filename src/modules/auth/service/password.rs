use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

#[derive(Debug)]
pub enum Error {
    HashingFailed,
}

/// Hashes with Argon2id and a random salt, returning the PHC string.
pub fn hash(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            tracing::error!("Failed to hash password: {}", err);
            Error::HashingFailed
        })
}

pub fn verify(password: &str, password_hash: &str) -> bool {
    let parsed = match PasswordHash::new(password_hash) {
        Ok(parsed) => parsed,
        Err(err) => {
            tracing::error!("Stored password hash is malformed: {}", err);
            return false;
        }
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_verify_against_the_original_password() {
        let hashed = hash("correct horse battery").unwrap();
        assert!(hashed.starts_with("$argon2id$"));
        assert!(verify("correct horse battery", &hashed));
        assert!(!verify("incorrect horse battery", &hashed));
    }

    #[test]
    fn same_password_gets_different_salts() {
        assert_ne!(hash("password123").unwrap(), hash("password123").unwrap());
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify("password123", "not-a-phc-string"));
    }
}
