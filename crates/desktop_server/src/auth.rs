//! Lock-screen password hashing.
//!
//! Stored hashes use the bcrypt modular format (`$2a$`, `$2b$`, `$2y$`), so values written by
//! other bcrypt implementations verify unchanged.

pub use bcrypt::BcryptError;

/// Work factor for new hashes.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    bcrypt::hash(password, HASH_COST)
}

/// Checks `password` against a stored hash. Malformed hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    bcrypt::verify(password, stored).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use bcrypt::Version;

    use super::*;

    #[test]
    fn hash_round_trips_and_rejects_other_passwords() {
        let stored = hash_password("1234").expect("hash");
        assert!(stored.starts_with("$2b$10$"));
        assert!(verify_password("1234", &stored));
        assert!(!verify_password("wrong", &stored));
    }

    #[test]
    fn salts_differ_between_hashes() {
        assert_ne!(
            hash_password("1234").expect("hash"),
            hash_password("1234").expect("hash")
        );
    }

    #[test]
    fn other_bcrypt_versions_verify() {
        let parts = bcrypt::hash_with_result("1234", 4).expect("hash");
        for version in [Version::TwoA, Version::TwoB, Version::TwoY] {
            let stored = parts.format_for_version(version);
            assert!(verify_password("1234", &stored), "{stored}");
            assert!(!verify_password("4321", &stored), "{stored}");
        }
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify_password("1234", ""));
        assert!(!verify_password("1234", "1234"));
        assert!(!verify_password("1234", "$2a$10$short"));
        assert!(!verify_password("1234", "sha256$00$00"));
    }
}
