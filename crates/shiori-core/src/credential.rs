//! PBKDF2-HMAC-SHA256 password hashes.
//!
//! The secret itself is never kept; only the salt, the iteration count and
//! the derived key are stored on the account.

use pbkdf2::pbkdf2_hmac;
use rand::Rng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;

type Hash = [u8; 32];

/// One-way salted hash of an account secret.
#[derive(Clone)]
pub struct Credential {
    salt: [u8; SALT_LEN],
    rounds: u32,
    digest: Hash,
}

impl Credential {
    /// Derive a credential from `secret` with a fresh random salt and
    /// `rounds` iterations. Zero is raised to one.
    pub fn derive(secret: &str, rounds: u32) -> Self {
        let rounds = rounds.max(1);
        let mut salt = [0u8; SALT_LEN];
        rand::thread_rng().fill(&mut salt);
        let digest = stretch(&salt, rounds, secret);
        Self {
            salt,
            rounds,
            digest,
        }
    }

    /// Constant-time check of `secret` against the stored digest, using the
    /// iteration count the credential was created with.
    pub fn matches(&self, secret: &str) -> bool {
        let candidate = stretch(&self.salt, self.rounds, secret);
        self.digest.ct_eq(&candidate).into()
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

fn stretch(salt: &[u8], rounds: u32, secret: &str) -> Hash {
    let mut digest = Hash::default();
    pbkdf2_hmac::<Sha256>(secret.as_bytes(), salt, rounds, &mut digest);
    digest
}
