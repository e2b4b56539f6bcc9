//! One-way password digests.
//!
//! Deterministic SHA-256 keyed with a process-wide pepper: login verifies by
//! re-hashing and comparing, so the digest function must stay stable for the
//! life of the stored credentials. The pepper keeps identical passwords from
//! producing recognizable digests across deployments without introducing
//! per-call randomness.

use sha2::{Digest, Sha256};

use crate::config::config;

pub fn hash(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(config().security.password_pepper.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn verify(password: &str, digest: &str) -> bool {
    hash(password) == digest
}
