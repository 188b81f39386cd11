use sha2::{Digest, Sha256};

/// SHA-256 over `name ++ email ++ phone` after normalization, as lowercase hex.
///
/// Name and email are trimmed and lower-cased; phone is only trimmed, so
/// case differences in phone still produce distinct fingerprints.
pub fn fingerprint(name: &str, email: &str, phone: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.trim().to_lowercase().as_bytes());
    hasher.update(email.trim().to_lowercase().as_bytes());
    hasher.update(phone.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}
