//! Checksum utilities for upload integrity

use crate::error::{EpdError, Result};
use sha2::{Digest, Sha256};
use std::io::Read;

/// Compute the SHA-256 checksum of a byte slice, hex-encoded
pub fn checksum_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Compute the SHA-256 checksum of any readable source, hex-encoded
pub fn compute_checksum<R: Read>(reader: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Verify that a byte slice matches an expected checksum
pub fn verify_bytes(bytes: &[u8], expected: &str) -> Result<()> {
    let actual = checksum_bytes(bytes);
    if actual == expected {
        Ok(())
    } else {
        Err(EpdError::ChecksumMismatch {
            expected: expected.to_string(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_checksum_bytes_sha256() {
        let checksum = checksum_bytes(b"hello world");
        assert_eq!(
            checksum,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_compute_checksum_matches_bytes() {
        let data = b"Equipment Name,Type\nPump-1,Pump\n";
        let mut cursor = Cursor::new(data);
        let streamed = compute_checksum(&mut cursor).unwrap();
        assert_eq!(streamed, checksum_bytes(data));
    }

    #[test]
    fn test_verify_bytes() {
        let expected = checksum_bytes(b"payload");
        assert!(verify_bytes(b"payload", &expected).is_ok());
        assert!(matches!(
            verify_bytes(b"tampered", &expected),
            Err(EpdError::ChecksumMismatch { .. })
        ));
    }
}
