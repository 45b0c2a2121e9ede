use thiserror::Error;

/// Length of every raw key, private or public.
pub const KEY_LEN: usize = 32;
/// Length of a padded base64 key string.
pub const KEY_LEN_BASE64: usize = 44;
/// Length of a hex key string.
pub const KEY_LEN_HEX: usize = 64;

/// 32 raw key bytes. Whether they are private or public depends on how they were made.
pub type RawKey = [u8; KEY_LEN];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("invalid key encoding")]
    InvalidEncoding,
    #[error("random source unavailable")]
    RandomnessUnavailable,
}

impl KeyError {
    /// Stable numeric code, for callers that hand errors across an FFI boundary.
    pub fn code(&self) -> u32 {
        match self {
            KeyError::InvalidEncoding => 0x1002,
            KeyError::InvalidLength { .. } => 0x1003,
            KeyError::RandomnessUnavailable => 0x1004,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let len = KeyError::InvalidLength {
            expected: KEY_LEN,
            actual: 31,
        };
        assert_eq!(len.code(), 0x1003);
        assert_eq!(KeyError::InvalidEncoding.code(), 0x1002);
        assert_eq!(KeyError::RandomnessUnavailable.code(), 0x1004);
        assert_eq!(len.to_string(), "invalid key length: expected 32, got 31");
    }
}
