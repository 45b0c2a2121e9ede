// Text encodings for raw keys: padded standard base64 and lowercase hex.
// Decoding is all-or-nothing, a rejected string never yields key bytes.
// Both encoders are constant-time over the key bytes and characters.
use crate::common::{KeyError, RawKey, KEY_LEN, KEY_LEN_BASE64, KEY_LEN_HEX};
use base64ct::{Base64, Encoding};
use log::trace;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

/// Encode a key as 44 characters of standard, padded base64.
pub fn encode_base64(key: &RawKey) -> String {
    Base64::encode_string(key)
}

/// Decode a 44 character base64 string into a key.
///
/// The padding must be canonical, so a 32 byte key always ends in a single `=`.
pub fn decode_base64(text: &str) -> Result<RawKey, KeyError> {
    if text.len() != KEY_LEN_BASE64 {
        trace!("rejected base64 key of length {}", text.len());
        return Err(KeyError::InvalidLength {
            expected: KEY_LEN_BASE64,
            actual: text.len(),
        });
    }
    // 44 characters hold up to 33 bytes; padding decides how many.
    let mut buf = Zeroizing::new([0u8; KEY_LEN + 1]);
    let decoded_len = Base64::decode(text, &mut buf[..])
        .map_err(|e| {
            trace!("rejected base64 key: {}", e);
            KeyError::InvalidEncoding
        })?
        .len();
    if decoded_len != KEY_LEN {
        trace!("base64 key decoded to {} bytes", decoded_len);
        return Err(KeyError::InvalidLength {
            expected: KEY_LEN,
            actual: decoded_len,
        });
    }
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&buf[..KEY_LEN]);

    // Reject stray low bits in the last symbol: only one text maps to a key.
    let canonical = Zeroizing::new(Base64::encode_string(&key));
    if !bool::from(canonical.as_bytes().ct_eq(text.as_bytes())) {
        trace!("rejected non-canonical base64 key");
        key.zeroize();
        return Err(KeyError::InvalidEncoding);
    }
    Ok(key)
}

/// Encode a key as 64 lowercase hex digits.
pub fn encode_hex(key: &RawKey) -> String {
    base16ct::lower::encode_string(key)
}

/// Decode 64 hex digits into a key. Either case is accepted.
pub fn decode_hex(text: &str) -> Result<RawKey, KeyError> {
    if text.len() != KEY_LEN_HEX {
        trace!("rejected hex key of length {}", text.len());
        return Err(KeyError::InvalidLength {
            expected: KEY_LEN_HEX,
            actual: text.len(),
        });
    }
    let mut buf = Zeroizing::new([0u8; KEY_LEN]);
    base16ct::mixed::decode(text, &mut buf[..]).map_err(|e| {
        trace!("rejected hex key: {}", e);
        KeyError::InvalidEncoding
    })?;
    Ok(*buf)
}

/// Decode a key written in either format, telling them apart by length.
///
/// Any other length is reported against the 44 character base64 form, the
/// one key files are normally written in.
pub fn decode_key(text: &str) -> Result<RawKey, KeyError> {
    match text.len() {
        KEY_LEN_BASE64 => decode_base64(text),
        KEY_LEN_HEX => decode_hex(text),
        actual => Err(KeyError::InvalidLength {
            expected: KEY_LEN_BASE64,
            actual,
        }),
    }
}
