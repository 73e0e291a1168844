//! Fixed-width base-62 short codes.
//!
//! Maps a store-assigned identifier to an 8-character code and back. The
//! mapping is a bijection on `[0, MAX_IDENTIFIER]`: codes never collide because
//! identifiers never repeat, and decoding a code recovers the exact identifier
//! used for the indexed store lookup.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Store-assigned record identifier.
pub type Identifier = u64;

/// Number of characters in every short code.
pub const CODE_LENGTH: usize = 8;

/// Base-62 digit alphabet, in digit-value order.
///
/// `'0'` is the zero symbol used for left padding.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

const BASE: u64 = ALPHABET.len() as u64;

/// Largest encodable identifier: `62^8 - 1` (`"zzzzzzzz"`).
pub const MAX_IDENTIFIER: Identifier = 218_340_105_584_895;

/// Errors produced while converting between identifiers and codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The identifier does not fit in [`CODE_LENGTH`] base-62 digits.
    #[error("identifier {0} exceeds the short code capacity ({MAX_IDENTIFIER})")]
    Range(Identifier),

    /// The input is not a well-formed short code.
    #[error("malformed short code: {0}")]
    Format(String),
}

/// A validated, fixed-width short code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShortCode([u8; CODE_LENGTH]);

impl ShortCode {
    /// Encodes an identifier as a short code.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Range`] when `id > MAX_IDENTIFIER`.
    pub fn encode(id: Identifier) -> Result<Self, CodecError> {
        if id > MAX_IDENTIFIER {
            return Err(CodecError::Range(id));
        }

        // In range, so exactly CODE_LENGTH digits are enough and nothing is truncated.
        let mut digits = [ALPHABET[0]; CODE_LENGTH];
        let mut rest = id;
        for slot in digits.iter_mut().rev() {
            if rest == 0 {
                break;
            }
            *slot = ALPHABET[(rest % BASE) as usize];
            rest /= BASE;
        }
        debug_assert_eq!(rest, 0);

        Ok(Self(digits))
    }

    /// Parses and validates a short code.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Format`] if the input is not exactly
    /// [`CODE_LENGTH`] characters from [`ALPHABET`].
    pub fn parse(code: &str) -> Result<Self, CodecError> {
        let bytes = code.as_bytes();
        if bytes.len() != CODE_LENGTH {
            return Err(CodecError::Format(format!(
                "expected {} characters, got {}",
                CODE_LENGTH,
                code.chars().count()
            )));
        }

        if let Some(bad) = code.chars().find(|c| digit_value(*c).is_none()) {
            return Err(CodecError::Format(format!(
                "character {:?} is not base-62",
                bad
            )));
        }

        let mut digits = [0u8; CODE_LENGTH];
        digits.copy_from_slice(bytes);
        Ok(Self(digits))
    }

    /// Recovers the identifier this code was produced from.
    ///
    /// Leading zero symbols carry no value, so `"00000000"` decodes to `0`.
    pub fn identifier(&self) -> Identifier {
        self.0
            .iter()
            .skip_while(|&&b| b == ALPHABET[0])
            .fold(0, |acc, &b| {
                // Every byte was checked against the alphabet on construction.
                acc * BASE + digit_value(b as char).unwrap_or(0)
            })
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // ALPHABET is pure ASCII.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Builds the public short URL for this code under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.as_str())
    }
}

impl FromStr for ShortCode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShortCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 10),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 36),
        _ => None,
    }
}

/// Encodes an identifier into its fixed-width code string.
///
/// # Errors
///
/// Returns [`CodecError::Range`] for identifiers above [`MAX_IDENTIFIER`].
pub fn encode(id: Identifier) -> Result<String, CodecError> {
    ShortCode::encode(id).map(|code| code.to_string())
}

/// Decodes a code string back into its identifier.
///
/// # Errors
///
/// Returns [`CodecError::Format`] for inputs that are not valid short codes.
pub fn decode(code: &str) -> Result<Identifier, CodecError> {
    ShortCode::parse(code).map(|code| code.identifier())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_identifier_matches_capacity() {
        assert_eq!(MAX_IDENTIFIER, BASE.pow(CODE_LENGTH as u32) - 1);
    }

    #[test]
    fn test_alphabet_matches_digit_values() {
        for (i, &b) in ALPHABET.iter().enumerate() {
            assert_eq!(digit_value(b as char), Some(i as u64));
        }
    }

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode(0).unwrap(), "00000000");
        assert_eq!(decode("00000000").unwrap(), 0);
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(1).unwrap(), "00000001");
        assert_eq!(encode(10).unwrap(), "0000000A");
        assert_eq!(encode(61).unwrap(), "0000000z");
        assert_eq!(encode(62).unwrap(), "00000010");
        assert_eq!(encode(3843).unwrap(), "000000zz");
        assert_eq!(encode(MAX_IDENTIFIER).unwrap(), "zzzzzzzz");
    }

    #[test]
    fn test_round_trip_boundaries() {
        let mut samples = vec![0, 1, 61, 62, 63, MAX_IDENTIFIER - 1, MAX_IDENTIFIER];
        for power in 1..CODE_LENGTH as u32 {
            let p = BASE.pow(power);
            samples.extend([p - 1, p, p + 1]);
        }

        for id in samples {
            let code = encode(id).unwrap();
            assert_eq!(code.len(), CODE_LENGTH, "width for {}", id);
            assert_eq!(decode(&code).unwrap(), id, "round trip for {}", id);
        }
    }

    #[test]
    fn test_round_trip_strided_sweep() {
        // Large odd stride so every digit position takes many values.
        let stride = 7_919_000_003;
        let mut id = 0;
        while id <= MAX_IDENTIFIER {
            let code = ShortCode::encode(id).unwrap();
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert_eq!(code.identifier(), id);
            id += stride;
        }
    }

    #[test]
    fn test_round_trip_dense_low_range() {
        for id in 0..20_000 {
            assert_eq!(decode(&encode(id).unwrap()).unwrap(), id);
        }
    }

    #[test]
    fn test_encode_out_of_range() {
        assert_eq!(
            encode(MAX_IDENTIFIER + 1),
            Err(CodecError::Range(MAX_IDENTIFIER + 1))
        );
        assert!(matches!(encode(u64::MAX), Err(CodecError::Range(_))));
    }

    #[test]
    fn test_decode_wrong_length() {
        assert!(matches!(decode("0000001"), Err(CodecError::Format(_))));
        assert!(matches!(decode("000000001"), Err(CodecError::Format(_))));
        assert!(matches!(decode(""), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_decode_invalid_characters() {
        assert!(matches!(decode("0000000-"), Err(CodecError::Format(_))));
        assert!(matches!(decode("abc_defg"), Err(CodecError::Format(_))));
        assert!(matches!(decode("abc defg"), Err(CodecError::Format(_))));
        assert!(matches!(decode("health!!"), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_decode_multibyte_input_is_rejected() {
        // 8 bytes, 4 characters.
        assert!(matches!(decode("éééé"), Err(CodecError::Format(_))));
        // 8 characters, more than 8 bytes.
        assert!(matches!(decode("0000000é"), Err(CodecError::Format(_))));
    }

    #[test]
    fn test_decode_is_case_sensitive() {
        assert_ne!(decode("0000000a").unwrap(), decode("0000000A").unwrap());
    }

    #[test]
    fn test_short_code_to_url() {
        let code = ShortCode::encode(125).unwrap();
        assert_eq!(code.to_url("http://localhost:5000"), "http://localhost:5000/00000021");
        assert_eq!(code.to_url("http://localhost:5000/"), "http://localhost:5000/00000021");
    }

    #[test]
    fn test_short_code_from_str_and_display() {
        let code: ShortCode = "00Ab9zZq".parse().unwrap();
        assert_eq!(code.to_string(), "00Ab9zZq");
        assert!("00Ab9zZ".parse::<ShortCode>().is_err());
    }

    #[test]
    fn test_short_code_serializes_as_string() {
        let code = ShortCode::encode(62).unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"00000010\"");
    }
}
