use std::fmt;

use heapless::Vec;
use tracing::debug;

use crate::error::TotpError;

// Largest decoded secret accepted, in bytes.
pub const SECRET_CAPACITY: usize = 64;

/// Shared secret decoded from its Base32 form. Fixed for the life of the process.
pub struct Secret {
    bytes: Vec<u8, SECRET_CAPACITY>,
}

impl Secret {
    /// Decodes a user supplied Base32 string. Spaces are dropped and letters
    /// are uppercased before decoding.
    pub fn from_base32(input: &str) -> Result<Self, TotpError> {
        let normalized = normalize(input);
        let bytes = decode_base32::<SECRET_CAPACITY>(&normalized)?;
        debug!(len = bytes.len(), "decoded secret");

        Ok(Secret { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    // Always false once decoded, decoding rejects empty secrets.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Never print the key material.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret").field("len", &self.len()).finish()
    }
}

fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

// RFC 4648 alphabet: A-Z => 0-25, 2-7 => 26-31
fn base32_value(c: char) -> Option<u8> {
    match c.to_ascii_uppercase() {
        c @ 'A'..='Z' => Some(c as u8 - b'A'),
        c @ '2'..='7' => Some(c as u8 - b'2' + 26),
        _ => None,
    }
}

/// Decodes Base32 into at most `N` bytes.
///
/// Characters outside the alphabet, padding included, are skipped rather than
/// rejected. Trailing bits that do not fill a whole byte are dropped.
pub fn decode_base32<const N: usize>(encoded: &str) -> Result<Vec<u8, N>, TotpError> {
    let mut out: Vec<u8, N> = Vec::new();
    let mut buffer: u32 = 0;
    let mut bits_left: u32 = 0;

    for value in encoded.chars().filter_map(base32_value) {
        buffer = (buffer << 5) | u32::from(value);
        bits_left += 5;

        if bits_left >= 8 {
            bits_left -= 8;
            let byte = (buffer >> bits_left) as u8;
            out.push(byte)
                .map_err(|_| TotpError::BufferOverflow { capacity: N })?;
            buffer &= (1 << bits_left) - 1;
        }
    }

    if out.is_empty() {
        return Err(TotpError::InvalidSecret);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::constants::*;
    use data_encoding::BASE32_NOPAD;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn decodes_rfc_secret() {
        let secret = Secret::from_base32(RFC_SECRET).unwrap();
        assert_eq!(secret.as_bytes(), RFC_SECRET_ASCII.as_bytes());
        assert_eq!(secret.len(), 20);
        assert!(!secret.is_empty());
    }

    #[test]
    fn decodes_short_rfc_prefix() {
        let secret = Secret::from_base32("GEZDGNBVGY3TQOJQ").unwrap();
        assert_eq!(secret.as_bytes(), b"1234567890");
    }

    #[test]
    fn ignores_case_and_spaces() {
        let upper = Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap();
        let lower = Secret::from_base32("jbswy3dp ehpk3pxp").unwrap();

        assert_eq!(upper.as_bytes(), lower.as_bytes());
        assert_eq!(upper.as_bytes(), b"Hello!\xde\xad\xbe\xef");
    }

    #[test]
    fn leading_and_trailing_whitespace_is_harmless() {
        let secret = Secret::from_base32("  JBSW Y3DP EHPK 3PXP \n").unwrap();
        assert_eq!(secret.as_bytes(), b"Hello!\xde\xad\xbe\xef");
    }

    #[test]
    fn skips_padding() {
        let secret = Secret::from_base32("MFRGG===").unwrap();
        assert_eq!(secret.as_bytes(), b"abc");
    }

    #[test]
    fn skips_stray_punctuation() {
        let clean = Secret::from_base32("JBSWY3DPEHPK3PXP").unwrap();
        let noisy = Secret::from_base32("JBSW-Y3DP.EHPK,3PXP!").unwrap();
        assert_eq!(clean.as_bytes(), noisy.as_bytes());
    }

    #[rstest]
    #[case("!!!!")]
    #[case("")]
    #[case("\n")]
    #[case("    ")]
    #[case("====")]
    // a single symbol is only 5 bits, not a whole byte
    #[case("A")]
    fn rejects_input_without_a_full_byte(#[case] input: &str) {
        let err = Secret::from_base32(input).unwrap_err();
        assert!(matches!(err, TotpError::InvalidSecret), "{:?}", err);
    }

    #[test]
    fn accepts_secret_at_capacity() {
        // 103 symbols = 515 bits = 64 whole bytes
        let input = "A".repeat(103);
        let secret = Secret::from_base32(&input).unwrap();
        assert_eq!(secret.len(), SECRET_CAPACITY);
    }

    #[test]
    fn rejects_secret_over_capacity() {
        let input = "A".repeat(104);
        let err = Secret::from_base32(&input).unwrap_err();
        assert!(
            matches!(err, TotpError::BufferOverflow { capacity: SECRET_CAPACITY }),
            "{:?}",
            err
        );
    }

    #[test]
    fn capacity_is_chosen_by_the_caller() {
        let decoded = decode_base32::<5>("MFRGGZDF").unwrap();
        assert_eq!(&decoded[..], b"abcde");

        let err = decode_base32::<4>("MFRGGZDF").unwrap_err();
        assert!(matches!(err, TotpError::BufferOverflow { capacity: 4 }));
    }

    #[rstest]
    #[case(&b"12345678901234567890"[..])]
    #[case(&b"f"[..])]
    #[case(&b"foobar"[..])]
    #[case(&[0xff, 0x00, 0x7f, 0x80, 0x01][..])]
    fn agrees_with_reference_encoder(#[case] raw: &[u8]) {
        let encoded = BASE32_NOPAD.encode(raw);
        let decoded = decode_base32::<SECRET_CAPACITY>(&encoded).unwrap();
        assert_eq!(&decoded[..], raw);
    }

    #[test]
    fn debug_hides_key_bytes() {
        let secret = Secret::from_base32(RFC_SECRET).unwrap();
        assert_eq!(format!("{:?}", secret), "Secret { len: 20 }");
    }
}
