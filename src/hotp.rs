use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::secret::Secret;

// HOTP https://datatracker.ietf.org/doc/html/rfc4226

type HmacSha1 = Hmac<Sha1>;

pub const DIGITS: u32 = 6;

/// One-time code for an already serialized counter, in `[0, 10^DIGITS)`.
pub fn get_hotp(secret: &Secret, counter: &[u8; 8]) -> u32 {
    let hmac = make_hmac(secret.as_bytes(), counter);
    truncate(&hmac)
}

// HMAC_SHA-1 -> 20 byte string
fn make_hmac(secret: &[u8], counter: &[u8; 8]) -> [u8; 20] {
    let mut mac = HmacSha1::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(counter);

    let mut digest = [0u8; 20];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

// reduce to 4 byte string
// then s to num mod 10^Digit
fn truncate(hmac: &[u8; 20]) -> u32 {
    let base_code = dynamic_truncation(hmac);

    base_code % u32::pow(10, DIGITS)
}

// Let OffsetBits be the low-order 4 bits of String[19]
// Offset = StToNum(OffsetBits) // 0 <= OffSet <= 15
// Let P = String[OffSet]...String[OffSet+3]
// Return the Last 31 bits of P
fn dynamic_truncation(hmac: &[u8; 20]) -> u32 {
    let offset = (hmac[19] & 0xf) as usize;
    (hmac[offset] as u32 & 0x7f) << 24
        | (hmac[offset + 1] as u32) << 16
        | (hmac[offset + 2] as u32) << 8
        | (hmac[offset + 3] as u32)
}
