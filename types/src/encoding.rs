//! Encoding helpers shared by the identifier and wire types.
//!
//! Well-known protocol identifiers (embedded contract addresses, the ZNN and QSR token
//! standards) are spelled out as bech32 data parts. The constant decoder below turns
//! those spellings into raw bytes at compile time; the checksum is computed at display
//! time by the `bech32` crate.

/// The bech32 data alphabet.
pub const CHARSET: &[u8; 32] = b"qpzry9x8gf2tvdw0s3jn54khce6mua7l";

const DECODE_TABLE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < 32 {
        table[CHARSET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Decode a bech32 data part (no hrp, no checksum) of exactly `N * 8 / 5` characters
/// into `N` bytes. Panics on characters outside the alphabet, so it is only meant for
/// constant inputs.
pub const fn decode_data_part<const N: usize>(chars: &[u8]) -> [u8; N] {
    assert!(chars.len() * 5 == N * 8, "data part length must be a whole number of bytes");
    let mut out = [0u8; N];
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    let mut written = 0;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        assert!(c < 128, "non-ascii data part");
        let v = DECODE_TABLE[c as usize];
        assert!(v != 0xFF, "character outside bech32 alphabet");
        acc = (acc << 5) | v as u32;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out[written] = (acc >> bits) as u8;
            written += 1;
            acc &= (1 << bits) - 1;
        }
        i += 1;
    }
    out
}

/// Serde adapter storing a byte vector as standard base64, the form the node uses for
/// block data, public keys and signatures.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        STANDARD.decode(text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_all_q_as_zero() {
        let bytes: [u8; 5] = decode_data_part(b"qqqqqqqq");
        assert_eq!(bytes, [0u8; 5]);
    }

    #[test]
    fn decodes_all_l_as_ones() {
        let bytes: [u8; 5] = decode_data_part(b"llllllll");
        assert_eq!(bytes, [0xFFu8; 5]);
    }

    #[test]
    fn decodes_mixed() {
        // "p" = 1, so the 5-bit stream is 00001 followed by zeros.
        let bytes: [u8; 5] = decode_data_part(b"pqqqqqqq");
        assert_eq!(bytes, [0b0000_1000, 0, 0, 0, 0]);
    }
}
