//! Call-data encoding for embedded contracts.
//!
//! A call is a 4-byte selector, the first bytes of SHA3-256 over the canonical
//! signature (`Fuse(address)`), followed by one 32-byte head word per argument.
//! Static values sit right-aligned in their word. A `string` head holds the offset of
//! its tail, which is a length word followed by the bytes padded to a word boundary.

use znn_crypto::sha3_256;
use znn_types::{Address, Hash, TokenStandard};

const WORD: usize = 32;

/// A single argument of an embedded contract call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbiValue {
    Address(Address),
    TokenStandard(TokenStandard),
    Hash(Hash),
    Int64(i64),
    Uint8(u8),
    Uint256(u128),
    Bool(bool),
    String(String),
}

impl AbiValue {
    /// Canonical type name used in signatures.
    pub fn type_name(&self) -> &'static str {
        match self {
            AbiValue::Address(_) => "address",
            AbiValue::TokenStandard(_) => "tokenStandard",
            AbiValue::Hash(_) => "hash",
            AbiValue::Int64(_) => "int64",
            AbiValue::Uint8(_) => "uint8",
            AbiValue::Uint256(_) => "uint256",
            AbiValue::Bool(_) => "bool",
            AbiValue::String(_) => "string",
        }
    }

    fn is_dynamic(&self) -> bool {
        matches!(self, AbiValue::String(_))
    }

    fn static_word(&self) -> [u8; WORD] {
        let mut word = [0u8; WORD];
        match self {
            AbiValue::Address(a) => word[WORD - 20..].copy_from_slice(a.as_bytes()),
            AbiValue::TokenStandard(t) => word[WORD - 10..].copy_from_slice(t.as_bytes()),
            AbiValue::Hash(h) => word.copy_from_slice(h.as_bytes()),
            AbiValue::Int64(v) => {
                if *v < 0 {
                    word = [0xFF; WORD];
                }
                word[WORD - 8..].copy_from_slice(&v.to_be_bytes());
            }
            AbiValue::Uint8(v) => word[WORD - 1] = *v,
            AbiValue::Uint256(v) => word[WORD - 16..].copy_from_slice(&v.to_be_bytes()),
            AbiValue::Bool(b) => word[WORD - 1] = u8::from(*b),
            AbiValue::String(_) => {}
        }
        word
    }
}

fn usize_word(value: usize) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[WORD - 8..].copy_from_slice(&(value as u64).to_be_bytes());
    word
}

/// `Name(type1,type2)` for the given arguments.
pub fn signature(name: &str, args: &[AbiValue]) -> String {
    let types: Vec<&str> = args.iter().map(AbiValue::type_name).collect();
    format!("{name}({})", types.join(","))
}

/// First four bytes of SHA3-256 over `signature`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = sha3_256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Encode a call of `name` with `args`.
pub fn encode_call(name: &str, args: &[AbiValue]) -> Vec<u8> {
    let mut head = Vec::with_capacity(args.len() * WORD);
    let mut tail = Vec::new();
    for arg in args {
        if let AbiValue::String(text) = arg {
            head.extend_from_slice(&usize_word(args.len() * WORD + tail.len()));
            let bytes = text.as_bytes();
            tail.extend_from_slice(&usize_word(bytes.len()));
            tail.extend_from_slice(bytes);
            let padding = (WORD - bytes.len() % WORD) % WORD;
            tail.resize(tail.len() + padding, 0);
        } else {
            debug_assert!(!arg.is_dynamic());
            head.extend_from_slice(&arg.static_word());
        }
    }

    let mut out = Vec::with_capacity(4 + head.len() + tail.len());
    out.extend_from_slice(&selector(&signature(name, args)));
    out.extend_from_slice(&head);
    out.extend_from_slice(&tail);
    out
}
