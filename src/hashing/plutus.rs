// SPDX-License-Identifier: Apache-2.0

//! Shared CBOR and digest primitives for the hashing layer.

use std::convert::Infallible;

use blake2::digest::consts::U32;
use blake2::{
    Blake2b,
    Digest,
};
use minicbor::encode::Error as EncodeError;
use minicbor::Encoder;

/// Plutus `stringToBuiltinByteString` chunks byte strings at 64 bytes.
pub(crate) const CHUNK_SIZE: usize = 64;

type Blake2b256 = Blake2b<U32>;

/// Blake2b-256 of `bytes`, as 64 lowercase hex characters.
pub(crate) fn blake2b_256_hex(bytes: &[u8]) -> String {
    hex::encode(Blake2b256::digest(bytes))
}

/// Runs an encoding closure against a fresh in-memory encoder.
pub(crate) fn encode_to_vec(
    f: impl FnOnce(&mut Encoder<Vec<u8>>) -> Result<(), EncodeError<Infallible>>,
) -> Vec<u8> {
    let mut encoder = Encoder::new(Vec::new());

    // Writing to a Vec cannot fail and nothing here emits a custom message.
    f(&mut encoder).expect("in-memory CBOR encoding cannot fail");

    encoder.into_writer()
}

/// Encodes a byte string the way Plutus `serialiseData` does: a single
/// definite-length string up to 64 bytes, an indefinite-length sequence of
/// 64-byte definite chunks beyond that.
pub(crate) fn encode_plutus_bytes(
    e: &mut Encoder<Vec<u8>>,
    bytes: &[u8],
) -> Result<(), EncodeError<Infallible>> {
    if bytes.len() <= CHUNK_SIZE {
        e.bytes(bytes)?;
        return Ok(());
    }

    e.begin_bytes()?;
    for chunk in bytes.chunks(CHUNK_SIZE) {
        e.bytes(chunk)?;
    }
    e.end()?;

    Ok(())
}

/// Whether `s` is a 64-character hex digest (either case).
pub(crate) fn is_hex_digest(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Case-insensitive digest comparison.
pub(crate) fn digest_eq(computed: &str, expected: &str) -> bool {
    computed.eq_ignore_ascii_case(expected)
}
