// SPDX-License-Identifier: Apache-2.0

use super::plutus::{
    blake2b_256_hex,
    digest_eq,
    encode_plutus_bytes,
    encode_to_vec,
    is_hex_digest,
};

/// Hashes an ordered list of student learning targets into the on-chain
/// module token name.
///
/// Reproduces `blake2b_256 . serialiseData . toBuiltinData . map
/// stringToBuiltinByteString`: the SLTs become CBOR byte strings (64-byte
/// chunked beyond 64 bytes of UTF-8) inside an indefinite-length array.
#[must_use]
pub fn compute_slt_hash<S: AsRef<str>>(slts: &[S]) -> String {
    let encoded = encode_to_vec(|e| {
        e.begin_array()?;
        for slt in slts {
            encode_plutus_bytes(e, slt.as_ref().as_bytes())?;
        }
        e.end()?;
        Ok(())
    });

    blake2b_256_hex(&encoded)
}

/// The definite-length variant: the array stays indefinite, but every SLT
/// is a single definite-length byte string regardless of length.
///
/// The protocol YAML decides which variant a deployment commits to; both
/// agree for SLTs of 64 UTF-8 bytes or less.
#[must_use]
pub fn compute_slt_hash_definite<S: AsRef<str>>(slts: &[S]) -> String {
    let encoded = encode_to_vec(|e| {
        e.begin_array()?;
        for slt in slts {
            e.bytes(slt.as_ref().as_bytes())?;
        }
        e.end()?;
        Ok(())
    });

    blake2b_256_hex(&encoded)
}

/// Whether `expected` matches the hash of `slts`, ignoring hex case.
#[must_use]
pub fn verify_slt_hash<S: AsRef<str>>(slts: &[S], expected: &str) -> bool {
    digest_eq(&compute_slt_hash(slts), expected)
}

/// Whether `s` has the shape of an SLT hash (64 hex characters, either
/// case).
#[must_use]
pub fn is_valid_slt_hash(s: &str) -> bool {
    is_hex_digest(s)
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::{
        compute_slt_hash,
        compute_slt_hash_definite,
        is_valid_slt_hash,
        verify_slt_hash,
    };

    const MODULE_1_SLTS: [&str; 2] = [
        "I can mint an access token.",
        "I can complete an assignment to earn a credential.",
    ];

    #[test]
    fn reproduces_the_on_chain_module_token_name() {
        expect!["8dcbe1b925d87e6c547bbd8071c23a712db4c32751454b0948f8c846e9246b5c"]
            .assert_eq(&compute_slt_hash(&MODULE_1_SLTS));
    }

    #[test]
    fn empty_module_hashes_the_empty_array() {
        expect!["afc0da64183bf2664f3d4eec7238d524ba607faeeab24fc100eb861dba69971b"]
            .assert_eq(&compute_slt_hash::<&str>(&[]));
    }

    #[test]
    fn long_slts_are_chunked() {
        // 104 bytes of UTF-8, so the chunked and definite encodings differ.
        let slts = ["I can design a multi-signature treasury contract that enforces \
                     quorum rules across organizational roles."];

        expect!["8be3c9a4bc8407140bfb49a2316d5836a5e246278110b84c6244295cb71f9705"]
            .assert_eq(&compute_slt_hash(&slts));
        expect!["c2a10d16dbc6baa7412145da7142d570e0b7ea5e7ea524ecd74b8a059e2aee72"]
            .assert_eq(&compute_slt_hash_definite(&slts));
    }

    #[test]
    fn variants_agree_below_the_chunking_threshold() {
        assert_eq!(compute_slt_hash(&MODULE_1_SLTS), compute_slt_hash_definite(&MODULE_1_SLTS));
    }

    #[test]
    fn verification_round_trips_and_ignores_case() {
        let hash = compute_slt_hash(&MODULE_1_SLTS);

        assert!(verify_slt_hash(&MODULE_1_SLTS, &hash));
        assert!(verify_slt_hash(&MODULE_1_SLTS, &hash.to_uppercase()));
        assert!(!verify_slt_hash(&MODULE_1_SLTS[..1], &hash));
        assert!(verify_slt_hash::<&str>(&[], &compute_slt_hash::<&str>(&[])));
    }

    #[test]
    fn shape_check() {
        assert!(is_valid_slt_hash(&compute_slt_hash(&MODULE_1_SLTS)));
        assert!(is_valid_slt_hash(&compute_slt_hash(&MODULE_1_SLTS).to_uppercase()));
        assert!(!is_valid_slt_hash("8dcbe1"));
        assert!(!is_valid_slt_hash(&"g".repeat(64)));
    }
}
