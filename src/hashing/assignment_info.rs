// SPDX-License-Identifier: Apache-2.0

use serde_json::{
    Map,
    Value,
};

use super::plutus::{
    blake2b_256_hex,
    digest_eq,
    is_hex_digest,
};

/// Hashes a structured evidence document into the assignment-info
/// commitment that goes on-chain while the full evidence stays off-chain.
///
/// The document is normalized first ([`normalize_evidence`]), serialized to
/// canonical compact JSON, and hashed with Blake2b-256, so two documents
/// that differ only in key order or incidental whitespace commit to the
/// same hash.
#[must_use]
pub fn compute_assignment_info_hash(evidence: &Value) -> String {
    blake2b_256_hex(canonical_json(evidence).as_bytes())
}

/// Applies the commitment normalization rules recursively: object keys
/// sorted by code point, strings trimmed of surrounding whitespace, array
/// order preserved.
#[must_use]
pub fn normalize_evidence(evidence: &Value) -> Value {
    match evidence {
        Value::Object(map) => {
            // `serde_json`'s map is ordered by key, so rebuilding it sorts.
            let normalized: Map<String, Value> =
                map.iter().map(|(key, value)| (key.clone(), normalize_evidence(value))).collect();
            Value::Object(normalized)
        }
        Value::Array(items) => Value::Array(items.iter().map(normalize_evidence).collect()),
        Value::String(s) => Value::String(s.trim().to_owned()),
        other => other.clone(),
    }
}

fn canonical_json(evidence: &Value) -> String {
    normalize_evidence(evidence).to_string()
}

/// Whether `expected` matches the commitment of `evidence`, ignoring hex
/// case.
#[must_use]
pub fn verify_assignment_info_hash(evidence: &Value, expected: &str) -> bool {
    digest_eq(&compute_assignment_info_hash(evidence), expected)
}

/// The outcome of a detailed evidence verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceVerification {
    /// Whether the recomputed commitment matches.
    pub ok: bool,
    /// A human-readable explanation of the outcome.
    pub message: String,
}

/// Like [`verify_assignment_info_hash`], but explains the outcome so a
/// reviewer can act on a mismatch.
#[must_use]
pub fn verify_evidence_detailed(evidence: &Value, expected: &str) -> EvidenceVerification {
    if !is_hex_digest(expected) {
        return EvidenceVerification {
            ok: false,
            message: format!("expected hash is not a 64-character hex digest: `{expected}`"),
        };
    }

    let computed = compute_assignment_info_hash(evidence);

    if digest_eq(&computed, expected) {
        EvidenceVerification { ok: true, message: "evidence matches the on-chain commitment".to_owned() }
    } else {
        EvidenceVerification {
            ok: false,
            message: format!(
                "evidence hashes to {computed}, but the on-chain commitment is {}",
                expected.to_lowercase()
            ),
        }
    }
}

/// Whether `s` has the shape of an assignment-info hash.
#[must_use]
pub fn is_valid_assignment_info_hash(s: &str) -> bool {
    is_hex_digest(s)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        compute_assignment_info_hash,
        normalize_evidence,
        verify_assignment_info_hash,
        verify_evidence_detailed,
    };

    #[test]
    fn key_order_and_whitespace_do_not_matter() {
        let left = json!({ "b": 1, "a": "x " });
        let right = json!({ "a": "x", "b": 1 });

        assert_eq!(compute_assignment_info_hash(&left), compute_assignment_info_hash(&right));
        assert_eq!(
            compute_assignment_info_hash(&left),
            "1b42a87e8d798c869df122847ffced3598d07c89c5c491042b6ab5fb180fa6bd"
        );
    }

    #[test]
    fn nested_documents_hash_stably() {
        let evidence = json!({
            "summary": "  Implemented the vesting contract ",
            "assignment": "MODULE_2",
            "links": ["https://github.com/alice/proj  ", "ipfs://QmT5NvUtoM5n"],
            "notes": { "score": 95, "passed": true, "reviewer": null },
        });

        assert_eq!(
            compute_assignment_info_hash(&evidence),
            "3a0f789bc326980ed35e6e63023144428ac4e7791ac29fae8648123edf5fb2bf"
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let evidence = json!({
            "z": [" trailing ", { "nested": " deep " }],
            "a": null,
        });

        let once = normalize_evidence(&evidence);
        assert_eq!(normalize_evidence(&once), once);
    }

    #[test]
    fn interior_whitespace_is_preserved() {
        let spaced = json!({ "a": "two  words " });
        let collapsed = json!({ "a": "two words" });

        assert_ne!(
            compute_assignment_info_hash(&spaced),
            compute_assignment_info_hash(&collapsed)
        );
    }

    #[test]
    fn round_trip_verification() {
        let evidence = json!({ "links": [], "summary": "done" });
        let hash = compute_assignment_info_hash(&evidence);

        assert!(verify_assignment_info_hash(&evidence, &hash));
        assert!(verify_assignment_info_hash(&evidence, &hash.to_uppercase()));
        assert!(!verify_assignment_info_hash(&json!({ "summary": "other" }), &hash));
    }

    #[test]
    fn detailed_verification_explains_mismatches() {
        let evidence = json!({ "summary": "done" });
        let hash = compute_assignment_info_hash(&evidence);

        assert!(verify_evidence_detailed(&evidence, &hash).ok);
        assert!(verify_evidence_detailed(&evidence, &hash.to_uppercase()).ok);

        let mismatch = verify_evidence_detailed(&json!({ "summary": "changed" }), &hash);
        assert!(!mismatch.ok);
        assert!(mismatch.message.contains(&hash));

        let malformed = verify_evidence_detailed(&evidence, "not-a-hash");
        assert!(!malformed.ok);
        assert!(malformed.message.contains("not a 64-character hex digest"));
    }
}
