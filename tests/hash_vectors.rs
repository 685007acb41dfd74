// SPDX-License-Identifier: Apache-2.0

//! Golden vectors for the hashing layer, checked against independently
//! computed digests.

use andamio_core::{
    compute_assignment_info_hash,
    compute_slt_hash,
    compute_slt_hash_definite,
    compute_task_hash,
    normalize_evidence,
    verify_assignment_info_hash,
    verify_slt_hash,
    verify_task_hash,
    TaskRecord,
};
use hex_literal::hex;
use serde_json::json;

const MODULE_1_SLTS: [&str; 2] = [
    "I can mint an access token.",
    "I can complete an assignment to earn a credential.",
];

fn digest_bytes(hash: &str) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(hash, &mut bytes).unwrap();
    bytes
}

#[test]
fn slt_hash_reproduces_the_published_vector() {
    let hash = compute_slt_hash(&MODULE_1_SLTS);

    assert_eq!(
        digest_bytes(&hash),
        hex!("8dcbe1b925d87e6c547bbd8071c23a712db4c32751454b0948f8c846e9246b5c")
    );
    assert!(verify_slt_hash(&MODULE_1_SLTS, &hash));
}

#[test]
fn slt_hash_of_the_empty_module() {
    assert_eq!(
        digest_bytes(&compute_slt_hash::<&str>(&[])),
        hex!("afc0da64183bf2664f3d4eec7238d524ba607faeeab24fc100eb861dba69971b")
    );
}

#[test]
fn chunked_and_definite_variants_diverge_past_64_bytes() {
    let long = ["I can design a multi-signature treasury contract that enforces quorum \
                 rules across organizational roles."];

    assert_eq!(
        digest_bytes(&compute_slt_hash(&long)),
        hex!("8be3c9a4bc8407140bfb49a2316d5836a5e246278110b84c6244295cb71f9705")
    );
    assert_eq!(
        digest_bytes(&compute_slt_hash_definite(&long)),
        hex!("c2a10d16dbc6baa7412145da7142d570e0b7ea5e7ea524ecd74b8a059e2aee72")
    );

    // Below the threshold the two encodings agree.
    assert_eq!(compute_slt_hash(&MODULE_1_SLTS), compute_slt_hash_definite(&MODULE_1_SLTS));
}

#[test]
fn assignment_info_hash_is_normalization_invariant() {
    let committed = json!({ "b": 1, "a": "x " });
    let canonical = json!({ "a": "x", "b": 1 });

    let hash = compute_assignment_info_hash(&committed);

    assert_eq!(hash, compute_assignment_info_hash(&canonical));
    assert_eq!(
        digest_bytes(&hash),
        hex!("1b42a87e8d798c869df122847ffced3598d07c89c5c491042b6ab5fb180fa6bd")
    );
    assert!(verify_assignment_info_hash(&canonical, &hash.to_uppercase()));
}

#[test]
fn assignment_info_normalization_is_idempotent() {
    let evidence = json!({
        "z": { "inner": "  spaced  " },
        "a": [" first ", { "b": null }],
    });

    let normalized = normalize_evidence(&evidence);

    assert_eq!(normalize_evidence(&normalized), normalized);
    assert_eq!(
        compute_assignment_info_hash(&evidence),
        compute_assignment_info_hash(&normalized)
    );
}

#[test]
fn task_hash_reproduces_the_published_vectors() {
    let lovelace_only = TaskRecord {
        project_content: "Write integration tests for the enrollment flow".to_owned(),
        expiration_time: 1_767_225_600_000,
        lovelace_amount: 25_000_000,
        native_assets: Vec::new(),
    };

    assert_eq!(
        digest_bytes(&compute_task_hash(&lovelace_only)),
        hex!("7be7078653587e1d45f7dae4e3e3e1c28612e83cdd29137280ffd400b2b24a9c")
    );

    let with_assets = TaskRecord {
        project_content: "Audit the treasury withdrawal validator and document every \
                          execution path of the spending logic"
            .to_owned(),
        expiration_time: 1_772_323_200_000,
        lovelace_amount: 150_000_000,
        native_assets: vec![(
            "9f1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5.AUDIT".to_owned(),
            2,
        )],
    };

    assert_eq!(
        digest_bytes(&compute_task_hash(&with_assets)),
        hex!("6352e0ab65ec743795b3142dc9eb49ea8c0449564315951ef2c3b45df8c31ee5")
    );
    assert!(verify_task_hash(&with_assets, &compute_task_hash(&with_assets)));
}
