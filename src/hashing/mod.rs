// SPDX-License-Identifier: Apache-2.0

//! Deterministic reproductions of the on-chain Plutus hashing.
//!
//! Every function here is pure: a hash is a function of its input bytes and
//! nothing else. Digests are Blake2b-256, rendered as 64 lowercase hex
//! characters; verifiers accept either case.

mod assignment_info;
pub(crate) mod plutus;
mod slt;
mod task;

pub use assignment_info::{
    compute_assignment_info_hash,
    is_valid_assignment_info_hash,
    normalize_evidence,
    verify_assignment_info_hash,
    verify_evidence_detailed,
    EvidenceVerification,
};
pub use slt::{
    compute_slt_hash,
    compute_slt_hash_definite,
    is_valid_slt_hash,
    verify_slt_hash,
};
pub use task::{
    compute_task_hash,
    debug_task_cbor,
    is_valid_task_hash,
    verify_task_hash,
    TaskRecord,
};
