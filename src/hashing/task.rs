// SPDX-License-Identifier: Apache-2.0

use minicbor::data::Tag;

use super::plutus::{
    blake2b_256_hex,
    digest_eq,
    encode_plutus_bytes,
    encode_to_vec,
    is_hex_digest,
};

/// Plutus constructor tags start at 121 for `Constr 0`.
const CONSTR_0: Tag = Tag::new(121);

/// The on-chain task record; its hash is the task's on-chain identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// What the task asks for.
    pub project_content: String,
    /// When the task expires, Unix epoch milliseconds.
    pub expiration_time: i64,
    /// The lovelace reward escrowed for the task.
    pub lovelace_amount: u64,
    /// Native-asset rewards as `(asset id, quantity)` pairs.
    pub native_assets: Vec<(String, i64)>,
}

fn task_cbor(task: &TaskRecord) -> Vec<u8> {
    encode_to_vec(|e| {
        // `Constr 0` over the four fields, in declared order.
        e.tag(CONSTR_0)?;
        e.begin_array()?;

        encode_plutus_bytes(e, task.project_content.as_bytes())?;
        e.i64(task.expiration_time)?;
        e.u64(task.lovelace_amount)?;

        // Plutus `serialiseData` encodes the empty list definite.
        if task.native_assets.is_empty() {
            e.array(0)?;
        } else {
            e.begin_array()?;
            for (asset_id, quantity) in &task.native_assets {
                e.begin_array()?;
                encode_plutus_bytes(e, asset_id.as_bytes())?;
                e.i64(*quantity)?;
                e.end()?;
            }
            e.end()?;
        }

        e.end()?;
        Ok(())
    })
}

/// Hashes a task record into its on-chain task identifier.
#[must_use]
pub fn compute_task_hash(task: &TaskRecord) -> String {
    blake2b_256_hex(&task_cbor(task))
}

/// Whether `expected` matches the hash of `task`, ignoring hex case.
#[must_use]
pub fn verify_task_hash(task: &TaskRecord, expected: &str) -> bool {
    digest_eq(&compute_task_hash(task), expected)
}

/// Whether `s` has the shape of a task hash.
#[must_use]
pub fn is_valid_task_hash(s: &str) -> bool {
    is_hex_digest(s)
}

/// The task record's full CBOR encoding as hex, for comparing against an
/// on-chain datum byte for byte.
#[must_use]
pub fn debug_task_cbor(task: &TaskRecord) -> String {
    hex::encode(task_cbor(task))
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use super::{
        compute_task_hash,
        debug_task_cbor,
        is_valid_task_hash,
        verify_task_hash,
        TaskRecord,
    };

    fn lovelace_only_task() -> TaskRecord {
        TaskRecord {
            project_content: "Write integration tests for the enrollment flow".to_owned(),
            expiration_time: 1_767_225_600_000,
            lovelace_amount: 25_000_000,
            native_assets: Vec::new(),
        }
    }

    fn native_asset_task() -> TaskRecord {
        TaskRecord {
            project_content: "Audit the treasury withdrawal validator and document every \
                              execution path of the spending logic"
                .to_owned(),
            expiration_time: 1_772_323_200_000,
            lovelace_amount: 150_000_000,
            native_assets: vec![(
                "9f1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5.AUDIT".to_owned(),
                2,
            )],
        }
    }

    #[test]
    fn task_id_for_a_lovelace_only_task() {
        expect!["7be7078653587e1d45f7dae4e3e3e1c28612e83cdd29137280ffd400b2b24a9c"]
            .assert_eq(&compute_task_hash(&lovelace_only_task()));
    }

    #[test]
    fn task_id_with_native_assets_and_chunked_content() {
        // The content is 95 UTF-8 bytes, so its byte string is chunked.
        expect!["6352e0ab65ec743795b3142dc9eb49ea8c0449564315951ef2c3b45df8c31ee5"]
            .assert_eq(&compute_task_hash(&native_asset_task()));
    }

    #[test]
    fn debug_encoding_matches_the_datum() {
        let datum = concat!(
            "d8799f582f577269746520696e746567726174696f6e20746573747320666f7220",
            "74686520656e726f6c6c6d656e7420666c6f771b0000019b76daa8001a017d7840",
            "80ff"
        );

        assert_eq!(debug_task_cbor(&lovelace_only_task()), datum);
    }

    #[test]
    fn round_trip_verification() {
        for task in [lovelace_only_task(), native_asset_task()] {
            let hash = compute_task_hash(&task);

            assert!(verify_task_hash(&task, &hash));
            assert!(verify_task_hash(&task, &hash.to_uppercase()));
            assert!(is_valid_task_hash(&hash));
        }
    }

    #[test]
    fn reward_changes_move_the_identifier() {
        let mut task = lovelace_only_task();
        let original = compute_task_hash(&task);

        task.lovelace_amount += 1;
        assert_ne!(compute_task_hash(&task), original);
    }
}
