// SPDX-License-Identifier: Apache-2.0

pub(crate) mod credential_claim;
pub(crate) mod enroll;
pub(crate) mod task_commit;
pub(crate) mod task_submit;
