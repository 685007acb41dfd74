// SPDX-License-Identifier: Apache-2.0

pub(crate) mod assignment_commit;
pub(crate) mod assignment_update;
pub(crate) mod credential_claim;
pub(crate) mod enroll;
