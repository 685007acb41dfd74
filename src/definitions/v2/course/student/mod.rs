// SPDX-License-Identifier: Apache-2.0

pub(crate) mod assignment_commit;
pub(crate) mod enroll;
