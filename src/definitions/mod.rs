// SPDX-License-Identifier: Apache-2.0

//! The transaction catalog, one file per definition.
//!
//! Files are grouped by `{version}/{system}/{role}` purely for human
//! navigation; the registry flattens everything into a single map.

pub(crate) mod v1;
pub(crate) mod v2;

use crate::definition::TransactionDefinition;

/// Every definition the registry is built from, in catalog order.
pub(crate) fn all() -> Vec<TransactionDefinition> {
    vec![
        v1::access::user::token_mint::definition(),
        v1::course::student::enroll::definition(),
        v1::course::student::assignment_commit::definition(),
        v1::course::student::assignment_update::definition(),
        v1::course::student::credential_claim::definition(),
        v1::course::teacher::assignment_accept::definition(),
        v1::course::teacher::assignment_deny::definition(),
        v1::course::owner::modules_mint::definition(),
        v1::course::owner::modules_burn::definition(),
        v1::project::contributor::enroll::definition(),
        v1::project::contributor::task_commit::definition(),
        v1::project::contributor::task_submit::definition(),
        v1::project::contributor::credential_claim::definition(),
        v1::project::manager::task_accept::definition(),
        v1::project::manager::task_deny::definition(),
        v1::project::manager::tasks_mint::definition(),
        v1::project::owner::treasury_fund::definition(),
        v2::course::student::enroll::definition(),
        v2::course::student::assignment_commit::definition(),
        v2::course::owner::modules_mint::definition(),
        v2::project::contributor::task_commit::definition(),
    ]
}
