// SPDX-License-Identifier: Apache-2.0

pub(crate) mod task_accept;
pub(crate) mod task_deny;
pub(crate) mod tasks_mint;
