// SPDX-License-Identifier: Apache-2.0

pub(crate) mod assignment_accept;
pub(crate) mod assignment_deny;
