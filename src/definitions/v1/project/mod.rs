// SPDX-License-Identifier: Apache-2.0

pub(crate) mod contributor;
pub(crate) mod manager;
pub(crate) mod owner;
