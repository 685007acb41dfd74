// SPDX-License-Identifier: Apache-2.0

use std::fmt::{
    self,
    Display,
    Formatter,
};
use std::str::FromStr;

use crate::Error;

/// A protocol revision tag.
///
/// Definitions for different revisions coexist in the registry; consumers
/// filter with [`transactions_by_version`](crate::registry::transactions_by_version).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    /// The first deployed protocol revision.
    V1,
    /// The contract-consolidation revision; parts of its database API are
    /// still being migrated.
    V2,
}

impl ProtocolVersion {
    /// The stable string tag for this revision.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl Display for ProtocolVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            _ => Err(Error::UnknownVersion(s.to_owned())),
        }
    }
}

/// A reference to the authoritative on-chain protocol specification for one
/// transaction.
///
/// The core treats the reference as opaque metadata; costs and
/// `required_tokens` must be kept in lockstep with the referenced YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolSpec {
    /// The protocol revision this definition belongs to.
    pub version: ProtocolVersion,
    /// The specification identifier within the revision.
    pub id: &'static str,
    /// Path of the authoritative YAML within the protocol repository.
    pub yaml_path: &'static str,
    /// The on-chain tokens the wallet must hold for this transaction to
    /// validate.
    pub required_tokens: &'static [&'static str],
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::ProtocolVersion;
    use crate::Error;

    #[test]
    fn version_tag_round_trip() {
        for version in [ProtocolVersion::V1, ProtocolVersion::V2] {
            assert_eq!(version.as_str().parse::<ProtocolVersion>().unwrap(), version);
        }
    }

    #[test]
    fn unknown_version_is_rejected() {
        assert_matches!("v3".parse::<ProtocolVersion>(), Err(Error::UnknownVersion(_)));
    }

    #[test]
    fn versions_order_by_revision() {
        assert!(ProtocolVersion::V1 < ProtocolVersion::V2);
    }
}
