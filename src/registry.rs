// SPDX-License-Identifier: Apache-2.0

//! The transaction registry: a frozen catalog keyed by [`TransactionName`].
//!
//! The catalog is built once, on first access, from the per-file definition
//! constructors under `definitions/`. Lookups are constant-time; filters
//! scan the catalog (tens of entries) and return results in a stable order.

use std::collections::{
    BTreeMap,
    HashMap,
};

use once_cell::sync::Lazy;

use crate::definition::TransactionDefinition;
use crate::protocol::ProtocolVersion;
use crate::TransactionName;

static REGISTRY: Lazy<HashMap<TransactionName, TransactionDefinition>> = Lazy::new(|| {
    let mut registry = HashMap::new();

    for definition in crate::definitions::all() {
        let name = definition.tx_type;
        let previous = registry.insert(name, definition);
        assert!(previous.is_none(), "duplicate transaction definition for `{name}`");
    }

    registry
});

/// Looks up one definition by name.
#[must_use]
pub fn get_transaction_definition(
    name: TransactionName,
) -> Option<&'static TransactionDefinition> {
    REGISTRY.get(&name)
}

/// Whether the catalog contains a definition for `name`.
#[must_use]
pub fn has_transaction(name: TransactionName) -> bool {
    REGISTRY.contains_key(&name)
}

/// Every definition, ordered by transaction name.
#[must_use]
pub fn all_transaction_definitions() -> Vec<&'static TransactionDefinition> {
    let mut definitions: Vec<_> = REGISTRY.values().collect();
    definitions.sort_by_key(|definition| definition.tx_type);
    definitions
}

/// The definitions whose role tag equals `role`.
#[must_use]
pub fn transactions_by_role(role: &str) -> Vec<&'static TransactionDefinition> {
    let mut definitions: Vec<_> =
        REGISTRY.values().filter(|definition| definition.role == role).collect();
    definitions.sort_by_key(|definition| definition.tx_type);
    definitions
}

/// The definitions belonging to one protocol revision.
#[must_use]
pub fn transactions_by_version(version: ProtocolVersion) -> Vec<&'static TransactionDefinition> {
    let mut definitions: Vec<_> =
        REGISTRY.values().filter(|definition| definition.version() == version).collect();
    definitions.sort_by_key(|definition| definition.tx_type);
    definitions
}

/// The definitions belonging to one protocol revision and one role.
#[must_use]
pub fn transactions_by_version_and_role(
    version: ProtocolVersion,
    role: &str,
) -> Vec<&'static TransactionDefinition> {
    let mut definitions: Vec<_> = REGISTRY
        .values()
        .filter(|definition| definition.version() == version && definition.role == role)
        .collect();
    definitions.sort_by_key(|definition| definition.tx_type);
    definitions
}

/// The protocol revisions present in the catalog, sorted ascending.
#[must_use]
pub fn available_versions() -> Vec<ProtocolVersion> {
    let mut versions: Vec<_> = REGISTRY.values().map(|definition| definition.version()).collect();
    versions.sort_unstable();
    versions.dedup();
    versions
}

/// How many definitions each protocol revision carries.
#[must_use]
pub fn transaction_count_by_version() -> BTreeMap<ProtocolVersion, usize> {
    let mut counts = BTreeMap::new();

    for definition in REGISTRY.values() {
        *counts.entry(definition.version()).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::{
        all_transaction_definitions,
        available_versions,
        get_transaction_definition,
        has_transaction,
        transaction_count_by_version,
        transactions_by_role,
        transactions_by_version,
        transactions_by_version_and_role,
    };
    use crate::definition::role;
    use crate::protocol::ProtocolVersion;
    use crate::TransactionName;

    #[test]
    fn every_name_maps_to_its_own_definition() {
        for definition in all_transaction_definitions() {
            let looked_up = get_transaction_definition(definition.tx_type).unwrap();
            assert_eq!(looked_up.tx_type, definition.tx_type);
            assert!(has_transaction(definition.tx_type));
        }
    }

    #[test]
    fn lookup_is_stable() {
        let definition =
            get_transaction_definition(TransactionName::CourseStudentAssignmentCommit).unwrap();

        assert_eq!(definition.tx_type, TransactionName::CourseStudentAssignmentCommit);
        assert_eq!(definition.role, role::STUDENT);
    }

    #[test]
    fn filters_partition_the_catalog() {
        let total = all_transaction_definitions().len();
        let by_version: usize =
            available_versions().iter().map(|v| transactions_by_version(*v).len()).sum();

        assert_eq!(total, by_version);

        for definition in transactions_by_role(role::STUDENT) {
            assert_eq!(definition.role, role::STUDENT);
        }

        for definition in transactions_by_version_and_role(ProtocolVersion::V2, role::STUDENT) {
            assert_eq!(definition.version(), ProtocolVersion::V2);
            assert_eq!(definition.role, role::STUDENT);
        }
    }

    #[test]
    fn versions_are_sorted_and_counted() {
        assert_eq!(available_versions(), [ProtocolVersion::V1, ProtocolVersion::V2]);

        let counts = transaction_count_by_version();
        assert_eq!(counts[&ProtocolVersion::V1], 17);
        assert_eq!(counts[&ProtocolVersion::V2], 4);
    }
}
