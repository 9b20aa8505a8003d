// SPDX-License-Identifier: Apache-2.0
//! # License Registry
//!
//! In-memory, insertion-ordered store of license records backing the
//! mock licensing API, plus the aggregate summary the list endpoint serves.
//!
//! Records are keyed by a registry-assigned identifier. Enumeration order
//! is insertion order; removing a record does not reorder the others.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identifier of the license present in every freshly seeded registry.
pub const SEED_LICENSE_ID: &str = "12345678-90ab-cdef-1234-567890abcdef";

/// License key of the seeded license.
pub const SEED_LICENSE_KEY: &str = "4J2TK-XXXXX-XXXXX-XXXXX-XXXXX";

/// Description attached to every OSI license created through the API.
pub const OSI_CONFIGURATION: &str = "1 Operating System Instance (OSI)";

pub const LIMITED_LICENSE_CAPABILITIES: &[&str] =
    &["QUERY", "RBAC", "UPGRADE", "ACTIVE_DIRECTORY", "CONTENT_PACK"];

pub const STANDARD_LICENSE_CAPABILITIES: &[&str] = &[
    "FORWARDING",
    "RBAC",
    "UPGRADE",
    "CUSTOM_SSL",
    "ACTIVE_DIRECTORY",
    "CONTENT_PACK",
    "VSPHERE_FULL_SUPPORT",
    "CLUSTER",
    "IMPORT_CONTENT_PACKS",
    "QUERY",
    "ARCHIVE",
    "THIRD_PARTY_CONTENT_PACKS",
];

pub const UNINITIALIZED_LICENSE_CAPABILITIES: &[&str] = &["RBAC", "ACTIVE_DIRECTORY", "CONTENT_PACK"];

// -- License ------------------------------------------------------------------

/// License unit category.
///
/// Only `OSI` and `CPU` contribute to capacity. Any other value is kept
/// verbatim so that records seeded by tests round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LicenseType {
    /// Operating System Instance.
    Osi,
    /// Processor-count based.
    Cpu,
    Other(String),
}

impl LicenseType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Osi => "OSI",
            Self::Cpu => "CPU",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl From<String> for LicenseType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "OSI" => Self::Osi,
            "CPU" => Self::Cpu,
            _ => Self::Other(s),
        }
    }
}

impl From<LicenseType> for String {
    fn from(t: LicenseType) -> Self {
        match t {
            LicenseType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single license record as served by the mock API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: String,
    pub type_enum: LicenseType,
    /// Empty when the license is valid. A non-empty error excludes the
    /// license from capacity counts.
    pub error: String,
    pub status: String,
    pub configuration: String,
    pub license_key: String,
    pub infinite: bool,
    pub count: i64,
    /// Expiry timestamp; 0 when `infinite`.
    pub expiration: i64,
}

impl License {
    /// Build an unlimited OSI license with zero capacity, the shape every
    /// license added through the API takes.
    pub fn osi(id: impl Into<String>, license_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_enum: LicenseType::Osi,
            error: String::new(),
            status: "Active".to_string(),
            configuration: OSI_CONFIGURATION.to_string(),
            license_key: license_key.into(),
            infinite: true,
            count: 0,
            expiration: 0,
        }
    }

    /// Whether the license counts towards capacity.
    pub fn is_valid(&self) -> bool {
        self.error.is_empty()
    }
}

// -- Summary ------------------------------------------------------------------

/// Aggregate license state served by `GET /api/v1/licenses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseSummary {
    pub has_osi: bool,
    pub has_cpu: bool,
    pub max_osis: i64,
    pub max_cpus: i64,
    pub limited_license_capabilities: Vec<String>,
    pub standard_license_capabilities: Vec<String>,
    pub uninitialized_license_capabilities: Vec<String>,
    pub license_state: LicenseState,
    /// Full registry contents keyed by id, in insertion order.
    pub licenses: IndexMap<String, License>,
    pub has_tap: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseState {
    Active,
    Inactive,
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// -- Registry -----------------------------------------------------------------

/// Errors raised by registry mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("license {0} not found")]
    NotFound(String),

    #[error("license {0} already exists")]
    DuplicateId(String),
}

/// Insertion-ordered mapping from license id to license record.
#[derive(Debug, Clone, Default)]
pub struct LicenseRegistry {
    licenses: IndexMap<String, License>,
}

impl LicenseRegistry {
    /// Create a registry with no licenses at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the registry a fixture starts with: a single zero-capacity
    /// OSI license.
    pub fn seeded() -> Self {
        let mut registry = Self::empty();
        registry
            .licenses
            .insert(SEED_LICENSE_ID.to_string(), License::osi(SEED_LICENSE_ID, SEED_LICENSE_KEY));
        registry
    }

    pub fn get(&self, id: &str) -> Option<&License> {
        self.licenses.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.licenses.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.licenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.licenses.is_empty()
    }

    /// All licenses in insertion order.
    pub fn list(&self) -> Vec<License> {
        self.licenses.values().cloned().collect()
    }

    /// Add a new OSI license for `license_key` under a freshly generated id.
    ///
    /// Returns the stored record, including its id.
    pub fn add(&mut self, license_key: &str) -> License {
        let id = self.fresh_id();
        let license = License::osi(id.clone(), license_key);
        self.licenses.insert(id, license.clone());
        license
    }

    /// Insert a fully specified record, keeping its id.
    ///
    /// Lets fixtures seed CPU licenses, errored licenses and other shapes
    /// the add endpoint never produces.
    pub fn insert(&mut self, license: License) -> Result<(), RegistryError> {
        if self.licenses.contains_key(&license.id) {
            return Err(RegistryError::DuplicateId(license.id));
        }
        self.licenses.insert(license.id.clone(), license);
        Ok(())
    }

    /// Remove the license with `id`. The relative order of the remaining
    /// licenses is preserved.
    pub fn remove(&mut self, id: &str) -> Result<License, RegistryError> {
        self.licenses
            .shift_remove(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Compute the aggregate license view.
    pub fn summary(&self) -> LicenseSummary {
        let mut osis = 0i64;
        let mut cpus = 0i64;
        for license in self.licenses.values().filter(|l| l.is_valid()) {
            match license.type_enum {
                LicenseType::Osi => osis = osis.saturating_add(license.count),
                LicenseType::Cpu => cpus = cpus.saturating_add(license.count),
                LicenseType::Other(_) => {}
            }
        }

        let license_state = if osis.saturating_add(cpus) > 0 {
            LicenseState::Active
        } else {
            LicenseState::Inactive
        };

        LicenseSummary {
            has_osi: osis > 0,
            has_cpu: cpus > 0,
            max_osis: osis,
            max_cpus: cpus,
            limited_license_capabilities: to_owned_list(LIMITED_LICENSE_CAPABILITIES),
            standard_license_capabilities: to_owned_list(STANDARD_LICENSE_CAPABILITIES),
            uninitialized_license_capabilities: to_owned_list(UNINITIALIZED_LICENSE_CAPABILITIES),
            license_state,
            licenses: self.licenses.clone(),
            has_tap: false,
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.licenses.contains_key(&id) {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn cpu(id: &str, count: i64) -> License {
        License {
            type_enum: LicenseType::Cpu,
            count,
            ..License::osi(id, "CPU-KEY")
        }
    }

    #[test]
    fn seeded_registry_is_inactive() {
        let summary = LicenseRegistry::seeded().summary();
        assert!(!summary.has_osi);
        assert!(!summary.has_cpu);
        assert_eq!(summary.max_osis, 0);
        assert_eq!(summary.max_cpus, 0);
        assert_eq!(summary.license_state, LicenseState::Inactive);
        assert!(!summary.has_tap);
        assert_eq!(summary.licenses.len(), 1);
        assert_eq!(summary.licenses[SEED_LICENSE_ID].license_key, SEED_LICENSE_KEY);
    }

    #[test]
    fn summary_totals_saturate() {
        let mut registry = LicenseRegistry::empty();
        for id in ["big-1", "big-2"] {
            registry
                .insert(License {
                    count: i64::MAX,
                    ..License::osi(id, "HUGE")
                })
                .unwrap();
        }
        registry.insert(cpu("big-cpu", i64::MAX)).unwrap();

        let summary = registry.summary();
        assert_eq!(summary.max_osis, i64::MAX);
        assert_eq!(summary.max_cpus, i64::MAX);
        assert_eq!(summary.license_state, LicenseState::Active);
    }

    #[test]
    fn add_uses_defaults_and_assigns_id() {
        let mut registry = LicenseRegistry::seeded();
        let added = registry.add("ABCDE-12345");

        assert_eq!(added.license_key, "ABCDE-12345");
        assert_eq!(added.type_enum, LicenseType::Osi);
        assert_eq!(added.status, "Active");
        assert_eq!(added.configuration, OSI_CONFIGURATION);
        assert!(added.infinite);
        assert_eq!(added.count, 0);
        assert_eq!(added.expiration, 0);
        assert!(added.error.is_empty());
        assert!(Uuid::parse_str(&added.id).is_ok());
        assert_eq!(registry.get(&added.id), Some(&added));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_unknown_id_leaves_registry_untouched() {
        let mut registry = LicenseRegistry::seeded();
        registry.add("A");
        let before = registry.list();

        let err = registry.remove("not-there").unwrap_err();
        assert_eq!(err, RegistryError::NotFound("not-there".into()));
        assert_eq!(registry.list(), before);
    }

    #[test]
    fn remove_preserves_order_of_others() {
        let mut registry = LicenseRegistry::seeded();
        let a = registry.add("A");
        let b = registry.add("B");
        let c = registry.add("C");

        registry.remove(&b.id).unwrap();
        let ids: Vec<String> = registry.list().into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![SEED_LICENSE_ID.to_string(), a.id, c.id]);
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let mut registry = LicenseRegistry::seeded();
        let err = registry
            .insert(License::osi(SEED_LICENSE_ID, "OTHER"))
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(SEED_LICENSE_ID.into()));
        assert_eq!(registry.get(SEED_LICENSE_ID).unwrap().license_key, SEED_LICENSE_KEY);
    }

    #[test]
    fn summary_counts_by_type() {
        let mut registry = LicenseRegistry::seeded();
        registry
            .insert(License { count: 5, ..License::osi("osi-5", "K1") })
            .unwrap();
        registry.insert(cpu("cpu-8", 8)).unwrap();

        let summary = registry.summary();
        assert!(summary.has_osi);
        assert!(summary.has_cpu);
        assert_eq!(summary.max_osis, 5);
        assert_eq!(summary.max_cpus, 8);
        assert_eq!(summary.license_state, LicenseState::Active);
    }

    #[test]
    fn summary_skips_errored_licenses() {
        let mut registry = LicenseRegistry::empty();
        registry
            .insert(License {
                count: 10,
                error: "expired".into(),
                ..License::osi("bad", "K")
            })
            .unwrap();

        let summary = registry.summary();
        assert_eq!(summary.max_osis, 0);
        assert_eq!(summary.license_state, LicenseState::Inactive);
        assert_eq!(summary.licenses.len(), 1);
    }

    #[test]
    fn summary_ignores_unknown_categories() {
        let mut registry = LicenseRegistry::empty();
        registry
            .insert(License {
                type_enum: LicenseType::from("VM".to_string()),
                count: 4,
                ..License::osi("vm", "K")
            })
            .unwrap();

        let summary = registry.summary();
        assert_eq!(summary.max_osis + summary.max_cpus, 0);
        assert_eq!(summary.license_state, LicenseState::Inactive);
    }

    #[test]
    fn license_serializes_with_wire_names() {
        let value = serde_json::to_value(License::osi("x", "KEY")).unwrap();
        assert_eq!(value["typeEnum"], "OSI");
        assert_eq!(value["licenseKey"], "KEY");
        assert_eq!(value["infinite"], true);
        assert_eq!(value["expiration"], 0);
    }

    #[test]
    fn unknown_type_round_trips() {
        let t: LicenseType = serde_json::from_str("\"TAP\"").unwrap();
        assert_eq!(t, LicenseType::Other("TAP".into()));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"TAP\"");
    }

    #[test]
    fn summary_state_serializes_uppercase() {
        let value = serde_json::to_value(LicenseRegistry::seeded().summary()).unwrap();
        assert_eq!(value["licenseState"], "INACTIVE");
        assert_eq!(value["hasTap"], false);
        assert_eq!(value["licenses"][SEED_LICENSE_ID]["id"], SEED_LICENSE_ID);
        assert_eq!(
            value["uninitializedLicenseCapabilities"],
            serde_json::json!(["RBAC", "ACTIVE_DIRECTORY", "CONTENT_PACK"])
        );
    }

    proptest! {
        /// Every add yields a distinct id and the registry size tracks
        /// adds minus successful deletes.
        #[test]
        fn ids_unique_and_size_consistent(
            ops in prop::collection::vec((any::<bool>(), "[A-Z0-9]{5}"), 0..40)
        ) {
            let mut registry = LicenseRegistry::seeded();
            let mut seen = HashSet::new();
            let mut live: Vec<String> = Vec::new();
            let mut adds = 0usize;
            let mut deletes = 0usize;

            for (delete, key) in ops {
                if delete && !live.is_empty() {
                    let id = live.remove(0);
                    prop_assert!(registry.remove(&id).is_ok());
                    deletes += 1;
                } else {
                    let license = registry.add(&key);
                    prop_assert!(seen.insert(license.id.clone()));
                    live.push(license.id);
                    adds += 1;
                }
            }

            prop_assert_eq!(registry.len(), 1 + adds - deletes);
        }

        /// The summary is active exactly when valid capacity is positive.
        #[test]
        fn license_state_tracks_capacity(
            counts in prop::collection::vec((0i64..5, any::<bool>(), any::<bool>()), 0..12)
        ) {
            let mut registry = LicenseRegistry::empty();
            let mut expected = 0i64;
            for (i, (count, is_cpu, errored)) in counts.into_iter().enumerate() {
                let mut license = License { count, ..License::osi(format!("id-{i}"), "K") };
                if is_cpu {
                    license.type_enum = LicenseType::Cpu;
                }
                if errored {
                    license.error = "invalid".into();
                } else {
                    expected += count;
                }
                registry.insert(license).unwrap();
            }

            let summary = registry.summary();
            prop_assert_eq!(summary.max_osis + summary.max_cpus, expected);
            prop_assert_eq!(summary.license_state == LicenseState::Active, expected > 0);
        }
    }
}
