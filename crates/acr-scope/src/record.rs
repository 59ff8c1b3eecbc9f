// record.rs — Flat scope records as stored by the scope store.
//
// A ScopeRecord is one row of the tenant's scope table: an id, a display
// name, a level in the hierarchy, a materialized path, and a weak parent
// reference. Records carry no tree structure themselves — that is computed
// by ScopeTree::build.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which level of the organizational hierarchy a scope sits at.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScopeType {
    /// The tenant root. Exactly one per tenant.
    Enterprise,
    /// A geographic region (e.g., "North America").
    Region,
    /// A country within a region.
    Country,
    /// A brand within a country.
    Brand,
}

impl std::fmt::Display for ScopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeType::Enterprise => write!(f, "enterprise"),
            ScopeType::Region => write!(f, "region"),
            ScopeType::Country => write!(f, "country"),
            ScopeType::Brand => write!(f, "brand"),
        }
    }
}

/// One scope row, scoped to a single tenant.
///
/// `path` is the materialized ancestry path, dot-separated root-first
/// (e.g., "acme.na.us.acmecare"). Paths are unique within a tenant and
/// reflect ancestry order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeRecord {
    /// Unique identifier for this scope.
    pub id: Uuid,

    /// Human-readable name (e.g., "North America").
    pub name: String,

    /// Level in the hierarchy.
    pub scope_type: ScopeType,

    /// Materialized ancestry path, root-first.
    pub path: String,

    /// Weak back-reference to the parent scope. None only for the root.
    /// Ownership of the tree structure lives in ScopeTree, not here.
    pub parent_id: Option<Uuid>,

    /// The tenant this scope belongs to.
    pub enterprise_id: Uuid,

    /// When this scope row was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Open metadata (country codes, compliance frameworks, descriptions).
    /// `serde_json::Value` can hold any JSON.
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ScopeRecord {
    /// Create a record with the given identity fields and empty metadata.
    pub fn new(
        id: Uuid,
        name: impl Into<String>,
        scope_type: ScopeType,
        path: impl Into<String>,
        parent_id: Option<Uuid>,
        enterprise_id: Uuid,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            scope_type,
            path: path.into(),
            parent_id,
            enterprise_id,
            created_at: Utc::now(),
            metadata: serde_json::Value::Null,
        }
    }

    /// Whether this record is a tenant root.
    pub fn is_root(&self) -> bool {
        self.scope_type == ScopeType::Enterprise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_type_serializes_as_snake_case() {
        let json = serde_json::to_string(&ScopeType::Enterprise).unwrap();
        assert_eq!(json, "\"enterprise\"");
        let json = serde_json::to_string(&ScopeType::Brand).unwrap();
        assert_eq!(json, "\"brand\"");
    }

    #[test]
    fn record_serialization_round_trip() {
        let record = ScopeRecord::new(
            Uuid::new_v4(),
            "North America",
            ScopeType::Region,
            "acme.na",
            Some(Uuid::new_v4()),
            Uuid::new_v4(),
        );
        let json = serde_json::to_string(&record).unwrap();
        let restored: ScopeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.id, restored.id);
        assert_eq!(record.path, restored.path);
        assert_eq!(record.scope_type, restored.scope_type);
    }

    #[test]
    fn only_enterprise_is_root() {
        let tenant = Uuid::new_v4();
        let root = ScopeRecord::new(
            Uuid::new_v4(),
            "Acme",
            ScopeType::Enterprise,
            "acme",
            None,
            tenant,
        );
        let region = ScopeRecord::new(
            Uuid::new_v4(),
            "EU",
            ScopeType::Region,
            "acme.eu",
            Some(root.id),
            tenant,
        );
        assert!(root.is_root());
        assert!(!region.is_root());
    }
}
