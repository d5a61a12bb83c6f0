// Static AWS region table owned by this crate, so the set of regions the
// catalog offers does not track any SDK release cadence.

/// Region used for the catalog's default credential variant.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Known AWS region ids, including GovCloud and China partitions.
pub const ALL: &[&str] = &[
    "us-east-1",
    "us-east-2",
    "us-west-1",
    "us-west-2",
    "af-south-1",
    "ap-east-1",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ca-central-1",
    "ca-west-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-central-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "sa-east-1",
    "us-gov-east-1",
    "us-gov-west-1",
];

/// All region ids offered by the catalog when no override is configured.
pub fn all() -> &'static [&'static str] {
    ALL
}

/// Whether `id` is in the static table. Unknown ids are not rejected at
/// construction time; they fail inside the AWS layer when a token is
/// actually requested.
pub fn is_known(id: &str) -> bool {
    ALL.contains(&id)
}

/// Accept a region name in either the canonical id form (`us-east-1`) or
/// the legacy enum-constant form (`US_EAST_1`, `GovCloud`) and return the
/// canonical id.
///
/// Returns `None` for names outside the static table.
pub fn normalize(name: &str) -> Option<&'static str> {
    // Historical alias for us-gov-west-1 from the old region enum.
    if name.eq_ignore_ascii_case("GovCloud") {
        return Some("us-gov-west-1");
    }
    let canonical = name.replace('_', "-").to_ascii_lowercase();
    ALL.iter().find(|id| **id == canonical).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_region_is_known() {
        assert!(is_known(DEFAULT_REGION));
    }

    #[test]
    fn test_table_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for id in ALL {
            assert!(seen.insert(*id), "duplicate region id {}", id);
        }
    }

    #[test]
    fn test_normalize_canonical_id() {
        assert_eq!(normalize("eu-west-1"), Some("eu-west-1"));
    }

    #[test]
    fn test_normalize_legacy_constant() {
        assert_eq!(normalize("US_EAST_1"), Some("us-east-1"));
        assert_eq!(normalize("AP_SOUTHEAST_2"), Some("ap-southeast-2"));
    }

    #[test]
    fn test_normalize_govcloud_alias() {
        assert_eq!(normalize("GovCloud"), Some("us-gov-west-1"));
    }

    #[test]
    fn test_normalize_unknown() {
        assert_eq!(normalize("mars-north-1"), None);
    }
}
