//! Azure resource identifiers.
//!
//! A fully qualified id has the form
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/{namespace}/{type}/{name}`
//! followed by any number of `/{child_type}/{child_name}` pairs.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription: String,
    pub resource_group: String,
    pub namespace: String,
    pub resource_type: String,
    pub name: String,
    pub children: Vec<(String, String)>,
}

impl ResourceId {
    pub fn new(
        subscription: impl Into<String>,
        resource_group: impl Into<String>,
        namespace: impl Into<String>,
        resource_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            subscription: subscription.into(),
            resource_group: resource_group.into(),
            namespace: namespace.into(),
            resource_type: resource_type.into(),
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn child(mut self, resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        self.children.push((resource_type.into(), name.into()));
        self
    }

    /// Parse a fully qualified id. The fixed `subscriptions`,
    /// `resourceGroups` and `providers` segments match case-insensitively;
    /// every other segment must be non-empty.
    pub fn parse(rid: &str) -> Option<Self> {
        let rest = rid.strip_prefix('/')?;
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.len() < 8 || segments.len() % 2 != 0 || segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let fixed = [(0, "subscriptions"), (2, "resourceGroups"), (4, "providers")];
        if !fixed
            .iter()
            .all(|(i, name)| segments[*i].eq_ignore_ascii_case(name))
        {
            return None;
        }

        let mut id = Self::new(segments[1], segments[3], segments[5], segments[6], segments[7]);
        for pair in segments[8..].chunks_exact(2) {
            id = id.child(pair[0], pair[1]);
        }
        Some(id)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}/{}/{}",
            self.subscription, self.resource_group, self.namespace, self.resource_type, self.name
        )?;
        for (resource_type, name) in &self.children {
            write!(f, "/{resource_type}/{name}")?;
        }
        Ok(())
    }
}

/// Whether `rid` is a fully qualified resource id.
///
/// Stricter than the usual Azure id check: subscription and resource-group
/// level ids are rejected, a provider type and name are always required.
pub fn is_valid_resource_id(rid: &str) -> bool {
    ResourceId::parse(rid).is_some_and(|id| id.to_string().eq_ignore_ascii_case(rid))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBNET: &str = "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets/default";

    #[test]
    fn test_build_subnet_id() {
        let id = ResourceId::new("S", "RG", "Microsoft.Network", "virtualNetworks", "myvnet")
            .child("subnets", "mysubnet");
        assert_eq!(
            id.to_string(),
            "/subscriptions/S/resourceGroups/RG/providers/Microsoft.Network/virtualNetworks/myvnet/subnets/mysubnet"
        );
    }

    #[test]
    fn test_parse_round_trips() {
        let id = ResourceId::parse(SUBNET).unwrap();
        assert_eq!(id.resource_group, "rg");
        assert_eq!(id.children, vec![("subnets".to_string(), "default".to_string())]);
        assert!(is_valid_resource_id(SUBNET));
    }

    #[test]
    fn test_fixed_segments_ignore_case() {
        assert!(is_valid_resource_id(
            "/SUBSCRIPTIONS/sub/resourcegroups/rg/PROVIDERS/Microsoft.Sql/servers/srv"
        ));
    }

    #[test]
    fn test_resource_group_id_is_not_a_resource() {
        assert!(!is_valid_resource_id("/subscriptions/sub/resourceGroups/rg"));
        assert!(!is_valid_resource_id("/subscriptions/sub"));
        assert!(!is_valid_resource_id(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Sql"
        ));
    }

    #[test]
    fn test_rejects_partial_ids() {
        assert!(!is_valid_resource_id("mysubnet"));
        assert!(!is_valid_resource_id(""));
        assert!(!is_valid_resource_id("/subscriptions/sub/resourceGroups/rg"));
        assert!(!is_valid_resource_id(
            "/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Network/virtualNetworks/vnet/subnets"
        ));
        assert!(!is_valid_resource_id(&format!("{SUBNET}/")));
        assert!(!is_valid_resource_id(
            "/subscriptions/sub/resourceGroups/rg/fooproviders/Microsoft.Network/virtualNetworks/vnet"
        ));
    }
}
