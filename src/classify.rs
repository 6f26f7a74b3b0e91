//! Classification tables for node presentation attributes.
//!
//! Pure lookup functions with explicit defaults: every subtype string,
//! including unrecognized ones, resolves to a color, a shape, and a group.
//! `group_of` is a prefix cascade evaluated in a fixed priority order; the
//! first matching prefix wins, and that order must not be reshuffled or
//! grouping becomes nondeterministic across builds.

use crate::registry::EntityKind;

/// Neutral fallback color for unrecognized subtypes.
pub const DEFAULT_COLOR: &str = "#CCCCCC";

/// Fallback shape for unrecognized subtypes.
pub const DEFAULT_SHAPE: &str = "box";

/// Fallback group when no prefix matches.
pub const DEFAULT_GROUP: &str = "other";

/// Color for a resource or data source subtype.
#[must_use]
pub fn color_of(subtype: &str) -> &'static str {
    match subtype {
        // AWS resources
        "aws_vpc" => "#FF6B6B",
        "aws_subnet" => "#4ECDC4",
        "aws_internet_gateway" => "#45B7D1",
        "aws_nat_gateway" => "#96CEB4",
        "aws_route_table" => "#FFEAA7",
        "aws_security_group" => "#DDA0DD",
        "aws_instance" => "#98D8C8",
        "aws_lb" => "#F7DC6F",
        "aws_rds_cluster" => "#BB8FCE",
        "aws_iam_role" => "#85C1E9",
        "aws_s3_bucket" => "#F8C471",
        "aws_lambda_function" => "#82E0AA",
        "aws_eks_cluster" => "#F1948A",
        "aws_autoscaling_group" => "#85C1E9",
        "aws_cloudwatch_log_group" => "#F7DC6F",

        // Azure resources
        "azurerm_virtual_network" => "#FF6B6B",
        "azurerm_subnet" => "#4ECDC4",
        "azurerm_network_interface" => "#45B7D1",
        "azurerm_virtual_machine" => "#96CEB4",
        "azurerm_app_service_plan" => "#FFEAA7",
        "azurerm_app_service" => "#DDA0DD",
        "azurerm_storage_account" => "#98D8C8",
        "azurerm_sql_database" => "#F7DC6F",
        "azurerm_kubernetes_cluster" => "#BB8FCE",

        // Google Cloud resources
        "google_compute_network" => "#FF6B6B",
        "google_compute_subnetwork" => "#4ECDC4",
        "google_compute_instance" => "#96CEB4",
        "google_storage_bucket" => "#F8C471",
        "google_container_cluster" => "#BB8FCE",

        _ => DEFAULT_COLOR,
    }
}

/// Shape hint for a resource or data source subtype.
#[must_use]
pub fn shape_of(subtype: &str) -> &'static str {
    match subtype {
        // Network resources
        "aws_vpc" => "box",
        "aws_subnet" => "box",
        "aws_internet_gateway" => "diamond",
        "aws_nat_gateway" => "diamond",
        "aws_route_table" => "box",
        "aws_security_group" => "ellipse",

        // Compute resources
        "aws_instance" => "box",
        "aws_lb" => "diamond",
        "aws_autoscaling_group" => "box",
        "aws_lambda_function" => "ellipse",
        "aws_eks_cluster" => "box",

        // Storage and database
        "aws_s3_bucket" => "cylinder",
        "aws_rds_cluster" => "cylinder",

        _ => DEFAULT_SHAPE,
    }
}

/// Semantic group for a resource or data source subtype.
///
/// Prefix checks run in priority order; the first match wins.
#[must_use]
pub fn group_of(subtype: &str) -> &'static str {
    const PREFIX_GROUPS: &[(&[&str], &str)] = &[
        (&["aws_vpc", "aws_subnet"], "networking"),
        (&["aws_instance", "aws_lb"], "compute"),
        (&["aws_s3", "aws_rds"], "storage"),
        (&["aws_iam"], "security"),
        (&["aws_lambda"], "serverless"),
        (&["aws_eks"], "kubernetes"),
    ];

    for (prefixes, group) in PREFIX_GROUPS {
        if prefixes.iter().any(|prefix| subtype.starts_with(prefix)) {
            return group;
        }
    }
    DEFAULT_GROUP
}

/// Presentation attributes for one graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    /// Fill color
    pub color: &'static str,
    /// Rendering shape hint
    pub shape: &'static str,
    /// Semantic group
    pub group: &'static str,
}

/// Compute the style for an entity.
///
/// Resources and data sources are keyed on their subtype; variables,
/// outputs, and modules get fixed per-kind literals.
#[must_use]
pub fn style_for(kind: EntityKind, subtype: &str) -> NodeStyle {
    match kind {
        EntityKind::Resource | EntityKind::DataSource => NodeStyle {
            color: color_of(subtype),
            shape: shape_of(subtype),
            group: group_of(subtype),
        },
        EntityKind::Variable => NodeStyle {
            color: "#FFD700", // gold
            shape: "ellipse",
            group: "variables",
        },
        EntityKind::Output => NodeStyle {
            color: "#32CD32", // lime green
            shape: "ellipse",
            group: "outputs",
        },
        EntityKind::Module => NodeStyle {
            color: "#9370DB", // medium purple
            shape: "box",
            group: "modules",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_subtypes() {
        assert_eq!(color_of("aws_vpc"), "#FF6B6B");
        assert_eq!(shape_of("aws_s3_bucket"), "cylinder");
        assert_eq!(group_of("aws_vpc"), "networking");
        assert_eq!(group_of("aws_subnet"), "networking");
        assert_eq!(group_of("aws_instance"), "compute");
        assert_eq!(group_of("aws_s3_bucket"), "storage");
        assert_eq!(group_of("aws_iam_role"), "security");
        assert_eq!(group_of("aws_lambda_function"), "serverless");
        assert_eq!(group_of("aws_eks_cluster"), "kubernetes");
    }

    #[test]
    fn test_totality_on_unknown_subtypes() {
        for subtype in ["", "unknown_widget", "azurerm_subnet", "weird!chars"] {
            assert_eq!(color_of(subtype).is_empty(), false);
            assert_eq!(shape_of(subtype).is_empty(), false);
            assert_eq!(group_of(subtype).is_empty(), false);
        }
        assert_eq!(color_of("no_such_type"), DEFAULT_COLOR);
        assert_eq!(shape_of("no_such_type"), DEFAULT_SHAPE);
        assert_eq!(group_of("no_such_type"), DEFAULT_GROUP);
    }

    #[test]
    fn test_prefix_priority_order_is_stable() {
        // aws_vpc* must land in networking even though later prefixes could
        // be added that also match; first match wins.
        assert_eq!(group_of("aws_vpc_endpoint"), "networking");
        assert_eq!(group_of("aws_subnet_group"), "networking");
        assert_eq!(group_of("aws_lb_listener"), "compute");
    }

    #[test]
    fn test_fixed_kind_styles() {
        let var = style_for(EntityKind::Variable, "");
        assert_eq!((var.color, var.shape, var.group), ("#FFD700", "ellipse", "variables"));

        let out = style_for(EntityKind::Output, "");
        assert_eq!((out.color, out.shape, out.group), ("#32CD32", "ellipse", "outputs"));

        let module = style_for(EntityKind::Module, "");
        assert_eq!((module.color, module.shape, module.group), ("#9370DB", "box", "modules"));

        let data = style_for(EntityKind::DataSource, "aws_vpc");
        assert_eq!(data.group, "networking");
    }
}
