//! Tagged-union representation of parsed block configuration.
//!
//! The upstream HCL parser produces rich expression trees; entities only
//! need an opaque nested structure that preserves where identifier
//! references occur. `ConfigValue` is that structure: mappings, sequences,
//! scalars, and an explicit `References` marker carrying the descriptors
//! extracted from interpolation expressions and attribute traversals.
//!
//! The conversion in this module is the single place where expression
//! traversals (`aws_vpc.main.id`, `var.env`, `data.aws_ami.x.id`,
//! `module.net.cidr_block`) are canonicalized into entity identifiers.
//! Everything downstream treats the value tree as opaque.

use hcl::expr::{Expression, Traversal, TraversalOperator};
use hcl::template::{Element, Template};
use hcl::{Block, Body, ObjectKey, Structure};
use serde::Serialize;

/// A reference descriptor inside a `References` marker.
///
/// `name` carries the canonical identifier of the referenced entity, with
/// attribute tails already stripped (`aws_vpc.main.id` → `aws_vpc.main`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Canonical identifier of the referenced entity
    pub name: String,
}

/// An opaque configuration value retained verbatim on each entity.
///
/// Scalars contribute nothing to reference extraction; mappings and
/// sequences are recursed into; `References` is the marker the resolver
/// collects descriptor names from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Key/value pairs, in declaration order (duplicate keys allowed)
    Mapping(Vec<(String, ConfigValue)>),
    /// Ordered list of values
    Sequence(Vec<ConfigValue>),
    /// A literal rendered to a string; never inspected downstream
    Scalar(String),
    /// Marker carrying the references found in one expression
    References(Vec<Reference>),
}

impl ConfigValue {
    /// An empty mapping, used for entities declared with an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Mapping(Vec::new())
    }
}

/// Convert a block body into a `ConfigValue` mapping.
///
/// Attributes become key/value entries; nested blocks nest under their
/// identifier, with labels folded in as intermediate single-key mappings
/// (so `ingress { ... }` and `dynamic "ingress" { ... }` both stay
/// addressable during the reference walk).
#[must_use]
pub fn body_to_value(body: &Body) -> ConfigValue {
    let mut entries = Vec::new();

    for structure in body.clone().into_inner() {
        match structure {
            Structure::Attribute(attr) => {
                entries.push((attr.key.as_str().to_string(), expression_to_value(&attr.expr)));
            }
            Structure::Block(block) => {
                entries.push((block.identifier.as_str().to_string(), block_to_value(&block)));
            }
        }
    }

    ConfigValue::Mapping(entries)
}

/// Convert a nested block, folding its labels into the value tree.
fn block_to_value(block: &Block) -> ConfigValue {
    let mut value = body_to_value(&block.body);
    for label in block.labels.iter().rev() {
        value = ConfigValue::Mapping(vec![(label.as_str().to_string(), value)]);
    }
    value
}

/// Convert an HCL expression into a `ConfigValue`.
#[must_use]
pub fn expression_to_value(expr: &Expression) -> ConfigValue {
    match expr {
        Expression::Null => ConfigValue::Scalar("null".to_string()),
        Expression::Bool(b) => ConfigValue::Scalar(b.to_string()),
        Expression::Number(n) => ConfigValue::Scalar(n.to_string()),
        Expression::String(s) => ConfigValue::Scalar(s.clone()),
        Expression::Array(items) => {
            ConfigValue::Sequence(items.iter().map(expression_to_value).collect())
        }
        Expression::Object(obj) => ConfigValue::Mapping(
            obj.iter()
                .map(|(key, value)| (object_key_to_string(key), expression_to_value(value)))
                .collect(),
        ),
        Expression::Variable(var) => match canonicalize(&[var.as_str()]) {
            Some(name) => ConfigValue::References(vec![Reference { name }]),
            None => ConfigValue::Scalar(var.as_str().to_string()),
        },
        Expression::Traversal(traversal) => traversal_to_value(traversal),
        Expression::TemplateExpr(template) => {
            // Interpolated strings are where most references live. Collect
            // every reference the template contains; a template with none
            // degrades to an opaque scalar.
            let mut refs = Vec::new();
            if let Ok(parsed) = Template::from_expr(template) {
                for element in parsed.elements() {
                    if let Element::Interpolation(interp) = element {
                        collect_expression_references(&interp.expr, &mut refs);
                    }
                }
            }
            if refs.is_empty() {
                ConfigValue::Scalar(format!("{template:?}"))
            } else {
                ConfigValue::References(refs)
            }
        }
        Expression::FuncCall(call) => {
            ConfigValue::Sequence(call.args.iter().map(expression_to_value).collect())
        }
        Expression::Parenthesis(inner) => expression_to_value(inner),
        Expression::Conditional(cond) => ConfigValue::Sequence(vec![
            expression_to_value(&cond.cond_expr),
            expression_to_value(&cond.true_expr),
            expression_to_value(&cond.false_expr),
        ]),
        Expression::Operation(op) => match op.as_ref() {
            hcl::expr::Operation::Unary(unary) => expression_to_value(&unary.expr),
            hcl::expr::Operation::Binary(binary) => ConfigValue::Sequence(vec![
                expression_to_value(&binary.lhs_expr),
                expression_to_value(&binary.rhs_expr),
            ]),
        },
        // For-expressions and anything the parser grows later are opaque;
        // they cannot carry a resolvable entity reference in this model.
        other => ConfigValue::Scalar(format!("{other:?}")),
    }
}

/// Convert an attribute traversal into a reference marker when it names an
/// entity, otherwise fall back to the root expression.
fn traversal_to_value(traversal: &Traversal) -> ConfigValue {
    match traversal_reference(traversal) {
        Some(reference) => ConfigValue::References(vec![reference]),
        None => {
            if let Expression::Variable(_) = traversal.expr {
                // Known non-entity root (local., each., count., ...).
                ConfigValue::Scalar(format!("{traversal:?}"))
            } else {
                // Index or splat over a computed expression; references may
                // still hide in the root.
                expression_to_value(&traversal.expr)
            }
        }
    }
}

/// Extract the canonical entity identifier a traversal points at, if any.
fn traversal_reference(traversal: &Traversal) -> Option<Reference> {
    let root = match &traversal.expr {
        Expression::Variable(var) => var.as_str(),
        _ => return None,
    };

    let mut parts = vec![root];
    for operator in &traversal.operators {
        match operator {
            TraversalOperator::GetAttr(ident) => parts.push(ident.as_str()),
            // An index or splat ends the identifier chain; the leading
            // attribute path is all that names the entity.
            _ => break,
        }
    }

    canonicalize(&parts).map(|name| Reference { name })
}

/// Map a dotted traversal path onto the registry's identifier scheme.
///
/// - `var.<name>` and `module.<name>` resolve to the bare name
/// - `data.<type>.<name>` keeps its distinguishing prefix
/// - roots that can never name an entity yield nothing
/// - anything else is a resource: `<type>.<name>`
fn canonicalize(parts: &[&str]) -> Option<String> {
    match *parts.first()? {
        "var" | "module" => parts.get(1).map(|name| (*name).to_string()),
        "data" => {
            if parts.len() >= 3 {
                Some(format!("data.{}.{}", parts[1], parts[2]))
            } else {
                None
            }
        }
        "local" | "each" | "count" | "path" | "terraform" | "self" => None,
        root => match parts.get(1) {
            Some(name) => Some(format!("{root}.{name}")),
            None => Some(root.to_string()),
        },
    }
}

/// Collect every reference an expression contains, in encounter order.
fn collect_expression_references(expr: &Expression, out: &mut Vec<Reference>) {
    collect_value_references(&expression_to_value(expr), out);
}

fn collect_value_references(value: &ConfigValue, out: &mut Vec<Reference>) {
    match value {
        ConfigValue::Mapping(entries) => {
            for (_, nested) in entries {
                collect_value_references(nested, out);
            }
        }
        ConfigValue::Sequence(items) => {
            for item in items {
                collect_value_references(item, out);
            }
        }
        ConfigValue::Scalar(_) => {}
        ConfigValue::References(refs) => out.extend(refs.iter().cloned()),
    }
}

/// Convert an object key to a string.
fn object_key_to_string(key: &ObjectKey) -> String {
    match key {
        ObjectKey::Identifier(id) => id.as_str().to_string(),
        ObjectKey::Expression(Expression::String(s)) => s.clone(),
        ObjectKey::Expression(expr) => format!("{expr:?}"),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_attr(content: &str) -> ConfigValue {
        let body: Body = hcl::from_str(content).unwrap();
        body_to_value(&body)
    }

    fn first_value(value: &ConfigValue) -> &ConfigValue {
        match value {
            ConfigValue::Mapping(entries) => &entries[0].1,
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn test_resource_traversal_becomes_reference() {
        let value = parse_attr("vpc_id = aws_vpc.main.id\n");
        assert_eq!(
            first_value(&value),
            &ConfigValue::References(vec![Reference {
                name: "aws_vpc.main".to_string()
            }])
        );
    }

    #[test]
    fn test_variable_and_module_traversals_use_bare_names() {
        let value = parse_attr("env = var.environment\n");
        assert_eq!(
            first_value(&value),
            &ConfigValue::References(vec![Reference {
                name: "environment".to_string()
            }])
        );

        let value = parse_attr("cidr = module.network.cidr_block\n");
        assert_eq!(
            first_value(&value),
            &ConfigValue::References(vec![Reference {
                name: "network".to_string()
            }])
        );
    }

    #[test]
    fn test_data_traversal_keeps_prefix() {
        let value = parse_attr("ami = data.aws_ami.ubuntu.id\n");
        assert_eq!(
            first_value(&value),
            &ConfigValue::References(vec![Reference {
                name: "data.aws_ami.ubuntu".to_string()
            }])
        );
    }

    #[test]
    fn test_local_traversal_is_not_a_reference() {
        let value = parse_attr("name = local.prefix\n");
        assert!(matches!(first_value(&value), ConfigValue::Scalar(_)));
    }

    #[test]
    fn test_template_interpolation_collects_references() {
        let value = parse_attr(r#"name = "${aws_vpc.main.id}-${var.env}""#);
        match first_value(&value) {
            ConfigValue::References(refs) => {
                let names: Vec<&str> = refs.iter().map(|r| r.name.as_str()).collect();
                assert_eq!(names, vec!["aws_vpc.main", "env"]);
            }
            other => panic!("expected references, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_string_is_scalar() {
        let value = parse_attr(r#"cidr_block = "10.0.0.0/16""#);
        assert_eq!(
            first_value(&value),
            &ConfigValue::Scalar("10.0.0.0/16".to_string())
        );
    }

    #[test]
    fn test_index_ends_identifier_chain() {
        let value = parse_attr("subnet = aws_subnet.private[0].id\n");
        assert_eq!(
            first_value(&value),
            &ConfigValue::References(vec![Reference {
                name: "aws_subnet.private".to_string()
            }])
        );
    }

    #[test]
    fn test_nested_block_preserved_in_mapping() {
        let value = parse_attr(
            r#"
ingress {
  security_groups = [aws_security_group.web.id]
}
"#,
        );
        match &value {
            ConfigValue::Mapping(entries) => {
                assert_eq!(entries[0].0, "ingress");
                assert!(matches!(entries[0].1, ConfigValue::Mapping(_)));
            }
            other => panic!("expected mapping, got {other:?}"),
        }
    }
}
