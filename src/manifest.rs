//! Decode a manifest document tree into the typed [`Application`] model.
//!
//! ```text
//! application:
//!   components:
//!     x:
//!       type: test.Component
//!       configuration: { sample.string: c }
//!       interfaces:
//!         myinterface:
//!           mypin: publish-signal(string)
//!       required: [myinterface]
//!   bindings:
//!     - [x#myinterface, y]
//! ```
//!
//! A component node that has its own `components` key is a composite: it gets nested
//! components and bindings, and its interfaces re-export child pins (`child#iface.pin`).
//! `required` applies to leaf components only.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::ast::{
    Application, Binding, Component, CompositeComponent, CompositeInterface, LeafComponent,
    LeafInterface, TypeName,
};
use crate::binding::{parse_binding, parse_pin_binding};
use crate::document::Document;
use crate::error::{ManifestError, Result};
use crate::pin::parse_pin_spec;
use crate::value::Configuration;

/// Parse YAML manifest text and decode it.
pub fn parse_manifest(source: &str) -> Result<Application> {
    let document: serde_yaml::Value = serde_yaml::from_str(source)?;
    decode_document(&document)
}

/// Parse JSON manifest text and decode it.
#[cfg(feature = "json")]
pub fn parse_manifest_json(source: &str) -> Result<Application> {
    let document: serde_json::Value = serde_json::from_str(source)?;
    decode_document(&document)
}

/// Decode an already-parsed document tree. A document without an `application` key
/// decodes to the empty application.
pub fn decode_document<D: Document>(document: &D) -> Result<Application> {
    if document.is_null() {
        return Ok(Application::default());
    }
    expect_mapping(document, "document")?;
    let Some(application) = present(document, "application") else {
        debug!("Manifest has no application section");
        return Ok(Application::default());
    };
    let mut root = decode_composite(application, "application")?;
    root.type_name = TypeName::composite();
    debug!(
        "Decoded application: {} component(s), {} binding(s)",
        root.components.len(),
        root.bindings.len()
    );
    Ok(Application(root))
}

/// Child node under `key`, treating an explicit null like an absent key.
fn present<'a, D: Document>(node: &'a D, key: &str) -> Option<&'a D> {
    Document::get(node, key).filter(|v| !v.is_null())
}

fn expect_mapping<'a, D: Document>(node: &'a D, path: &str) -> Result<Vec<(&'a str, &'a D)>> {
    node.string_entries().ok_or_else(|| {
        ManifestError::new(format!(
            "Expected mapping for {}, got {}",
            path,
            node.kind()
        ))
    })
}

fn expect_sequence<'a, D: Document>(node: &'a D, path: &str) -> Result<&'a [D]> {
    node.as_sequence().ok_or_else(|| {
        ManifestError::new(format!(
            "Expected sequence for {}, got {}",
            path,
            node.kind()
        ))
    })
}

fn expect_str<'a, D: Document>(node: &'a D, path: &str) -> Result<&'a str> {
    node.as_str().ok_or_else(|| {
        ManifestError::new(format!("Expected string for {}, got {}", path, node.kind()))
    })
}

fn decode_type_name<D: Document>(node: &D, path: &str) -> Result<Option<TypeName>> {
    present(node, "type")
        .map(|t| expect_str(t, &format!("{}.type", path)).map(|s| TypeName::new(s)))
        .transpose()
}

/// Configuration keeps string keys only; values are copied opaquely.
fn decode_configuration<D: Document>(node: &D, path: &str) -> Result<Configuration> {
    let Some(configuration) = present(node, "configuration") else {
        return Ok(Configuration::new());
    };
    let entries = expect_mapping(configuration, &format!("{}.configuration", path))?;
    Ok(entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_config_value()))
        .collect())
}

fn decode_components<D: Document>(node: &D, path: &str) -> Result<HashMap<String, Component>> {
    let Some(components) = present(node, "components") else {
        return Ok(HashMap::new());
    };
    let path = format!("{}.components", path);
    let mut acc = HashMap::new();
    for (id, component) in expect_mapping(components, &path)? {
        let component = decode_component(component, &format!("{}.{}", path, id))?;
        trace!("Decoded component {} ({})", id, component.type_name());
        acc.insert(id.to_string(), component);
    }
    Ok(acc)
}

fn decode_component<D: Document>(node: &D, path: &str) -> Result<Component> {
    if node.is_null() {
        return Ok(Component::Leaf(LeafComponent::default()));
    }
    expect_mapping(node, path)?;
    if present(node, "components").is_some() {
        Ok(Component::Composite(decode_composite(node, path)?))
    } else {
        Ok(Component::Leaf(decode_leaf(node, path)?))
    }
}

fn decode_leaf<D: Document>(node: &D, path: &str) -> Result<LeafComponent> {
    let type_name = decode_type_name(node, path)?.unwrap_or_default();
    let configuration = decode_configuration(node, path)?;
    let mut interfaces = decode_leaf_interfaces(node, path)?;
    // flags are applied once every interface's pins are in place
    for name in decode_required(node, path)? {
        debug!("Marking interface {} of {} as required", name, path);
        interfaces.entry(name).or_default().mark_required();
    }
    Ok(LeafComponent {
        type_name,
        configuration,
        interfaces,
    })
}

fn decode_leaf_interfaces<D: Document>(
    node: &D,
    path: &str,
) -> Result<HashMap<String, LeafInterface>> {
    let Some(interfaces) = present(node, "interfaces") else {
        return Ok(HashMap::new());
    };
    let path = format!("{}.interfaces", path);
    let mut acc = HashMap::new();
    for (name, pins) in expect_mapping(interfaces, &path)? {
        let iface_path = format!("{}.{}", path, name);
        let mut decoded = HashMap::new();
        if !pins.is_null() {
            for (pin, spec) in expect_mapping(pins, &iface_path)? {
                let spec = expect_str(spec, &format!("{}.{}", iface_path, pin))?;
                decoded.insert(pin.to_string(), parse_pin_spec(spec)?);
            }
        }
        acc.insert(name.to_string(), LeafInterface::new(decoded));
    }
    Ok(acc)
}

/// Interface names listed under `required`; non-string entries are ignored.
fn decode_required<D: Document>(node: &D, path: &str) -> Result<Vec<String>> {
    let Some(required) = present(node, "required") else {
        return Ok(Vec::new());
    };
    let names = expect_sequence(required, &format!("{}.required", path))?;
    Ok(names
        .iter()
        .filter_map(|n| n.as_str().map(str::to_string))
        .collect())
}

fn decode_composite<D: Document>(node: &D, path: &str) -> Result<CompositeComponent> {
    expect_mapping(node, path)?;
    if present(node, "required").is_some() {
        debug!("Ignoring required list of composite {}", path);
    }
    Ok(CompositeComponent {
        type_name: decode_type_name(node, path)?.unwrap_or_else(TypeName::composite),
        configuration: decode_configuration(node, path)?,
        components: decode_components(node, path)?,
        interfaces: decode_composite_interfaces(node, path)?,
        bindings: decode_bindings(node, path)?,
    })
}

fn decode_composite_interfaces<D: Document>(
    node: &D,
    path: &str,
) -> Result<HashMap<String, CompositeInterface>> {
    let Some(interfaces) = present(node, "interfaces") else {
        return Ok(HashMap::new());
    };
    let path = format!("{}.interfaces", path);
    let mut acc = HashMap::new();
    for (name, pins) in expect_mapping(interfaces, &path)? {
        let iface_path = format!("{}.{}", path, name);
        let mut decoded = HashMap::new();
        if !pins.is_null() {
            for (pin, target) in expect_mapping(pins, &iface_path)? {
                let target = expect_str(target, &format!("{}.{}", iface_path, pin))?;
                decoded.insert(pin.to_string(), parse_pin_binding(target)?);
            }
        }
        acc.insert(name.to_string(), CompositeInterface { pins: decoded });
    }
    Ok(acc)
}

fn decode_bindings<D: Document>(node: &D, path: &str) -> Result<Vec<Binding>> {
    let Some(bindings) = present(node, "bindings") else {
        return Ok(Vec::new());
    };
    let path = format!("{}.bindings", path);
    let entries = expect_sequence(bindings, &path)?;
    let mut acc = Vec::with_capacity(entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let pair = match entry.as_sequence() {
            Some(pair) if pair.len() == 2 => pair,
            _ => {
                return Err(ManifestError::new(format!(
                    "Expected list of two for binding, got: {}",
                    describe(entry)
                )))
            }
        };
        let left = expect_str(&pair[0], &format!("{}[{}][0]", path, i))?;
        let right = expect_str(&pair[1], &format!("{}[{}][1]", path, i))?;
        acc.push(parse_binding(left, right)?);
    }
    trace!("Decoded {} binding(s) in {}", acc.len(), path);
    Ok(acc)
}

/// Short rendering of a node for error messages.
fn describe<D: Document>(node: &D) -> String {
    if let Some(s) = node.as_str() {
        return s.to_string();
    }
    match node.as_sequence() {
        Some(items) => {
            let items: Vec<String> = items.iter().map(describe).collect();
            format!("[{}]", items.join(", "))
        }
        None => format!("<{}>", node.kind()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BindingTarget, ComponentId, Direction};

    #[test]
    fn empty_inputs_decode_to_empty_application() {
        for src in ["~", "{}", "application:", "application:\n  components: {}"] {
            let app = parse_manifest(src).unwrap_or_else(|e| panic!("{:?}: {}", src, e));
            assert_eq!(app, Application::default(), "{:?}", src);
        }
    }

    #[test]
    fn non_mapping_shapes_are_errors() {
        let err = parse_manifest("application: [1]").unwrap_err();
        assert_eq!(err.message, "Expected mapping for application, got sequence");
        let err = parse_manifest("application:\n  components: [x]").unwrap_err();
        assert_eq!(err.message, "Expected mapping for application.components, got sequence");
        let err = parse_manifest("application:\n  components:\n    x:\n      type: [a]").unwrap_err();
        assert_eq!(err.message, "Expected string for application.components.x.type, got sequence");
        let err = parse_manifest("just text").unwrap_err();
        assert_eq!(err.message, "Expected mapping for document, got string");
    }

    #[test]
    fn null_component_is_untyped_leaf() {
        let app = parse_manifest("application:\n  components:\n    x:\n").unwrap();
        assert_eq!(
            app.components().get("x"),
            Some(&Component::Leaf(LeafComponent::default()))
        );
    }

    #[test]
    fn pin_spec_must_be_string() {
        let src = "application:\n  components:\n    x:\n      interfaces:\n        i:\n          p: 3\n";
        let err = parse_manifest(src).unwrap_err();
        assert_eq!(
            err.message,
            "Expected string for application.components.x.interfaces.i.p, got number"
        );
    }

    #[test]
    fn required_unknown_interface_is_created() {
        let src = "application:\n  components:\n    x:\n      required: [ghost, 7]\n";
        let app = parse_manifest(src).unwrap();
        let leaf = app.components()["x"].as_leaf().expect("leaf");
        assert_eq!(leaf.interfaces.len(), 1);
        assert!(leaf.interfaces["ghost"].required);
        assert!(leaf.interfaces["ghost"].pins.is_empty());
    }

    #[test]
    fn binding_shapes() {
        let err = parse_manifest("application:\n  bindings:\n    - [x, y, z]\n").unwrap_err();
        assert_eq!(err.message, "Expected list of two for binding, got: [x, y, z]");
        let err = parse_manifest("application:\n  bindings:\n    - x\n").unwrap_err();
        assert_eq!(err.message, "Expected list of two for binding, got: x");
        let err = parse_manifest("application:\n  bindings:\n    - [x, 1]\n").unwrap_err();
        assert_eq!(err.message, "Expected string for application.bindings[0][1], got number");
        let err = parse_manifest("application:\n  bindings:\n    - [x, 'a#b#c']\n").unwrap_err();
        assert_eq!(err.message, "Unexpected binding target: a#b#c");
    }

    #[test]
    fn composite_component() {
        let src = r#"
application:
  components:
    group:
      configuration: { replicas: 2 }
      components:
        worker:
          type: test.Worker
          interfaces:
            out:
              data: publish-signal(int)
      interfaces:
        out:
          data: worker#out.data
      bindings:
        - [worker, worker#out]
"#;
        let app = parse_manifest(src).unwrap();
        let group = app.components()["group"].as_composite().expect("composite");
        assert!(group.type_name.is_composite());
        assert_eq!(group.configuration["replicas"].as_i64(), Some(2));
        assert_eq!(group.interfaces["out"].pins["data"].to_string(), "worker#out.data");
        assert_eq!(
            group.bindings,
            vec![Binding {
                left: BindingTarget::Component {
                    component: ComponentId::parse("worker")
                },
                right: BindingTarget::Interface {
                    component: ComponentId::parse("worker"),
                    interface: "out".into()
                },
            }]
        );
        let worker = app.find(&ComponentId::parse("group.worker")).and_then(Component::as_leaf).expect("worker");
        assert_eq!(worker.interfaces["out"].pins["data"].direction, Direction::Sends);
    }

    #[test]
    fn composite_pin_binding_errors_propagate() {
        let src = "application:\n  components:\n    g:\n      components: {}\n      interfaces:\n        i:\n          p: nohash\n";
        let err = parse_manifest(src).unwrap_err();
        assert_eq!(err.message, "Unexpected pin binding: nohash");
    }

    #[test]
    fn yaml_errors_carry_location() {
        let err = parse_manifest("application:\n  components: {x: [}\n").unwrap_err();
        assert!(err.message.starts_with("Invalid YAML document"), "{}", err.message);
        assert!(err.line > 0);
    }
}
