//! Binding endpoint references: `a.b`, `a.b#iface`, and composite pin bindings `child#iface.pin`.

use crate::ast::{Binding, BindingTarget, ComponentId, PinBinding, PinId};
use crate::error::{ManifestError, Result};

pub fn parse_binding_target(source: &str) -> Result<BindingTarget> {
    let parts: Vec<&str> = source.split('#').collect();
    match parts.as_slice() {
        [component] => Ok(BindingTarget::Component {
            component: ComponentId::parse(component),
        }),
        [component, interface] => Ok(BindingTarget::Interface {
            component: ComponentId::parse(component),
            interface: (*interface).to_string(),
        }),
        _ => Err(ManifestError::new(format!(
            "Unexpected binding target: {}",
            source
        ))),
    }
}

pub fn parse_binding(left: &str, right: &str) -> Result<Binding> {
    Ok(Binding {
        left: parse_binding_target(left)?,
        right: parse_binding_target(right)?,
    })
}

/// Parse `component#interface.pin`.
pub fn parse_pin_binding(source: &str) -> Result<PinBinding> {
    let unexpected = || ManifestError::new(format!("Unexpected pin binding: {}", source));
    let (component, pin_ref) = source.split_once('#').ok_or_else(unexpected)?;
    let (interface, pin) = pin_ref.split_once('.').ok_or_else(unexpected)?;
    if component.is_empty() || interface.is_empty() || pin.is_empty() || pin.contains(&['.', '#'][..]) {
        return Err(unexpected());
    }
    Ok(PinBinding {
        target_component: component.to_string(),
        target_pin: PinId {
            interface: interface.to_string(),
            pin: pin.to_string(),
        },
    })
}
