//! Typed application model: components, interfaces, pins and bindings.

use std::collections::HashMap;
use std::fmt;

use crate::datatype::{DataType, Record};
use crate::value::Configuration;

/// Type name of every composite component, including the application root.
pub const COMPOSITE_TYPE_NAME: &str = "core.Composite";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypeName(pub String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeName(name.into())
    }

    pub fn composite() -> Self {
        TypeName::new(COMPOSITE_TYPE_NAME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_composite(&self) -> bool {
        self.0 == COMPOSITE_TYPE_NAME
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Sends,
    Receives,
}

impl Direction {
    pub fn is_send(self) -> bool {
        self == Direction::Sends
    }

    pub fn is_receive(self) -> bool {
        self == Direction::Receives
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PinKind {
    Signal { data_type: DataType },
    Configuration { data_type: DataType },
    Command {
        arguments: Record,
        progress: Record,
        result: Record,
    },
}

impl PinKind {
    pub fn signal(data_type: DataType) -> Self {
        PinKind::Signal { data_type }
    }

    /// Command pin with empty argument, progress and result records.
    pub fn empty_command() -> Self {
        PinKind::Command {
            arguments: Record::new(),
            progress: Record::new(),
            result: Record::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PinKind::Signal { .. } => "signal",
            PinKind::Configuration { .. } => "configuration",
            PinKind::Command { .. } => "command",
        }
    }

    pub fn data_type(&self) -> Option<&DataType> {
        match self {
            PinKind::Signal { data_type } | PinKind::Configuration { data_type } => Some(data_type),
            PinKind::Command { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedPin {
    pub direction: Direction,
    pub kind: PinKind,
}

impl DirectedPin {
    pub fn new(direction: Direction, kind: PinKind) -> Self {
        DirectedPin { direction, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeafInterface {
    pub pins: HashMap<String, DirectedPin>,
    pub required: bool,
}

impl LeafInterface {
    pub fn new(pins: HashMap<String, DirectedPin>) -> Self {
        LeafInterface {
            pins,
            required: false,
        }
    }

    /// Flag the interface as required; called once its pins are populated.
    pub fn mark_required(&mut self) {
        self.required = true;
    }
}

/// Reference to a pin of a child component, by interface and pin name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinId {
    pub interface: String,
    pub pin: String,
}

/// A composite interface pin that re-exports a child's pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinBinding {
    pub target_component: String,
    pub target_pin: PinId,
}

impl fmt::Display for PinBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}#{}.{}",
            self.target_component, self.target_pin.interface, self.target_pin.pin
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompositeInterface {
    pub pins: HashMap<String, PinBinding>,
}

/// Dotted path to a component, possibly nested inside composites.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ComponentId(pub Vec<String>);

impl ComponentId {
    /// Split a dotted name into segments. Never fails: empty segments are kept.
    pub fn parse(dotted: &str) -> Self {
        ComponentId(dotted.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for ComponentId {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        ComponentId(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// One side of a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingTarget {
    Component { component: ComponentId },
    Interface { component: ComponentId, interface: String },
}

impl BindingTarget {
    pub fn component(&self) -> &ComponentId {
        match self {
            BindingTarget::Component { component } | BindingTarget::Interface { component, .. } => {
                component
            }
        }
    }

    pub fn interface(&self) -> Option<&str> {
        match self {
            BindingTarget::Component { .. } => None,
            BindingTarget::Interface { interface, .. } => Some(interface),
        }
    }
}

impl fmt::Display for BindingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingTarget::Component { component } => component.fmt(f),
            BindingTarget::Interface {
                component,
                interface,
            } => write!(f, "{}#{}", component, interface),
        }
    }
}

/// Connection between two targets; sides are kept in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub left: BindingTarget,
    pub right: BindingTarget,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeafComponent {
    pub type_name: TypeName,
    pub configuration: Configuration,
    pub interfaces: HashMap<String, LeafInterface>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompositeComponent {
    pub type_name: TypeName,
    pub configuration: Configuration,
    pub components: HashMap<String, Component>,
    pub interfaces: HashMap<String, CompositeInterface>,
    pub bindings: Vec<Binding>,
}

impl Default for CompositeComponent {
    fn default() -> Self {
        CompositeComponent {
            type_name: TypeName::composite(),
            configuration: Configuration::new(),
            components: HashMap::new(),
            interfaces: HashMap::new(),
            bindings: Vec::new(),
        }
    }
}

impl CompositeComponent {
    /// Resolve a component path through nested composites.
    pub fn find(&self, id: &ComponentId) -> Option<&Component> {
        let (first, rest) = id.segments().split_first()?;
        let mut current = self.components.get(first)?;
        for segment in rest {
            match current {
                Component::Composite(c) => current = c.components.get(segment)?,
                Component::Leaf(_) => return None,
            }
        }
        Some(current)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Leaf(LeafComponent),
    Composite(CompositeComponent),
}

impl Component {
    pub fn type_name(&self) -> &TypeName {
        match self {
            Component::Leaf(c) => &c.type_name,
            Component::Composite(c) => &c.type_name,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        match self {
            Component::Leaf(c) => &c.configuration,
            Component::Composite(c) => &c.configuration,
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafComponent> {
        match self {
            Component::Leaf(c) => Some(c),
            Component::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeComponent> {
        match self {
            Component::Composite(c) => Some(c),
            Component::Leaf(_) => None,
        }
    }
}

/// The decoded manifest: the root composite.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Application(pub CompositeComponent);

impl Application {
    pub fn root(&self) -> &CompositeComponent {
        &self.0
    }

    pub fn components(&self) -> &HashMap<String, Component> {
        &self.0.components
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.0.bindings
    }

    pub fn find(&self, id: &ComponentId) -> Option<&Component> {
        self.0.find(id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.components.is_empty() && self.0.bindings.is_empty()
    }
}
