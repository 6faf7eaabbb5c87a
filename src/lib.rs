//! # appgraph — Typed application-graph manifests
//!
//! Loads a declarative application description (components connected by bindings) from a
//! manifest document and turns it into a strongly-typed model for a downstream runtime.
//!
//! ## Manifest structure
//!
//! - **Components**: named nodes with a `type`, opaque `configuration`, `interfaces` of pins
//!   and a `required` list of interface names
//! - **Composites**: components with nested `components`, `bindings`, and interfaces that
//!   re-export child pins (`child#iface.pin`)
//! - **Bindings**: pairs of targets, `component[.component...][#interface]`
//!
//! ## Pin specs
//!
//! - `publish-signal(T)` / `consume-signal(T)`: signal pins carrying a type expression
//! - `send-command(...)` / `receive-command(...)`: command pins (payload not interpreted)
//!
//! ## Type expressions
//!
//! `int`, `bool`, `string`, `list<T>`, `map<K, V>`, `record<T1 f1, T2 f2>`
//!
//! ## Example manifest
//!
//! ```text
//! application:
//!   components:
//!     producer:
//!       type: test.Producer
//!       interfaces:
//!         out:
//!           data: publish-signal(list<record<string name, int size>>)
//!       required: [out]
//!     consumer:
//!       type: test.Consumer
//!       interfaces:
//!         in:
//!           data: consume-signal(list<record<string name, int size>>)
//!   bindings:
//!     - [producer#out, consumer#in]
//! ```
//!
//! ## Usage
//!
//! ```
//! let app = appgraph::parse_manifest("application:\n  components: {}\n").unwrap();
//! assert!(app.is_empty());
//!
//! let t: appgraph::DataType = "map<string, list<int>>".parse().unwrap();
//! assert_eq!(t.to_string(), "map<string, list<int>>");
//! ```
//!
//! Enable the `json` feature to decode JSON manifests with `parse_manifest_json`.

pub mod ast;
pub mod binding;
pub mod datatype;
pub mod document;
pub mod error;
pub mod manifest;
pub mod parser;
pub mod pin;
pub mod tokenizer;
pub mod value;

pub use ast::{
    Application, Binding, BindingTarget, Component, ComponentId, CompositeComponent,
    CompositeInterface, DirectedPin, Direction, LeafComponent, LeafInterface, PinBinding, PinId,
    PinKind, TypeName, COMPOSITE_TYPE_NAME,
};
pub use binding::{parse_binding_target, parse_pin_binding};
pub use datatype::{DataType, Record};
pub use document::Document;
pub use error::{ManifestError, Position};
#[cfg(feature = "json")]
pub use manifest::parse_manifest_json;
pub use manifest::{decode_document, parse_manifest};
pub use parser::{parse_type, MAX_TYPE_DEPTH};
pub use pin::parse_pin_spec;
pub use tokenizer::{Token, TokenKind, Tokenizer};
pub use value::{ConfigValue, Configuration};
