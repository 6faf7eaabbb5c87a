//! Manifest fuzz target: feed arbitrary text to the type-expression, pin-spec and manifest parsers.
//! None of them may panic; each returns Ok(..) or Err(ManifestError).
//! Build with: cargo fuzz run manifest_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(t) = appgraph::parse_type(s) {
        // rendering must reparse to an equal type
        assert_eq!(appgraph::parse_type(&t.to_string()).ok(), Some(t));
    }
    let _ = appgraph::parse_pin_spec(s);
    let _ = appgraph::parse_binding_target(s);
    let _ = appgraph::parse_manifest(s);
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run manifest_fuzz");
}
