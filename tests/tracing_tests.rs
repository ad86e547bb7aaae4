//! Installs the global subscriber; kept in its own test binary.

use futures::executor::block_on;
use onetyped::builder::{Options, array, object_with, reference, string};
use onetyped::tracing_config::{LogFormat, LogTarget, TracingConfig, init_tracing};
use onetyped::{SourceContext, TypeStore, from_type, lower_declarations, to_declarations};

#[test]
fn test_conversion_under_an_installed_subscriber() {
    let installed = TracingConfig::new("onetyped_typescript=trace")
        .format(LogFormat::Tree)
        .target(LogTarget::TestOutput)
        .install();
    assert!(installed);

    // A subscriber is already in place: later attempts are refused, not fatal.
    assert!(!TracingConfig::new("debug").install());
    assert!(!TracingConfig::new("debug").format(LogFormat::Json).install());
    assert!(!init_tracing());

    let tree = object_with(
        [
            ("label", string()),
            ("children", array(reference("Tree").unwrap())),
        ],
        Options::new().identifier("Tree"),
    )
    .unwrap();
    let declarations = to_declarations("Root", &tree).unwrap();
    let mut store = TypeStore::new();
    let ids = lower_declarations(&mut store, &declarations).unwrap();
    let source = SourceContext::new("traced.ts");
    let back = block_on(from_type(ids["Tree"], &source, &store)).unwrap();
    assert_eq!(back, tree);
}
