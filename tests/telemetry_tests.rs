use cartesian_chart::telemetry::{init_default_tracing, init_tracing_with_filter};

#[cfg(not(feature = "telemetry"))]
#[test]
fn tracing_helpers_are_inert_without_the_feature() {
    assert!(!init_default_tracing());
    assert!(!init_tracing_with_filter("cartesian_chart=trace"));
}

#[cfg(feature = "telemetry")]
#[test]
fn tracing_subscriber_installs_once() {
    let first = init_tracing_with_filter("cartesian_chart=trace");
    let second = init_default_tracing();
    assert!(!(first && second));
}
