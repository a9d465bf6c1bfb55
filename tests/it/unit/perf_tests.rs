//! Unit tests for perf module.

use tableview::perf::{ScopedTimer, is_profiling_enabled, measure, measure_and_log, set_profiling_enabled};

#[test]
fn test_scoped_timer_creation() {
    // High threshold: dropping must not warn or panic
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_returns_result() {
    let (value, elapsed) = measure(|| 21 * 2);
    assert_eq!(value, 42);
    assert!(elapsed >= 0.0);

    let value = measure_and_log("sum", 10_000.0, || (1..=10).sum::<i32>());
    assert_eq!(value, 55);
}

#[test]
fn test_profiling_toggle() {
    let before = is_profiling_enabled();
    set_profiling_enabled(true);
    assert!(is_profiling_enabled());
    set_profiling_enabled(before);
}

#[test]
fn test_zero_threshold_never_warns() {
    // A zero threshold means "report only while profiling"
    let timer = ScopedTimer::for_profiling("noop");
    drop(timer);
}
