#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz structural equality and field differences over arbitrary JSON.
///
/// The input is split at the first NUL byte into two documents.
fuzz_target!(|data: &[u8]| {
    let (left, right) = match data.iter().position(|&b| b == 0) {
        Some(i) => (&data[..i], &data[i + 1..]),
        None => (data, data),
    };
    let (Ok(a), Ok(b)) = (
        serde_json::from_slice::<serde_json::Value>(left),
        serde_json::from_slice::<serde_json::Value>(right),
    ) else {
        return;
    };

    assert!(fabric_drift::diff::deep_equal(&a, &a));
    let differences = fabric_drift::diff::field_differences(&a, &b);
    if fabric_drift::diff::deep_equal(&a, &b) {
        assert!(differences.is_empty());
    }
});
