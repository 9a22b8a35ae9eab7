#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the snapshot parsing entry point.
///
/// Feeds arbitrary UTF-8 strings to `parse_snapshot_str`, which sniffs JSON
/// versus YAML. Anything that parses is then compared with itself, which
/// must report no changes.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(snapshot) = fabric_drift::parsers::parse_snapshot_str(s)
    {
        let _ = snapshot.validate();
        assert!(fabric_drift::diff::compare_snapshots(&snapshot, &snapshot).is_empty());
    }
});
