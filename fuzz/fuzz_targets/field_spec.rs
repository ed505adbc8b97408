//! Fuzz target for field spec parsing and mark stepping.
//!
//! Feeds arbitrary JSON through the field spec deserializer and steps any
//! mark it produces.

#![no_main]

use libfuzzer_sys::fuzz_target;

use chronos_core::{FieldSpec, Mark};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let cap = u32::from(data[0] % 64);
    let n = u32::from(data[1]).min(cap);
    let leap = u64::from(data[2]) * 1_000 + u64::from(data[3]);

    let Ok(spec) = serde_json::from_slice::<FieldSpec>(&data[4..]) else {
        return;
    };

    if let Ok(mark) = Mark::new(&spec, cap) {
        let (value, _) = mark.next(n, leap);
        assert!(value <= cap);
        let (value, _) = mark.prev(n, leap);
        assert!(value <= cap);
        if leap > 0 {
            assert!(mark.contains(mark.next(n, leap).0));
            assert!(mark.contains(mark.prev(n, leap).0));
        }
    }

    if let Ok(Some(mark)) = Mark::fitted(&spec, cap) {
        assert_eq!(mark.cap(), cap);
        assert!(mark.marks().iter().all(|v| *v <= cap));
    }
});
