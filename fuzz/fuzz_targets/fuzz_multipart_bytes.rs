#![no_main]

use formscan::bytes::Bytes;
use formscan::{Constraints, Multipart};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let body = Bytes::copy_from_slice(data);

    let lenient = Multipart::new("X-BOUNDARY");
    let first = lenient.parse(body.clone());
    let second = lenient.parse(body.clone());
    assert_eq!(first, second);

    let strict = Multipart::with_constraints("X-BOUNDARY", Constraints::new().require_terminator(true));
    let _ = strict.parse(body);
});
