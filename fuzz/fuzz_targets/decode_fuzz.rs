#![no_main]
use libfuzzer_sys::fuzz_target;
use zlc::transcode;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must only ever produce errors, never panics.
    let _ = transcode::decompress_bytes(data);
});
