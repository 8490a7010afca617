#![no_main]
use libfuzzer_sys::fuzz_target;
use zlc::Level;
use zlc::transcode::{compress_bytes, decompress_bytes};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the level.
    let level = Level::new(u32::from(data[0]) % (Level::MAX + 1)).unwrap();
    let payload = &data[1..];

    let container = compress_bytes(payload, level).unwrap();
    let decoded = decompress_bytes(&container).unwrap();
    assert_eq!(decoded, payload);
});
