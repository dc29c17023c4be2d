#![no_main]

use libfuzzer_sys::fuzz_target;
use tinydelta::decode;

fuzz_target!(|data: &[u8]| {
    // First two bytes pick the declared bit length and the output capacity,
    // the rest is fed to the decoder - should never panic
    if data.len() < 2 {
        return;
    }
    let bytes = &data[2..];
    let bit_len = usize::from(data[0]) % (bytes.len() * 8 + 1);
    let mut out = vec![0i8; usize::from(data[1])];

    if let Ok(count) = decode(bytes, bit_len, &mut out) {
        assert!(count >= 1 && count <= out.len());
    }
});
