#![no_main]

use libfuzzer_sys::fuzz_target;
use tinydelta::BitBuffer;

fuzz_target!(|data: &[u8]| {
    // (offset, width, value) triples, each written into a fresh 32-byte buffer
    for chunk in data.chunks_exact(3) {
        let mut buf = BitBuffer::new(32);
        let offset = usize::from(chunk[0]);
        let width = chunk[1] % 10;
        let value = chunk[2];

        match buf.write_field(offset, value, width) {
            Ok(()) => {
                let mask = if width == 8 { u8::MAX } else { (1u8 << width) - 1 };
                assert_eq!(buf.read_field(offset, width), Ok(value & mask));
                assert_eq!(buf.bit_len(), offset + usize::from(width));
            }
            Err(_) => assert_eq!(buf.bit_len(), 0),
        }
    }
});
