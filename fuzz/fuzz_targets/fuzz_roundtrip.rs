#![no_main]

use libfuzzer_sys::fuzz_target;
use tinydelta::{classify, decode, encode, encoded_bit_len, BitBuffer, Record, RecordReader};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }
    let readings: Vec<i8> = data.iter().take(255).map(|&b| b as i8).collect();

    // Worst case is 10 bits per reading plus END
    let mut buf = BitBuffer::new(readings.len() * 10 / 8 + 2);
    let bits = encode(&readings, &mut buf).expect("worst-case buffer is large enough");

    // Property 1: size preview matches
    assert_eq!(encoded_bit_len(&readings), Some(bits), "bit length mismatch");

    // Property 2: decode inverts encode
    let mut out = vec![0i8; readings.len()];
    let count = decode(buf.as_bytes(), bits, &mut out).expect("valid stream decodes");
    assert_eq!(count, readings.len(), "count mismatch");
    assert_eq!(out, readings, "value mismatch");

    // Property 3: records read back equal the classification plus END
    let read: Vec<Record> = RecordReader::new(buf.as_bytes(), bits)
        .expect("seed present")
        .map(|r| r.expect("valid record"))
        .collect();
    let mut expected: Vec<Record> = classify(&readings).collect();
    expected.push(Record::End);
    assert_eq!(read, expected, "record mismatch");
});
