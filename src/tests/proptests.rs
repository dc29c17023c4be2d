use crate::{classify, decode, decode_to_vec, encode, encoded_bit_len, BitBuffer, Kind, Record, RecordReader};
use proptest::prelude::*;

prop_compose! {
    /// Random walk with small steps, occasional plateaus and rare jumps
    fn arb_sensor_series()(
        start in any::<i8>(),
        steps in prop::collection::vec(
            prop_oneof![
                4 => Just(0i8),
                4 => -3i8..=3,
                2 => -30i8..=30,
                1 => any::<i8>(),
            ],
            0..63,
        ),
    ) -> Vec<i8> {
        let mut value = start;
        let mut series = vec![value];
        for step in steps {
            value = value.wrapping_add(step);
            series.push(value);
        }
        series
    }
}

fn encode_to_buffer(readings: &[i8]) -> (BitBuffer, usize) {
    let mut buf = BitBuffer::new(128);
    let bits = encode(readings, &mut buf).unwrap();
    (buf, bits)
}

proptest! {
    /// Property: decode(encode(seq)) == seq for arbitrary values
    #[test]
    fn prop_roundtrip_any(readings in prop::collection::vec(any::<i8>(), 1..=64)) {
        let (buf, bits) = encode_to_buffer(&readings);
        let mut out = vec![0i8; readings.len()];
        let count = decode(buf.as_bytes(), bits, &mut out).unwrap();
        prop_assert_eq!(count, readings.len());
        prop_assert_eq!(out, readings);
    }

    /// Property: decode(encode(seq)) == seq for sensor-like series
    #[test]
    fn prop_roundtrip_sensor_series(readings in arb_sensor_series()) {
        let (buf, bits) = encode_to_buffer(&readings);
        let decoded = decode_to_vec(buf.as_bytes(), bits, 64).unwrap();
        prop_assert_eq!(decoded, readings);
    }

    /// Property: encoding is deterministic
    #[test]
    fn prop_deterministic(readings in arb_sensor_series()) {
        let (first, first_bits) = encode_to_buffer(&readings);
        let (second, second_bits) = encode_to_buffer(&readings);
        prop_assert_eq!(first_bits, second_bits);
        prop_assert_eq!(first.as_bytes(), second.as_bytes());
    }

    /// Property: the size preview matches the bits actually written
    #[test]
    fn prop_encoded_bit_len_accuracy(readings in arb_sensor_series()) {
        let (_, bits) = encode_to_buffer(&readings);
        prop_assert_eq!(encoded_bit_len(&readings), Some(bits));
    }

    /// Property: records cover every reading after the seed and obey the kind rules
    #[test]
    fn prop_classification_rules(readings in arb_sensor_series()) {
        let records: Vec<Record> = classify(&readings).collect();
        let covered: usize = records.iter().map(Record::reading_count).sum();
        prop_assert_eq!(covered, readings.len() - 1);

        let mut idx = 1;
        for record in records {
            let delta = readings[idx].wrapping_sub(readings[idx - 1]);
            match record {
                Record::Diff { delta: d } => {
                    prop_assert_eq!(d, delta);
                    prop_assert!(d != 0 && (-30..=30).contains(&d));
                }
                Record::Repeat { count } => {
                    prop_assert!((1..=8).contains(&count));
                    prop_assert_eq!(delta, 0);
                }
                Record::Literal { value } => {
                    prop_assert_eq!(value, readings[idx]);
                    prop_assert!(!(-30..=30).contains(&delta));
                }
                Record::End => prop_assert!(false, "classify never yields END"),
            }
            idx += record.reading_count();
        }
    }

    /// Property: the record stream read back matches the classification
    #[test]
    fn prop_record_reader_matches_classify(readings in arb_sensor_series()) {
        let (buf, bits) = encode_to_buffer(&readings);
        let reader = RecordReader::new(buf.as_bytes(), bits).unwrap();
        prop_assert_eq!(reader.seed(), readings[0]);

        let read: Vec<Record> = reader.map(Result::unwrap).collect();
        let mut expected: Vec<Record> = classify(&readings).collect();
        expected.push(Record::End);
        prop_assert_eq!(read, expected);
    }

    /// Property: a zero-delta run of length n costs ceil(n / 8) REPEAT records
    #[test]
    fn prop_repeat_runs_split_at_eight(value in any::<i8>(), run in 1usize..40) {
        let readings = vec![value; run + 1];
        let records: Vec<Record> = classify(&readings).collect();
        prop_assert_eq!(records.len(), run.div_ceil(8));
        prop_assert!(records.iter().all(|r| r.kind() == Kind::Repeat));
    }

    /// Property: field write then read returns the value at any offset
    #[test]
    fn prop_bitbuf_field_roundtrip(width in 1u8..=8, raw in any::<u8>(), offset in 0usize..120) {
        let value = if width == 8 { raw } else { raw & ((1u8 << width) - 1) };
        let mut buf = BitBuffer::new(16);
        buf.write_field(offset, value, width).unwrap();
        prop_assert_eq!(buf.read_field(offset, width).unwrap(), value);
        prop_assert_eq!(buf.bit_len(), offset + usize::from(width));
    }

    /// Property: consecutive fields do not disturb each other
    #[test]
    fn prop_bitbuf_adjacent_fields(fields in prop::collection::vec((1u8..=8, any::<u8>()), 1..20)) {
        let mut buf = BitBuffer::new(32);
        let mut offset = 0;
        let mut written = Vec::new();
        for (width, raw) in fields {
            let value = if width == 8 { raw } else { raw & ((1u8 << width) - 1) };
            buf.write_field(offset, value, width).unwrap();
            written.push((offset, width, value));
            offset += usize::from(width);
        }
        for (offset, width, value) in written {
            prop_assert_eq!(buf.read_field(offset, width).unwrap(), value);
        }
    }

    /// Property: arbitrary bytes never panic and never overrun the output
    #[test]
    fn prop_decode_garbage_is_bounded(
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        cut in any::<prop::sample::Index>(),
        capacity in 0usize..64,
    ) {
        let bit_len = cut.index(bytes.len() * 8 + 1);
        let mut out = vec![0i8; capacity];
        if let Ok(count) = decode(&bytes, bit_len, &mut out) {
            prop_assert!(count >= 1 && count <= capacity);
        }
    }

    /// Property: every strict prefix of a stream without END still decodes a prefix
    #[test]
    fn prop_truncation_never_invents_readings(readings in arb_sensor_series(), cut in any::<prop::sample::Index>()) {
        let (buf, bits) = encode_to_buffer(&readings);
        let bit_len = cut.index(bits + 1);
        if let Ok(decoded) = decode_to_vec(buf.as_bytes(), bit_len, 64) {
            prop_assert!(decoded.len() <= readings.len());
            prop_assert_eq!(&decoded[..], &readings[..decoded.len()]);
        }
    }
}
