#![no_main]
use jsonsax::{ByteStream, ParseEvent, ParserOptions};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

fn run(chunks: impl IntoIterator<Item = impl AsRef<[u8]>>, options: ParserOptions) -> Vec<ParseEvent> {
    let mut stream = ByteStream::new(options, Vec::new());
    for chunk in chunks {
        if stream.write(chunk.as_ref()).is_err() {
            return stream.into_parser().into_handler();
        }
    }
    let _ = stream.end(None);
    stream.into_parser().into_handler()
}

/// Split `data` into chunks of 1..=16 bytes, ignoring character boundaries.
fn split(data: &[u8], seed: u32) -> Vec<&[u8]> {
    let mut chunks = Vec::new();
    let mut state = seed;
    let mut rest = data;
    while !rest.is_empty() {
        state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let size = ((state >> 16) as usize % 16 + 1).min(rest.len());
        let (chunk, tail) = rest.split_at(size);
        chunks.push(chunk);
        rest = tail;
    }
    chunks
}

fn parse(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let flags = data[0];
    let seed = u32::from_le_bytes([data[1], data[2], data[3], data[4]]);
    let data = &data[HEADER..];

    let options = ParserOptions {
        max_buffer_length: if flags & 1 != 0 { 8 } else { 64 * 1024 },
        trim: flags & 2 != 0,
        normalize: flags & 4 != 0,
    };

    let whole = run([data], options);
    let split = run(split(data, seed), options);
    assert_eq!(whole, split, "events depend on how the input was split");

    // Anything serde_json accepts with a container root must be accepted too.
    if options.max_buffer_length > data.len() {
        if let Ok(Value::Array(_) | Value::Object(_)) = serde_json::from_slice::<Value>(data) {
            assert!(
                !whole.iter().any(|e| matches!(e, ParseEvent::Error(_))),
                "rejected a document serde_json accepts"
            );
        }
    }
}

fuzz_target!(|data: &[u8]| parse(data));
