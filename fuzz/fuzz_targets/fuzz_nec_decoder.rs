//! Fuzz target: `NecDecoder::edge`
//!
//! Interprets the input as a stream of 3-byte edges (level bit plus a
//! 16-bit gap in µs) and asserts the decoder never panics, survives
//! timestamp wrap, and decodes a clean frame after a reset.
//!
//! cargo fuzz run fuzz_nec_decoder

#![no_main]

use doorguard::drivers::nec::NecDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = NecDecoder::new();

    // Start near the top of the u32 range so gaps cross the wrap.
    let mut t = u32::MAX - 100_000;
    for chunk in data.chunks_exact(3) {
        let level = chunk[0] & 1 == 1;
        let gap = u32::from(u16::from_le_bytes([chunk[1], chunk[2]]));
        t = t.wrapping_add(gap);
        let _ = decoder.edge(level, t);
    }

    // After a reset a well-formed frame must still decode.
    decoder.reset();
    let value = 0x00FF_A25D_u32;
    let mut t = 0u32;
    let mut edges = vec![(false, t)];
    let mut push = |level, dt| {
        t += dt;
        edges.push((level, t));
    };
    push(true, 9000);
    push(false, 4500);
    for i in (0..32).rev() {
        push(true, 562);
        push(false, if (value >> i) & 1 == 1 { 1687 } else { 562 });
    }
    push(true, 562);

    let decoded: Vec<u32> = edges.into_iter().filter_map(|(l, at)| decoder.edge(l, at)).collect();
    assert_eq!(decoded, vec![value]);
});
