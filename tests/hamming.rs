use bitvec::prelude::*;
use hamcode::hamming::{
    decode_stream, decode_stream_with, encode_stream, noise, par_decode_stream,
    par_encode_stream, parity_bits_needed, symbols, CodecConfig, CorruptionScope, HammingCodec,
    TrailingBlock,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_bits(rng: &mut ChaCha20Rng, len: usize) -> BitVec<u8, Msb0> {
    (0..len).map(|_| rng.gen::<bool>()).collect()
}

#[test]
fn test_byte_scenario() {
    let input = symbols::parse_bits("01000001").unwrap();
    assert_eq!(parity_bits_needed(8), 4);

    let encoded = encode_stream(&input, 8).unwrap();
    assert_eq!(encoded.len(), 12);

    let mut rng = ChaCha20Rng::seed_from_u64(65);
    for _ in 0..50 {
        let scrambled =
            noise::scramble_stream(&encoded, 12, &mut rng, CorruptionScope::Any).unwrap();
        let decoded = decode_stream(&scrambled, 12, true).unwrap();
        assert_eq!(symbols::to_bit_string(&decoded), "01000001");
    }

    // two flips: recovery is not guaranteed, decoding must still succeed
    for i in 0..12 {
        for j in (i + 1)..12 {
            let mut damaged = encoded.clone();
            let (a, b) = (damaged[i], damaged[j]);
            damaged.set(i, !a);
            damaged.set(j, !b);
            let decoded = decode_stream(&damaged, 12, true).unwrap();
            assert_eq!(decoded.len(), 8);
        }
    }
}

#[test]
fn test_stream_chunking_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(31);
    for d in 1..=40 {
        let bits = random_bits(&mut rng, d * 5);
        let encoded = encode_stream(&bits, d).unwrap();
        let decoded = decode_stream(&encoded, parity_bits_needed(d) + d, true).unwrap();
        assert_eq!(decoded, bits);
    }
}

#[test]
fn test_one_flip_per_block_is_repaired() {
    let mut rng = ChaCha20Rng::seed_from_u64(99);
    for d in [1, 4, 8, 11, 26, 57, 100] {
        // three full blocks and a short one
        let bits = random_bits(&mut rng, d * 3 + d / 2 + 1);
        let total = parity_bits_needed(d) + d;
        let encoded = encode_stream(&bits, d).unwrap();

        let scrambled =
            noise::scramble_stream(&encoded, total, &mut rng, CorruptionScope::Any).unwrap();
        let decoded =
            decode_stream_with(&scrambled, total, true, TrailingBlock::Decode).unwrap();
        assert_eq!(decoded.data, bits, "block size {}", d);
        assert_eq!(decoded.corrected_blocks().count(), decoded.blocks.len());
        assert_eq!(decoded.uncorrectable_blocks().count(), 0);
    }
}

#[test]
fn test_clean_stream_reports_no_corrections() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let bits = random_bits(&mut rng, 26 * 20);
    let encoded = encode_stream(&bits, 26).unwrap();

    let decoded = decode_stream_with(&encoded, 31, true, TrailingBlock::Reject).unwrap();
    assert_eq!(decoded.data, bits);
    assert_eq!(decoded.blocks.len(), 20);
    assert_eq!(decoded.corrected_blocks().count(), 0);
}

#[test]
fn test_codec_bytes_across_configs() {
    let text = b"The quick brown fox jumps over the lazy dog";
    let mut rng = ChaCha20Rng::seed_from_u64(2024);
    for bits_per_symbol in [7, 8, 12] {
        for data_bits in [4, 8, 11, 26] {
            let config = CodecConfig::default()
                .with_bits_per_symbol(bits_per_symbol)
                .with_data_bits_per_block(data_bits)
                .with_trailing(TrailingBlock::Decode);
            let codec = HammingCodec::new(config).unwrap();

            let encoded = codec.encode_bytes(text).unwrap();
            let scrambled = noise::scramble_stream(
                &encoded,
                codec.total_bits(),
                &mut rng,
                CorruptionScope::DataOnly,
            )
            .unwrap();
            assert_eq!(
                codec.decode_bytes(&scrambled).unwrap(),
                text.to_vec(),
                "{} bits per symbol, {} data bits",
                bits_per_symbol,
                data_bits
            );
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    for d in [4, 8, 57] {
        let bits = random_bits(&mut rng, d * 64 + 3);
        let total = parity_bits_needed(d) + d;

        let encoded = encode_stream(&bits, d).unwrap();
        assert_eq!(par_encode_stream(&bits, d).unwrap(), encoded);

        let scrambled =
            noise::scramble_stream(&encoded, total, &mut rng, CorruptionScope::Any).unwrap();
        let sequential =
            decode_stream_with(&scrambled, total, true, TrailingBlock::Decode).unwrap();
        let parallel = par_decode_stream(&scrambled, total, true, TrailingBlock::Decode).unwrap();
        assert_eq!(parallel, sequential);
        assert_eq!(sequential.data, bits);
    }
}
