use std::env;
use std::process;

use hamcode::hamming::{noise, symbols, CodecConfig, CorruptionScope, HammingCodec};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} input_string [seed]", args[0]);
        process::exit(1);
    }

    let mut rng = match args.get(2).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => ChaCha20Rng::seed_from_u64(seed),
        Some(Err(e)) => {
            eprintln!("invalid seed: {}", e);
            process::exit(1);
        }
        None => ChaCha20Rng::from_entropy(),
    };

    if let Err(e) = run(&args[1], &mut rng) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(input: &str, rng: &mut ChaCha20Rng) -> hamcode::Result<()> {
    let codec = HammingCodec::new(CodecConfig::default())?;
    let encoded = codec.encode_bytes(input.as_bytes())?;
    let scrambled =
        noise::scramble_stream(&encoded, codec.total_bits(), rng, CorruptionScope::DataOnly)?;
    println!("{}", symbols::to_bit_string(&scrambled));

    let decoded = codec.decode(&scrambled)?;
    let bytes = symbols::bits_to_bytes(&decoded.data, codec.config().bits_per_symbol)?;
    println!("{}", String::from_utf8_lossy(&bytes));
    println!(
        "{} of {} blocks corrected",
        decoded.corrected_blocks().count(),
        decoded.blocks.len()
    );
    Ok(())
}
