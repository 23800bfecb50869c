use log::{debug, info, warn};

use crate::bitstream::bitpacker::unpack;
use crate::error::HuffError;
use crate::huffman_coding::freq_table::Header;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::cli::{HuffOpts, SUFFIX};
use crate::tools::data_io::{read_input, retire_input, write_output};

/// Reconstruct the original bytes from a huffpack stream.
///
/// All header lengths are checked against the buffer before use, and a body that runs
/// out of bits before `data_length` symbols are decoded is a `TruncatedStream` error.
/// Nothing is returned unless the whole stream decodes.
pub fn decode(stream: &[u8]) -> Result<Vec<u8>, HuffError> {
    let header = Header::parse(stream)?;
    debug!(
        "Header is {} bytes, expecting {} output bytes.",
        header.header_length, header.data_length
    );

    // Same table, same tie-break: this is the encoder's tree.
    let tree = HuffmanTree::build(&header.table);
    let bits = unpack(&stream[header.header_length..]);

    // Every code is at least one bit long, which bounds what we can produce.
    let mut out = Vec::with_capacity(header.data_length.min(bits.len()));
    let mut cursor = 0;
    for decoded in 0..header.data_length {
        match tree.decode_one(&bits, &mut cursor) {
            Some(sym) => out.push(sym),
            None => {
                tree.destroy();
                return Err(HuffError::TruncatedStream {
                    decoded,
                    expected: header.data_length,
                });
            }
        }
    }
    tree.destroy();

    if bits.len() - cursor >= 8 {
        warn!(
            "{} unused bits after the last symbol.",
            bits.len() - cursor
        );
    }
    Ok(out)
}

/// Name of the file a compressed file decompresses to.
pub fn output_name(fname: &str) -> String {
    match fname.strip_suffix(SUFFIX) {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => format!("{}.out", fname),
    }
}

/// Decompress every file named in opts (or stdin when there are none).
pub fn decompress(opts: &HuffOpts) -> Result<(), HuffError> {
    if opts.files.is_empty() {
        let stream = read_input(None)?;
        return write_output("", &decode(&stream)?, opts);
    }

    for fname in &opts.files {
        if !fname.ends_with(SUFFIX) {
            warn!("{} does not end in {}, trying anyway.", fname, SUFFIX);
        }
        let stream = read_input(Some(fname.as_str()))?;
        let data = decode(&stream)?;
        info!("{}: {} -> {} bytes.", fname, stream.len(), data.len());
        write_output(&output_name(fname), &data, opts)?;
        retire_input(fname, opts)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{decode, decompress, output_name};
    use crate::compression::compress::encode;
    use crate::error::HuffError;
    use crate::tools::cli::HuffOpts;

    /// Deterministic byte generator so tests need no extra crates.
    fn pseudo_random(len: usize, seed: u64) -> Vec<u8> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (state >> 33) as u8
            })
            .collect()
    }

    fn round_trip(data: &[u8]) {
        let packed = encode(data).unwrap();
        assert_eq!(decode(&packed).unwrap(), data);
    }

    #[test]
    fn round_trip_empty_test() {
        round_trip(&[]);
    }

    #[test]
    fn round_trip_single_byte_test() {
        round_trip(&[0]);
        round_trip(&[0xff]);
    }

    #[test]
    fn round_trip_repeated_byte_test() {
        let data = vec![0x41; 1000];
        let packed = encode(&data).unwrap();
        assert!(packed.len() < data.len());
        assert_eq!(decode(&packed).unwrap(), data);
    }

    #[test]
    fn round_trip_all_symbols_test() {
        let data: Vec<u8> = (0..=255).cycle().take(256 * 3 + 17).collect();
        round_trip(&data);
    }

    #[test]
    fn round_trip_text_test() {
        round_trip(
            "static_cast is the first cast you should attempt to use. It does things like \
             implicit conversions between types."
                .as_bytes(),
        );
    }

    #[test]
    fn round_trip_pseudo_random_test() {
        for (len, seed) in [(1, 1), (10, 10), (100, 100), (5000, 7)] {
            round_trip(&pseudo_random(len, seed));
        }
    }

    #[test]
    fn round_trip_wide_counts_test() {
        // Counts land in all three header buckets.
        let mut data = vec![b'x'; 70_000];
        data.extend(vec![b'y'; 300]);
        data.extend(vec![b'z'; 3]);
        round_trip(&data);
    }

    #[test]
    fn round_trip_fibonacci_counts_test() {
        let mut data = Vec::new();
        let (mut a, mut b) = (1_usize, 1_usize);
        for sym in 0..20_u8 {
            data.extend(std::iter::repeat(sym).take(a));
            let next = a + b;
            a = b;
            b = next;
        }
        round_trip(&data);
    }

    #[test]
    fn truncated_body_test() {
        let data = pseudo_random(200, 3);
        let mut packed = encode(&data).unwrap();
        packed.truncate(packed.len() - 10);
        match decode(&packed) {
            Err(HuffError::TruncatedStream { decoded, expected }) => {
                assert_eq!(expected, 200);
                assert!(decoded < 200);
            }
            other => panic!("expected TruncatedStream, got {:?}", other),
        }
    }

    #[test]
    fn corrupt_header_test() {
        let mut packed = encode(b"hello world").unwrap();
        // Inflate the byte-bucket count so it overruns the table.
        packed[8] = 0xff;
        assert!(matches!(
            decode(&packed),
            Err(HuffError::InvalidFrequencyData { .. })
        ));
        assert!(matches!(
            decode(&[1, 2, 3]),
            Err(HuffError::MalformedHeader { .. })
        ));
    }

    #[test]
    fn short_header_length_test() {
        let mut packed = encode(b"abc").unwrap();
        packed[0] = 12;
        assert!(matches!(
            decode(&packed),
            Err(HuffError::InvalidFrequencyData { .. })
        ));
    }

    #[test]
    fn output_name_test() {
        assert_eq!(output_name("notes.txt.huf"), "notes.txt");
        assert_eq!(output_name("notes.txt"), "notes.txt.out");
        assert_eq!(output_name(".huf"), ".huf.out");
    }

    #[test]
    fn decompress_file_test() {
        let mut p = std::env::temp_dir();
        p.push(format!("huffpack_decompress_{}.bin", std::process::id()));
        let plain_name = p.to_string_lossy().into_owned();
        let packed_name = format!("{}.huf", plain_name);
        let data = pseudo_random(1000, 42);
        std::fs::write(&packed_name, encode(&data).unwrap()).unwrap();

        let mut opts = HuffOpts::new();
        opts.files = vec![packed_name.clone()];
        opts.keep_input_files = true;
        decompress(&opts).unwrap();

        assert_eq!(std::fs::read(&plain_name).unwrap(), data);
        assert!(std::path::Path::new(&packed_name).exists());
        std::fs::remove_file(&plain_name).unwrap();
        std::fs::remove_file(&packed_name).unwrap();
    }
}
