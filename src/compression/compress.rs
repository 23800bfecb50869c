use log::{debug, info, warn};

use crate::bitstream::bitpacker::BitPacker;
use crate::error::HuffError;
use crate::huffman_coding::freq_table::FreqTable;
use crate::huffman_coding::huffman::HuffmanTree;
use crate::tools::cli::{HuffOpts, SUFFIX};
use crate::tools::data_io::{read_input, retire_input, write_output};

/// Compress `data` into a self-describing huffpack stream: header, then packed code bits.
///
/// The only failure is an input longer than the format's u32 length field.
pub fn encode(data: &[u8]) -> Result<Vec<u8>, HuffError> {
    let table = FreqTable::build(data)?;

    // The tree is only needed long enough to read the codes off it.
    let tree = HuffmanTree::build(&table);
    let codes = tree.derive_codes();
    tree.destroy();

    let mut bp = BitPacker::new(((codes.encoded_bits(&table) + 7) / 8) as usize);
    for &byte in data {
        bp.out_code(codes.get(byte));
    }
    bp.flush();

    let mut out = table.to_header_bytes(data.len() as u32);
    let header_len = out.len();
    out.extend_from_slice(&bp.output);
    debug!(
        "Encoded {} bytes into {} ({} header, {} bits of body).",
        data.len(),
        out.len(),
        header_len,
        bp.bits_written()
    );
    Ok(out)
}

/// Compress every file named in opts (or stdin when there are none).
pub fn compress(opts: &HuffOpts) -> Result<(), HuffError> {
    if opts.files.is_empty() {
        let data = read_input(None)?;
        return write_output("", &encode(&data)?, opts);
    }

    for fname in &opts.files {
        if fname.ends_with(SUFFIX) {
            warn!("{} already has the {} suffix, compressing anyway.", fname, SUFFIX);
        }
        let data = read_input(Some(fname.as_str()))?;
        let packed = encode(&data)?;
        info!("{}: {} -> {} bytes.", fname, data.len(), packed.len());
        write_output(&format!("{}{}", fname, SUFFIX), &packed, opts)?;
        retire_input(fname, opts)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{compress, encode};
    use crate::huffman_coding::freq_table::Header;
    use crate::tools::cli::HuffOpts;

    #[test]
    fn empty_input_is_header_only_test() {
        let out = encode(&[]).unwrap();
        let header = Header::parse(&out).unwrap();
        assert_eq!(header.data_length, 0);
        assert_eq!(header.header_length, out.len());
        assert_eq!(out.len(), 20);
    }

    #[test]
    fn single_symbol_layout_test() {
        let out = encode(&[0x41; 1000]).unwrap();
        // 8 fixed + 12 bucket counts + one (symbol, u16) entry, then 1000 one-bit codes.
        assert_eq!(out.len(), 23 + 125);
        assert_eq!(&out[0..4], &23_u32.to_le_bytes());
        assert_eq!(&out[4..8], &1000_u32.to_le_bytes());
        assert!(out[23..].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn body_is_packed_codes_test() {
        use crate::bitstream::bitpacker::pack;
        use crate::huffman_coding::{freq_table::FreqTable, huffman::HuffmanTree};

        let data = b"mississippi river";
        let table = FreqTable::build(data).unwrap();
        let codes = HuffmanTree::build(&table).derive_codes();
        let bits: Vec<bool> = data.iter().flat_map(|&b| codes.get(b).to_vec()).collect();
        let header_len = table.to_header_bytes(data.len() as u32).len();
        assert_eq!(encode(data).unwrap()[header_len..], pack(&bits)[..]);
    }

    #[test]
    fn output_is_deterministic_test() {
        let data = b"she sells sea shells by the sea shore";
        assert_eq!(encode(data).unwrap(), encode(data).unwrap());
    }

    #[test]
    fn skewed_input_shrinks_test() {
        let data: Vec<u8> = (0..600_u32)
            .map(|i| match i % 10 {
                0..=6 => b'a',
                7 | 8 => b'b',
                _ => b'c',
            })
            .collect();
        assert!(encode(&data).unwrap().len() < data.len());
    }

    #[test]
    fn compress_file_test() {
        let mut p = std::env::temp_dir();
        p.push(format!("huffpack_compress_{}.txt", std::process::id()));
        let fname = p.to_string_lossy().into_owned();
        std::fs::write(&fname, b"compress me, compress me again").unwrap();

        let mut opts = HuffOpts::new();
        opts.files = vec![fname.clone()];
        compress(&opts).unwrap();

        let packed_name = format!("{}.huf", fname);
        let packed = std::fs::read(&packed_name).unwrap();
        assert_eq!(packed, encode(b"compress me, compress me again").unwrap());
        assert!(!std::path::Path::new(&fname).exists());
        std::fs::remove_file(&packed_name).unwrap();
    }
}
