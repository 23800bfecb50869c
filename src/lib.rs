//! Byte-oriented Huffman compression.
//!
//! Version 0.1.0
//!
//! Converts any byte sequence into a self-describing compressed stream and back. The
//! stream starts with a compact header holding the symbol frequencies, followed by the
//! Huffman-coded body packed least significant bit first.
//!
//! ```
//! use huffpack::{decode, encode};
//!
//! let packed = encode(b"abracadabra").unwrap();
//! assert_eq!(decode(&packed).unwrap(), b"abracadabra");
//! ```
//!
//! The codec is single threaded and keeps no state between calls. Every call builds and
//! releases its own tree, so separate calls can run on separate threads freely.
//!
//! Basic usage of the command line tool to compress a file is as follows:
//!
//! `$> huffpack -z test.txt`
//!
//! This will compress the file and create the file test.txt.huf.
//! The original file will be deleted unless -k is given.
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::encode;
pub use compression::decompress::decode;
pub use error::HuffError;
