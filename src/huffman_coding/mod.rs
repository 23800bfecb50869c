//! The huffman module builds the coding tree and the stream header for huffpack.
//!
//! Every stream uses one tree built over all 256 byte values, zero-count symbols
//! included. Ties between equal weights are broken by a node id (leaves 0..=255 by
//! symbol, internal nodes 256.. in merge order), so the decoder rebuilds exactly the
//! encoder's tree from the frequency table alone.
//!
//! - freq_table: Symbol counts and the header that serializes them.
//! - huffman: The coding tree, code derivation and bit-walk decoding.
//!
pub mod freq_table;
pub mod huffman;
