//! The bitstream module converts between Huffman code bits and the packed bytes of a
//! huffpack stream.
//!
//! Bits are packed least significant bit first: the first code bit lands in bit 0 of the
//! first body byte. The final byte is padded with zeros, and the number of meaningful bits
//! is never stored. The decoder stops once it has produced as many symbols as the header
//! records.
//!
pub mod bitpacker;
