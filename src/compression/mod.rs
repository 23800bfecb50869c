//! The compression module runs the huffpack codec and drives it over files.
//!
//! Encoding happens in the following steps:
//! - Frequency count: Count every byte value in the input, all 256 of them.
//! - Tree build: Merge the two lightest nodes until one root remains, breaking ties by node id.
//! - Code derivation: Walk each leaf to the root to get its bit code, then tear the tree down.
//! - Packing: Concatenate the codes of the input bytes and pack them LSB first behind the header.
//!
//! Decoding parses the header, rebuilds the identical tree, and walks it bit by bit until the
//! recorded number of bytes has been produced.
//!
//! The whole input is handled in one piece; there are no blocks and no streaming mode.
//!
pub mod compress;
pub mod decompress;
pub mod verify;
