use log::error;

/// Packs a bit sequence into bytes, least significant bit first within each byte.
///
/// The final byte is padded with zero bits. The bit count itself is not stored; the
/// decoder knows how many symbols to read from the header.
pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut bp = BitPacker::new((bits.len() + 7) / 8);
    bp.out_code(bits);
    bp.flush();
    bp.output
}

/// Expands bytes back into bits, least significant bit first. Always returns
/// `bytes.len() * 8` bits, padding included.
pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        bits.extend((0..8).map(|shift| (byte >> shift) & 1 == 1));
    }
    bits
}

/// Creates a bitstream for output.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Number of valid bits in the last byte after flush(). 0 means the last byte is full.
    pub last_bits: u8,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with an output buffer of the size specified (in bytes).
    /// Call flush() before taking the output or up to 7 bits may be left in the queue.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            last_bits: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal write function common to all out.XX functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            self.output.push(self.queue as u8); //push the low byte out
            self.queue >>= 8;
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out1(&mut self, bit: bool) {
        self.queue |= (bit as u64) << self.q_bits; //new bits go above the queued ones
        self.q_bits += 1;
        self.write_stream();
    }

    /// Puts a Huffman code on the stream, first bit first.
    pub fn out_code(&mut self, code: &[bool]) {
        for &bit in code {
            self.out1(bit);
        }
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the most
    /// significant bits.
    pub fn flush(&mut self) {
        self.last_bits = self.q_bits % 8;
        if self.q_bits > 0 {
            self.q_bits = 8; //unused high bits of the queue are already zero
            self.write_stream();
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Number of bits put on the stream so far, padding excluded.
    pub fn bits_written(&self) -> u64 {
        let bytes = self.output.len() as u64;
        match self.last_bits {
            0 => bytes * 8 + self.q_bits as u64,
            partial => (bytes - 1) * 8 + partial as u64,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{pack, unpack, BitPacker};

    #[test]
    fn pack_lsb_first_test() {
        // 1,0,0,0,0,1,0,0 -> 0b0010_0001
        let bits = [true, false, false, false, false, true, false, false];
        assert_eq!(pack(&bits), vec![0b0010_0001]);
    }

    #[test]
    fn pack_pads_last_byte_test() {
        let bits = [true, true, true, true, true, true, true, true, true, false, true];
        assert_eq!(pack(&bits), vec![0xff, 0b0000_0101]);
    }

    #[test]
    fn pack_empty_test() {
        assert!(pack(&[]).is_empty());
        assert!(unpack(&[]).is_empty());
    }

    #[test]
    fn unpack_includes_padding_test() {
        let bits = unpack(&[0b0000_0101]);
        assert_eq!(bits.len(), 8);
        assert_eq!(
            bits,
            vec![true, false, true, false, false, false, false, false]
        );
    }

    #[test]
    fn unpack_inverts_pack_test() {
        let bits: Vec<bool> = (0..29).map(|i| i % 3 == 0 || i % 7 == 0).collect();
        let bytes = pack(&bits);
        assert_eq!(bytes.len(), 4);
        let back = unpack(&bytes);
        assert_eq!(&back[..bits.len()], &bits[..]);
        assert!(back[bits.len()..].iter().all(|&b| !b));
    }

    #[test]
    fn out_code_streams_codes_test() {
        let mut bp = BitPacker::new(4);
        bp.out_code(&[true, false, true]);
        assert_eq!(bp.bits_written(), 3);
        assert!(bp.output.is_empty());
        bp.out_code(&[true; 6]);
        assert_eq!(bp.bits_written(), 9);
        assert_eq!(bp.output, vec![0b1111_1101]);
        bp.flush();
        assert_eq!(bp.last_bits, 1);
        assert_eq!(bp.output, vec![0b1111_1101, 0b0000_0001]);
        assert_eq!(bp.bits_written(), 9);
    }

    #[test]
    fn out_code_matches_pack_test() {
        let codes: [&[bool]; 3] = [&[false], &[true, true, false], &[true, false, true, true]];
        let mut bp = BitPacker::new(8);
        let mut flat = Vec::new();
        for code in codes.iter().cycle().take(10) {
            bp.out_code(code);
            flat.extend_from_slice(code);
        }
        bp.flush();
        assert_eq!(bp.output, pack(&flat));
        assert_eq!(bp.bits_written(), flat.len() as u64);
    }
}
