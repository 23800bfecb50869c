/// Returns a frequency count of the input data, one counter for every byte value.
///
/// Callers must keep `data` under 2^32 bytes; the counters are u32 to match the header format.
pub fn freqs(data: &[u8]) -> [u32; 256] {
    let mut freqs = [0_u32; 256];
    data.iter().for_each(|&el| freqs[el as usize] += 1);
    freqs
}
