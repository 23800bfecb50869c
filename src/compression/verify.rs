use std::time::{Duration, Instant};

use log::{error, info};

use super::{compress::encode, decompress::decode};
use crate::error::HuffError;
use crate::tools::cli::HuffOpts;
use crate::tools::data_io::read_input;

/// Outcome of a successful in-memory round trip.
#[derive(Debug)]
pub struct Report {
    pub original: usize,
    pub compressed: usize,
    pub elapsed: Duration,
}

impl Report {
    /// Compressed size over original size. An empty input reports 0.
    pub fn ratio(&self) -> f64 {
        if self.original == 0 {
            0.0
        } else {
            self.compressed as f64 / self.original as f64
        }
    }
}

/// Encode and decode `data` in memory and check the result matches byte for byte.
pub fn verify_data(name: &str, data: &[u8]) -> Result<Report, HuffError> {
    let start = Instant::now();
    let packed = encode(data)?;
    let plain = decode(&packed)?;
    let elapsed = start.elapsed();

    if plain != data {
        error!("Round trip of {} differs from the original.", name);
        return Err(HuffError::VerifyMismatch {
            path: name.to_string(),
        });
    }
    Ok(Report {
        original: data.len(),
        compressed: packed.len(),
        elapsed,
    })
}

/// Test mode: round trip every input named in opts (or stdin) and print a summary line each.
pub fn verify(opts: &HuffOpts) -> Result<(), HuffError> {
    let names: Vec<Option<&str>> = if opts.files.is_empty() {
        vec![None]
    } else {
        opts.files.iter().map(|f| Some(f.as_str())).collect()
    };

    for fname in names {
        let name = fname.unwrap_or("(stdin)");
        let data = read_input(fname)?;
        let report = verify_data(name, &data)?;
        info!("{} verified in {:?}.", name, report.elapsed);
        println!(
            "{}: {} -> {} bytes, ratio {:.3}, {:.3}s",
            name,
            report.original,
            report.compressed,
            report.ratio(),
            report.elapsed.as_secs_f64()
        );
    }
    Ok(())
}
