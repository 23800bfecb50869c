use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use log::{debug, error};

use super::cli::{HuffOpts, Output};
use crate::error::HuffError;

/// Read a whole input. `None` reads stdin.
pub fn read_input(fname: Option<&str>) -> Result<Vec<u8>, HuffError> {
    match fname {
        Some(f) => fs::read(f).map_err(|e| {
            error!("Cannot read from the file {}", f);
            HuffError::from(e)
        }),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

/// Write a result either to `fname` or to stdout, as opts.output directs.
pub fn write_output(fname: &str, data: &[u8], opts: &HuffOpts) -> Result<(), HuffError> {
    match opts.output {
        Output::Stdout => {
            let mut out = io::stdout().lock();
            out.write_all(data)?;
            out.flush()?;
        }
        Output::File => {
            if Path::new(fname).exists() && !opts.force_overwrite {
                error!("Output file {} already exists.", fname);
                return Err(HuffError::OutputExists(fname.to_string()));
            }
            fs::write(fname, data)?;
            debug!("Wrote {} bytes to {}", data.len(), fname);
        }
    }
    Ok(())
}

/// Remove an input once its output is safely written, unless the user asked to keep it.
/// Inputs are always kept when the output went to stdout.
pub fn retire_input(fname: &str, opts: &HuffOpts) -> Result<(), HuffError> {
    if opts.keep_input_files || opts.output == Output::Stdout {
        return Ok(());
    }
    fs::remove_file(fname)?;
    debug!("Removed input file {}", fname);
    Ok(())
}
