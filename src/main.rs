//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use huffpack::compression::{compress::compress, decompress::decompress, verify::verify};
use huffpack::tools::cli::{huffopts_init, Mode};
use huffpack::HuffError;

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    // Logs go to stderr so compressed data can go to stdout.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("Could not start the terminal logger.");
    }

    let options = huffopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress(&options),
        Mode::Unzip => decompress(&options),
        Mode::Test => verify(&options),
    };

    result?;
    info!("Done.");
    Ok(())
}
