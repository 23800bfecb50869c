use clap::Parser;
use log::{info, warn};
use std::{fmt::Display, fmt::Formatter};

/// Suffix added to compressed files.
pub const SUFFIX: &str = ".huf";

/// Verbosity of user information
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

impl From<u8> for Verbosity {
    fn from(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub struct HuffOpts {
    /// Vec of names of files to read for input. Empty means stdin.
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Info,
        }
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "A byte-oriented Huffman file compressor",
    long_about = "
    Every input is compressed as a whole with a single Huffman tree built over all 256 byte
    values. The symbol frequencies travel in a compact header in front of the packed bits,
    so the decoder can rebuild the identical tree.

    If no file names are given, huffpack reads standard input and writes standard output."
)]
struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Perform compression on the input files (default)
    #[clap(short = 'z', long = "compress", conflicts_with_all = &["decompress", "test"])]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress", conflicts_with = "test")]
    decompress: bool,

    /// Compress and decompress in memory, check the result and report the ratio
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to standard out
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,
}

/// Parse the process command line into HuffOpts and set the log level.
pub fn huffopts_init() -> HuffOpts {
    opts_from(Args::parse())
}

/// Parse an explicit argument list (the first item is the program name).
pub fn huffopts_from<I, T>(args: I) -> Result<HuffOpts, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Ok(opts_from(Args::try_parse_from(args)?))
}

/// Put command line information from CLAP into our internal structure.
fn opts_from(args: Args) -> HuffOpts {
    let mut opts = HuffOpts::new();

    opts.files = args.files;
    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    opts.force_overwrite = args.force;
    opts.keep_input_files = args.keep;
    if args.stdout || opts.files.is_empty() {
        opts.output = Output::Stdout
    };
    opts.verbose = Verbosity::from(args.v);

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    // Below we report initialization status to the user
    info!("---- huffpack initialization start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    if opts.files.is_empty() {
        warn!("No input files, reading from stdin");
    } else {
        info!("Getting input from {:?}", opts.files);
    }
    info!("Sending output to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- huffpack initialization end ----");
    opts
}
