use std::{fmt::Display, fmt::Formatter};

use clap::{Parser, Subcommand};
use log::{info, LevelFilter};

use super::check_width;
use crate::bitstream::DEFAULT_BUF_SIZE;
use crate::error::Result;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map a -v count onto a verbosity. 0 is silent, 5 and up is chatty.
    pub fn from_level(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Dump or Repack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Print the input as width bit chunks
    Dump { width: u32 },
    /// Copy the input to output, reading with the given widths in turn
    Repack { output: String, widths: Vec<u32> },
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Dump { width } => write!(f, "Dump ({} bit chunks)", width),
            Mode::Repack { output, widths } => {
                write!(f, "Repack to {} (widths {:?})", output, widths)
            }
        }
    }
}

/// All user settable options that control program behavior
#[derive(Debug)]
pub struct BitOpts {
    /// Name of the file to read
    pub input: String,
    /// What to do with it
    pub op_mode: Mode,
    /// Buffer size hint for the reader and writer
    pub buffer_size: usize,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl BitOpts {
    pub fn new() -> Self {
        Self {
            input: String::new(),
            op_mode: Mode::Dump { width: 8 },
            buffer_size: DEFAULT_BUF_SIZE,
            verbose: Verbosity::Info,
        }
    }

    /// Put command line information from CLAP into our internal structure, checking the widths.
    pub fn from_args(args: Args) -> Result<Self> {
        let mut opts = Self::new();
        opts.verbose = Verbosity::from_level(args.v);
        if let Some(size) = args.buffer_size {
            opts.buffer_size = size;
        }
        match args.command {
            Command::Dump { file, width } => {
                check_width(width)?;
                opts.input = file;
                opts.op_mode = Mode::Dump { width };
            }
            Command::Repack {
                input,
                output,
                widths,
            } => {
                widths.iter().try_for_each(|&w| check_width(w))?;
                opts.input = input;
                opts.op_mode = Mode::Repack { output, widths };
            }
        }
        Ok(opts)
    }

    /// Report the settings at info level.
    pub fn report(&self) {
        info!("---- buffbits Initialization Start ----");
        info!("Verbosity set to {:?}", self.verbose);
        info!("Operational mode set to {}", self.op_mode);
        info!("Getting input from the file {}", self.input);
        if self.buffer_size != DEFAULT_BUF_SIZE {
            info!("Buffer size set to {}", self.buffer_size);
        }
        info!("---- buffbits Initialization End ----");
    }
}

impl Default for BitOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Bit level views and copies of files",
    long_about = "
    Reads files a few bits at a time through a buffered bit reader, and writes them back
    through a buffered bit writer. Useful for eyeballing bit packed formats."
)]
pub struct Args {
    /// Sets verbosity. -v0 is silent, -v5 is chatty
    #[clap(short = 'v', default_value_t = 3)]
    v: u8,

    /// Buffer size in bytes used for reading and writing
    #[clap(long = "buffer-size")]
    buffer_size: Option<usize>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a file as a column of fixed width bit chunks
    Dump {
        /// Filename of file to dump
        file: String,
        /// Chunk width in bits, 1..64
        #[clap(short = 'w', long, default_value_t = 8)]
        width: u32,
    },
    /// Copy a file bit by bit, reading with a cycling list of chunk widths
    Repack {
        /// Filename of file to read
        input: String,
        /// Filename of file to write
        output: String,
        /// Comma separated chunk widths in bits, each 1..64
        #[clap(short = 'w', long, value_delimiter = ',', default_value = "8")]
        widths: Vec<u32>,
    },
}

/// Parse the process arguments into BitOpts.
pub fn bitopts_init() -> Result<BitOpts> {
    BitOpts::from_args(Args::parse())
}
