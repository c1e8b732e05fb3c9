//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs::File,
    io::{self, Write},
};

use buffbits::tools::{
    cli::{bitopts_init, Mode},
    dump::dump,
    repack::repack,
};

use log::info;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> Result<(), io::Error> {
    let options = bitopts_init()?;

    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        options.verbose.level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    options.report();

    let input = File::open(&options.input)?;
    let len = input.metadata()?.len();

    //----- Figure what we need to do and go do it
    match &options.op_mode {
        Mode::Dump { width } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            let chunks = dump(input, len, *width, options.buffer_size, &mut out)?;
            out.flush()?;
            info!("{} chunks of {} bits", chunks, width);
        }
        Mode::Repack { output, widths } => {
            let sink = File::create(output)?;
            repack(input, sink, len, widths, options.buffer_size)?;
        }
    }

    info!("Done.");
    Ok(())
}
