extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate dasm16;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs;
use std::path::{Path, PathBuf};

use dasm16::assembler::{self, issue::Severity};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tListing: {}\n\tHex dump: {}\n\tOutfile: {}\n\tInfile: {}",
        level_filter(args.occurrences_of("verbose")),
        args.is_present("listing"),
        args.is_present("hexdump"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    // INPUT is a required argument, clap has already rejected its absence.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());

    let source = match fs::read_to_string(ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(source) => source,
    };

    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });
    let listing = args.is_present("listing");

    let result = assembler::compile_with_listing(&source, |index, line, (offset, bytes)| {
        if !listing {
            return;
        }
        grid.add(Cell::from(format!("{:>4}:", index + 1)));
        grid.add(Cell::from(if bytes.is_empty() {
            String::new()
        } else {
            format!("0x{:04X}:", offset / 2)
        }));
        grid.add(Cell::from(hex_words(bytes)));
        grid.add(Cell::from(line.to_string()));
    });

    let result = match result {
        Err(err) => {
            error!("fatal: internal code generation error: {}", err);
            std::process::exit(1);
        },
        Ok(result) => result,
    };

    if listing {
        println!("{}", grid.fit_into_columns(4));
    }

    for issue in result.issues() {
        match issue.severity() {
            Severity::Error   => error!("line {}: {}", issue.line() + 1, issue.message()),
            Severity::Warning => warn!("line {}: {}", issue.line() + 1, issue.message()),
        }
    }

    let image = match result.image() {
        None => {
            let count = result.issues().iter().filter(|i| i.is_error()).count();
            error!("Stopped assembly due to {} error(s).", count);
            std::process::exit(1);
        },
        Some(image) => image,
    };

    if args.is_present("hexdump") {
        print!("{}", hex_dump(image, 8));
    }

    let opath = match args.value_of("output") {
        Some(filename) => PathBuf::from(filename),
        None => ipath.with_extension("bin"),
    };

    if let Err(err) = fs::write(&opath, image) {
        error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
        std::process::exit(1);
    }
    info!("wrote {} word(s) to `{}`", image.len() / 2, opath.display());
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(option_env!("CARGO_PKG_NAME").unwrap_or("dasm16"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile"))
        .arg(Arg::with_name("listing")
            .short("d")
            .long("listing")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the source listing alongside the generated words to STDOUT"))
        .arg(Arg::with_name("hexdump")
            .short("x")
            .long("hexdump")
            .takes_value(false)
            .help("prints a hex dump of the assembled image to STDOUT"))
        .get_matches()
}

/// Maps the number of `-v` flags onto a log level.
fn level_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

// Diagnostics go to stderr; stdout carries the listing and hex dump.
fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.level(),
                message
            ))
        })
        .level(level_filter(verbosity))
        .chain(std::io::stderr())
        .apply().ok();
}

/// Formats big-endian words as space-separated hex.
fn hex_words(bytes: &[u8]) -> String {
    bytes
        .chunks(2)
        .map(|w| format!("{:02X}{:02X}", w[0], w.get(1).copied().unwrap_or(0)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One row per `per_row` words, each prefixed with its word address.
/// The last row is padded with zero words.
fn hex_dump(image: &[u8], per_row: usize) -> String {
    let mut out = String::new();
    for (row, chunk) in image.chunks(per_row * 2).enumerate() {
        let mut padded = chunk.to_vec();
        padded.resize(per_row * 2, 0);
        out.push_str(&format!("{:04X}: {}\n", row * per_row, hex_words(&padded)));
    }
    out
}
