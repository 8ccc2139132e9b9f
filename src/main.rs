// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

#![allow(clippy::uninlined_format_args)]

use std::io::{Read, Write};
use std::path;

use pico_args::Arguments;

const HELP: &str = "\
svg2vg compiles SVG Tiny 1.2 files into VGLite static path headers.

USAGE:
  svg2vg [OPTIONS] <in-svg> <out-header>  # from file to file
  svg2vg [OPTIONS] <in-svg> -c            # from file to stdout
  svg2vg [OPTIONS] - <out-header>         # from stdin to file
  svg2vg [OPTIONS] - -c                   # from stdin to stdout

  svg2vg tiger.svg tiger.h
  svg2vg --data-type float --stats tiger.svg -c

OPTIONS:
  -h, --help                Prints this help
  -V, --version             Prints version
  -c                        Prints the output header to the stdout

  --name NAME               Sets the image name used as identifiers prefix
                            [default: input file stem or 'image']
  --data-type TYPE          Sets the path data storage type
                            [default: int32_t]
                            [possible values: int8_t, int16_t, int32_t, float]
  --dpi DPI                 Sets the resolution
                            [default: 96] [possible values: 10..4000 (inclusive)]
  --default-width LENGTH    Sets the width used for relative sizes without a viewBox
                            [default: 100]
  --default-height LENGTH   Sets the height used for relative sizes without a viewBox
                            [default: 100]
  --remove-unpainted        Skips elements without fill and stroke
  --stats                   Prints path command statistics to the stderr
  --quiet                   Disables warnings

ARGS:
  <in-svg>                  Input file
  <out-header>              Output file
";

fn main() {
    if let Err(e) = process() {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

#[derive(Debug)]
struct CliArgs {
    name: Option<String>,
    data_type: svg2vg::DataType,
    dpi: u32,
    default_width: u32,
    default_height: u32,
    remove_unpainted: bool,
    stats: bool,
    quiet: bool,
    input: String,
    output: String,
}

fn collect_args() -> Result<CliArgs, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        std::process::exit(0);
    }

    Ok(CliArgs {
        name: input.opt_value_from_str("--name")?,
        data_type: input.opt_value_from_str("--data-type")?.unwrap_or_default(),
        dpi: input.opt_value_from_fn("--dpi", parse_dpi)?.unwrap_or(96),
        default_width: input
            .opt_value_from_fn("--default-width", parse_length)?
            .unwrap_or(100),
        default_height: input
            .opt_value_from_fn("--default-height", parse_length)?
            .unwrap_or(100),
        remove_unpainted: input.contains("--remove-unpainted"),
        stats: input.contains("--stats"),
        quiet: input.contains("--quiet"),
        input: input.free_from_str()?,
        output: input.free_from_str()?,
    })
}

fn parse_dpi(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid number")?;

    if (10..=4000).contains(&n) {
        Ok(n)
    } else {
        Err("DPI out of bounds".to_string())
    }
}

fn parse_length(s: &str) -> Result<u32, String> {
    let n: u32 = s.parse().map_err(|_| "invalid length")?;

    if n > 0 {
        Ok(n)
    } else {
        Err("LENGTH cannot be zero".to_string())
    }
}

enum InputFrom {
    Stdin,
    File(path::PathBuf),
}

enum OutputTo {
    Stdout,
    File(path::PathBuf),
}

struct Args {
    in_svg: InputFrom,
    out_header: OutputTo,
    stats: bool,
    quiet: bool,
    opt: svg2vg::Options,
}

fn parse_args() -> Result<Args, String> {
    let args = collect_args().map_err(|e| e.to_string())?;

    let in_svg = if args.input == "-" {
        InputFrom::Stdin
    } else if args.input == "-c" {
        return Err("-c should be set after input".to_string());
    } else {
        InputFrom::File(args.input.as_str().into())
    };

    let out_header = if args.output == "-c" {
        OutputTo::Stdout
    } else {
        OutputTo::File(args.output.as_str().into())
    };

    let image_name = match args.name {
        Some(name) => name,
        None => match in_svg {
            InputFrom::File(ref path) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("image")
                .to_string(),
            InputFrom::Stdin => "image".to_string(),
        },
    };

    let default_size =
        svg2vg::Size::from_wh(args.default_width as f32, args.default_height as f32)
            .ok_or("invalid default size")?;

    let opt = svg2vg::Options {
        image_name,
        data_type: args.data_type,
        dpi: args.dpi as f32,
        default_size,
        remove_unpainted: args.remove_unpainted,
    };

    Ok(Args {
        in_svg,
        out_header,
        stats: args.stats,
        quiet: args.quiet,
        opt,
    })
}

fn process() -> Result<(), String> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            println!("{}", HELP);
            return Err(e);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    let svg_data = match args.in_svg {
        InputFrom::File(ref file) => {
            std::fs::read(file).map_err(|_| "failed to open the provided file".to_string())?
        }
        InputFrom::Stdin => load_stdin().map_err(|_| "failed to read stdin".to_string())?,
    };

    let image = svg2vg::Image::from_data(&svg_data, &args.opt).map_err(|e| e.to_string())?;
    let header = svg2vg::writer::write_header(&image);

    match args.out_header {
        OutputTo::Stdout => {
            std::io::stdout()
                .write_all(header.as_bytes())
                .map_err(|_| "failed to write to the stdout".to_string())?;
        }
        OutputTo::File(ref file) => {
            std::fs::write(file, header).map_err(|_| "failed to write the output file".to_string())?;
        }
    }

    if args.stats {
        print_stats(&args, &image);
    }

    Ok(())
}

fn load_stdin() -> Result<Vec<u8>, std::io::Error> {
    let mut buf = Vec::new();
    let stdin = std::io::stdin();
    let mut handle = stdin.lock();

    handle.read_to_end(&mut buf)?;

    Ok(buf)
}

fn print_stats(args: &Args, image: &svg2vg::Image) {
    let source = match args.in_svg {
        InputFrom::File(ref file) => file.display().to_string(),
        InputFrom::Stdin => "stdin".to_string(),
    };

    let stats = image.stats();
    eprintln!("==================");
    eprintln!("## {}", source);
    eprintln!("    Nb.Paths    : {}", stats.paths);
    eprintln!("    MoveTo      : {}", stats.move_to);
    eprintln!("    LineTo      : {}", stats.line_to);
    eprintln!("    Quadr Bezier: {}", stats.quad_to);
    eprintln!("    Cubic Bezier: {}", stats.cubic_to);
}

static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
