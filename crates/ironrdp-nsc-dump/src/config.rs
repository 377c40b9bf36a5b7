use std::path::PathBuf;

use clap::clap_derive::ValueEnum;
use clap::Parser;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// 8-bit RGBA PNG image
    Png,
    /// Raw BGRA8888 pixels, rows top to bottom
    Bgra,
}

#[derive(Clone, Debug)]
pub(crate) struct Config {
    pub(crate) log_file: Option<PathBuf>,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) input: PathBuf,
    pub(crate) output: PathBuf,
    pub(crate) format: OutputFormat,
}

#[derive(Parser, Debug)]
#[clap(author = "Devolutions", about = "NSCodec bitmap stream decoder")]
#[clap(version, long_about = None)]
struct Args {
    /// A file with decoder logs, stderr is used when omitted
    #[clap(short, long, value_parser)]
    log_file: Option<PathBuf>,

    /// Width of the encoded bitmap, in pixels
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..))]
    width: u16,

    /// Height of the encoded bitmap, in pixels
    #[clap(long, value_parser = clap::value_parser!(u16).range(1..))]
    height: u16,

    /// File holding a single NSCodec bitmap stream
    #[clap(short, long, value_parser)]
    input: PathBuf,

    /// Destination of the decoded bitmap
    #[clap(short, long, value_parser)]
    output: PathBuf,

    /// Output image format
    #[clap(long, value_enum, value_parser, default_value_t = OutputFormat::Png)]
    format: OutputFormat,
}

impl Config {
    pub(crate) fn parse_args() -> anyhow::Result<Self> {
        let args = Args::parse();

        Ok(Self {
            log_file: args.log_file,
            width: args.width,
            height: args.height,
            input: args.input,
            output: args.output,
            format: args.format,
        })
    }
}
