#[macro_use]
extern crate tracing;

mod config;

use std::fs;
use std::path::Path;

use anyhow::Context as _;
use ironrdp_nsc::NscDecoder;

use crate::config::{Config, OutputFormat};

fn main() -> anyhow::Result<()> {
    let config = Config::parse_args().context("CLI arguments parsing")?;

    setup_logging(config.log_file.as_deref()).context("unable to initialize logging")?;

    let bitmap_data = fs::read(&config.input).with_context(|| format!("couldn’t read {}", config.input.display()))?;
    debug!(path = %config.input.display(), len = bitmap_data.len(), "Read bitmap stream");

    let mut decoder = NscDecoder::with_dimensions(config.width, config.height);
    decoder
        .process_message(&bitmap_data)
        .context("failed to decode NSCodec bitmap stream")?;

    let header = decoder.last_header().copied();
    let bitmap = decoder.into_bitmap().context("no bitmap after a successful decode")?;

    match config.format {
        OutputFormat::Png => write_png(&config.output, config.width, config.height, bitmap)?,
        OutputFormat::Bgra => fs::write(&config.output, &bitmap)
            .with_context(|| format!("couldn’t write {}", config.output.display()))?,
    }

    info!(
        width = config.width,
        height = config.height,
        ?header,
        output = %config.output.display(),
        "Bitmap written"
    );

    Ok(())
}

fn write_png(path: &Path, width: u16, height: u16, mut bitmap: Vec<u8>) -> anyhow::Result<()> {
    // BGRA to RGBA
    for pixel in bitmap.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }

    let file = fs::File::create(path).with_context(|| format!("couldn’t create {}", path.display()))?;

    let mut encoder = png::Encoder::new(std::io::BufWriter::new(file), u32::from(width), u32::from(height));
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().context("failed to write PNG header")?;
    writer.write_image_data(&bitmap).context("failed to write PNG data")?;
    writer.finish().context("failed to finish PNG stream")?;

    Ok(())
}

fn setup_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    use std::fs::OpenOptions;

    use tracing::metadata::LevelFilter;
    use tracing_subscriber::fmt::writer::BoxMakeWriter;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let (writer, ansi) = match log_file {
        Some(log_file) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_file)
                .with_context(|| format!("couldn’t open {}", log_file.display()))?;

            (BoxMakeWriter::new(file), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(ansi)
        .with_writer(writer);

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("IRONRDP_LOG")
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .try_init()
        .context("failed to set tracing global subscriber")?;

    Ok(())
}
