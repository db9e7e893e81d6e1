// src/main.rs
use std::fs;
use std::path::PathBuf;
use anyhow::{Context, Result};
use chanplot::config::PlotConfig;
use chanplot::drivers::{render_channel_png, SampleEncoding, SampleScale};
use clap::Parser;
use log::{info, warn};
/// Plot one channel of an interleaved binary sample file as a PNG line chart.
#[derive(Parser)]
#[command(name = "chanplot", version)]
struct Cli {
    /// Binary file holding the samples.
    input: PathBuf,
    /// Zero-based channel to plot.
    #[arg(short, long, default_value_t = 0)]
    channel: usize,
    /// Number of interleaved channels per frame.
    #[arg(long)]
    channels: Option<usize>,
    /// Sample encoding (u8, i8, u16le, i16be, f32le, f64be, ...).
    #[arg(short, long)]
    encoding: Option<SampleEncoding>,
    /// Bytes to skip before the first frame.
    #[arg(long)]
    header_offset: Option<usize>,
    /// Scale integer samples into [-1, 1).
    #[arg(long)]
    full_scale: bool,
    /// Image width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Image height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// JSON file with `format` and `style` sections; flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where to write the PNG.
    #[arg(short, long, default_value = "plot.png")]
    output: PathBuf,
    /// Print the plot report as JSON on stdout.
    #[arg(long)]
    json: bool,
    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}
impl Cli {
    fn resolve_config(&self) -> Result<PlotConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                PlotConfig::from_json(&text)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => PlotConfig::default(),
        };
        if let Some(channels) = self.channels {
            config.format.channel_count = channels;
        }
        if let Some(encoding) = self.encoding {
            config.format.encoding = encoding;
        }
        if let Some(offset) = self.header_offset {
            config.format.header_offset = offset;
        }
        if self.full_scale {
            config.format.scale = SampleScale::FullScale;
        }
        if let Some(width) = self.width {
            config.style.width = width;
        }
        if let Some(height) = self.height {
            config.style.height = height;
        }
        config.validate()?;
        Ok(config)
    }
}
fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    let config = cli.resolve_config()?;
    let bytes = fs::read(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!("loaded {} ({} bytes)", cli.input.display(), bytes.len());
    let (png, report) = render_channel_png(&bytes, &config.format, cli.channel, config.style)?;
    fs::write(&cli.output, png)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    for message in report.messages() {
        warn!("{message}");
    }
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    info!(
        "wrote {} (channel {}, {} samples)",
        cli.output.display(),
        cli.channel,
        report.sample_count
    );
    Ok(())
}
