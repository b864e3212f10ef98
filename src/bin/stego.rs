use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Builder;
use log::{debug, info, LevelFilter};
use lsb_stego::{carrier, nibble, Capacity, Carrier, CodecConfig};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Encodes and decodes messages into and from images.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Log what is being done
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message into an image
    Encode {
        /// The image to encode the message into
        image_path: PathBuf,
        /// The message to encode
        message: String,
        /// Where to write the encoded image (use a lossless format)
        output_path: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
        /// Also print the encoded message
        #[arg(short, long)]
        debug: bool,
    },
    /// Decode a message from an image
    Decode {
        /// The image to decode the message from
        image_path: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
        /// Write the decoded message to this text file
        #[arg(short, long)]
        output_path: Option<PathBuf>,
        /// Do not print the decoded message
        #[arg(short, long)]
        quiet: bool,
    },
    /// Report how many characters an image can hold
    Capacity {
        image_path: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Hide one image in the low nibbles of another of the same size
    Combine {
        cover_path: PathBuf,
        hidden_path: PathBuf,
        output_path: PathBuf,
    },
    /// Split a combined image back into cover and hidden images
    Separate {
        image_path: PathBuf,
        cover_output: PathBuf,
        hidden_output: PathBuf,
    },
}

/// Codec settings. Flags override values loaded with `--config`.
#[derive(Args)]
struct CodecArgs {
    /// The number of bits per character (7 or 8)
    #[arg(short, long)]
    bits_per_char: Option<u8>,
    /// The number of channels per pixel
    #[arg(short, long)]
    channels: Option<u8>,
    /// The number of bytes used for the length header
    #[arg(short, long)]
    metadata_bytes: Option<u8>,
    /// JSON file with codec settings
    #[arg(long)]
    config: Option<PathBuf>,
}

impl CodecArgs {
    fn resolve(&self) -> Result<CodecConfig> {
        let mut config = match &self.config {
            Some(path) => CodecConfig::from_json_file(path)
                .with_context(|| format!("loading codec config '{}'", path.display()))?,
            None => CodecConfig {
                bits_per_char: 8,
                ..Default::default()
            },
        };
        if let Some(bits) = self.bits_per_char {
            config.bits_per_char = bits;
        }
        if let Some(channels) = self.channels {
            config.channel_count = channels;
        }
        if let Some(bytes) = self.metadata_bytes {
            config.header_bytes = bytes;
        }
        config.validate()?;
        debug!("Codec config: {:?}", config);
        Ok(config)
    }
}

#[derive(Serialize)]
struct CapacityReport {
    image: PathBuf,
    width: u32,
    height: u32,
    channels: u8,
    config: CodecConfig,
    #[serde(flatten)]
    capacity: Capacity,
}

/// Logs go to stderr as `[LEVEL] message`; `RUST_LOG` overrides the level.
fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Builder::new()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Encode {
            image_path,
            message,
            output_path,
            codec,
            debug,
        } => {
            let config = codec.resolve()?;
            carrier::encode_file(&image_path, &message, &output_path, &config)
                .with_context(|| format!("encoding into '{}'", image_path.display()))?;
            if debug {
                println!("{}", message);
            }
        }
        Commands::Decode {
            image_path,
            codec,
            output_path,
            quiet,
        } => {
            let config = codec.resolve()?;
            let message = carrier::decode_file(&image_path, &config)
                .with_context(|| format!("decoding '{}'", image_path.display()))?;
            if !quiet {
                println!("{}", message);
            }
            if let Some(path) = output_path {
                fs::write(&path, &message)
                    .with_context(|| format!("writing '{}'", path.display()))?;
                info!("Wrote message to '{}'", path.display());
            }
        }
        Commands::Capacity {
            image_path,
            codec,
            json,
        } => {
            let config = codec.resolve()?;
            let carrier = Carrier::open(&image_path)
                .with_context(|| format!("opening '{}'", image_path.display()))?;
            let capacity = carrier.capacity(&config)?;
            let (width, height) = carrier.dimensions();
            let report = CapacityReport {
                image: image_path,
                width,
                height,
                channels: carrier.channels(),
                config,
                capacity,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!(
                    "{}: {}x{}, {} channels, {} bits available ({} header)",
                    report.image.display(),
                    report.width,
                    report.height,
                    report.channels,
                    capacity.available_bits,
                    capacity.header_bits
                );
                println!(
                    "Room for {} characters at {} bits each",
                    capacity.max_message_len, config.bits_per_char
                );
            }
        }
        Commands::Combine {
            cover_path,
            hidden_path,
            output_path,
        } => {
            nibble::combine_files(&cover_path, &hidden_path, &output_path)?;
        }
        Commands::Separate {
            image_path,
            cover_output,
            hidden_output,
        } => {
            nibble::separate_file(&image_path, &cover_output, &hidden_output)?;
        }
    }

    Ok(())
}
