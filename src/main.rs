use anyhow::{anyhow, Context, Error};
use env_logger::{Builder, Env};
use log::info;
use prost::Message;
use siri_gtfsrt::config::Options;
use siri_gtfsrt::siri::Siri;
use siri_gtfsrt::transit_realtime::FeedMessage;
use siri_gtfsrt::{convert, feed};
use std::io::Read;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "siri-gtfsrt")]
struct Params {
    #[structopt(
        short = "i",
        long = "input",
        help = "SIRI document to convert (json), - for stdin",
        default_value = "-"
    )]
    input: String,
    #[structopt(
        short = "o",
        long = "output",
        parse(from_os_str),
        help = "output file, or directory with --by-datasource",
        default_value = "feed.pb"
    )]
    output: PathBuf,
    #[structopt(
        short = "f",
        long = "format",
        help = "output format: pb or json",
        default_value = "pb"
    )]
    format: Format,
    #[structopt(long = "by-datasource", help = "write one feed per datasource")]
    by_datasource: bool,
    #[structopt(
        short = "c",
        long = "config",
        parse(from_os_str),
        help = "conversion options (json)"
    )]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Protobuf,
    Json,
}

impl std::str::FromStr for Format {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pb" => Ok(Format::Protobuf),
            "json" => Ok(Format::Json),
            f => Err(anyhow!("unknown output format: {}", f)),
        }
    }
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Protobuf => "pb",
            Format::Json => "json",
        }
    }
}

fn read_input(input: &str) -> Result<String, Error> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("impossible to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("impossible to read {}", input))
    }
}

fn read_options(config: &Option<PathBuf>) -> Result<Options, Error> {
    match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("impossible to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid options in {}", path.display()))
        }
        None => Ok(Options::default()),
    }
}

fn encode(feed: &FeedMessage, format: Format) -> Result<Vec<u8>, Error> {
    match format {
        Format::Protobuf => {
            let mut buffer = Vec::new();
            feed.encode(&mut buffer)
                .context("impossible to encode the feed")?;
            Ok(buffer)
        }
        Format::Json => serde_json::to_vec_pretty(feed).map_err(|e| e.into()),
    }
}

fn main() -> Result<(), Error> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let params = Params::from_args();
    let options = read_options(&params.config)?;

    let raw = read_input(&params.input)?;
    let siri: Siri = serde_json::from_str(&raw).context("invalid SIRI document")?;
    let service_delivery = siri
        .service_delivery
        .ok_or_else(|| anyhow!("the document has no ServiceDelivery"))?;

    let entities = convert::convert(&service_delivery, &options);
    info!("{} entities converted", entities.len());

    if params.by_datasource {
        std::fs::create_dir_all(&params.output)
            .with_context(|| format!("impossible to create {}", params.output.display()))?;
        for (datasource, feed) in feed::feed_messages_by_datasource(&entities) {
            let name = if datasource.is_empty() {
                "default"
            } else {
                datasource.as_str()
            };
            let path = params
                .output
                .join(format!("{}.{}", name, params.format.extension()));
            std::fs::write(&path, encode(&feed, params.format)?)
                .with_context(|| format!("impossible to write {}", path.display()))?;
            info!("{} entities written to {}", feed.entity.len(), path.display());
        }
    } else {
        let feed = feed::feed_message(&entities);
        std::fs::write(&params.output, encode(&feed, params.format)?)
            .with_context(|| format!("impossible to write {}", params.output.display()))?;
        info!(
            "{} entities written to {}",
            feed.entity.len(),
            params.output.display()
        );
    }
    Ok(())
}
