//! WCS command line client.
//!
//! Builds OGC WCS 2.0 / EO-WCS KVP request URLs and parses WCS response
//! documents into JSON. Fetching the URLs is left to curl and friends.

mod config;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

use eowcs_protocol::{describe_eo_coverage_set_url, Containment, DescribeEoCoverageSetOptions};
use wcs_common::BoundingBox;
use wcs_protocol::{
    describe_coverage_url, get_capabilities_url, get_coverage_url, GetCapabilitiesOptions,
    GetCoverageOptions, ParseOptions, WcsParser,
};

use config::CliConfig;

#[derive(Parser, Debug)]
#[command(name = "wcs-cli")]
#[command(about = "OGC WCS 2.0 / EO-WCS request builder and response parser")]
struct Cli {
    /// YAML file with a base URL, default subset CRS, format and extra parameters
    #[arg(short, long, env = "WCS_CLI_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Flags shared by all URL builders.
#[derive(Args, Debug, Clone)]
struct Endpoint {
    /// Service base URL (falls back to `base_url` from the config file)
    #[arg(long)]
    url: Option<String>,

    /// Vendor parameter appended to the query, `key=value` (repeatable)
    #[arg(long = "extra", value_parser = parse_key_value)]
    extra: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a GetCapabilities URL
    CapabilitiesUrl {
        #[command(flatten)]
        endpoint: Endpoint,

        #[arg(long)]
        updatesequence: Option<String>,

        /// Comma separated section names
        #[arg(long, value_delimiter = ',')]
        sections: Option<Vec<String>>,
    },

    /// Print a DescribeCoverage URL
    DescribeCoverageUrl {
        #[command(flatten)]
        endpoint: Endpoint,

        /// One or more coverage ids
        #[arg(required = true, value_delimiter = ',')]
        coverage_ids: Vec<String>,
    },

    /// Print a GetCoverage URL
    GetCoverageUrl {
        #[command(flatten)]
        endpoint: Endpoint,

        coverage_id: String,

        #[arg(long)]
        format: Option<String>,

        /// minx,miny,maxx,maxy
        #[arg(long, value_parser = parse_bbox)]
        bbox: Option<BoundingBox>,

        /// min,max
        #[arg(long, value_parser = parse_pair::<f64>)]
        subset_x: Option<[f64; 2]>,

        /// min,max
        #[arg(long, value_parser = parse_pair::<f64>)]
        subset_y: Option<[f64; 2]>,

        #[arg(long)]
        subset_crs: Option<String>,

        /// Comma separated band names or indices
        #[arg(long, value_delimiter = ',')]
        range_subset: Option<Vec<String>>,

        /// width,height
        #[arg(long, value_parser = parse_pair::<u32>)]
        size: Option<[u32; 2]>,

        #[arg(long)]
        size_x: Option<u32>,

        #[arg(long)]
        size_y: Option<u32>,

        /// x,y; accepted for compatibility, not sent on the wire
        #[arg(long, value_parser = parse_pair::<f64>)]
        resolution: Option<[f64; 2]>,

        #[arg(long)]
        resolution_x: Option<f64>,

        #[arg(long)]
        resolution_y: Option<f64>,

        #[arg(long)]
        interpolation: Option<String>,

        #[arg(long)]
        output_crs: Option<String>,

        /// Request multipart/mixed output including the coverage metadata
        #[arg(long)]
        multipart: bool,
    },

    /// Print a DescribeEOCoverageSet URL
    DescribeEoCoverageSetUrl {
        #[command(flatten)]
        endpoint: Endpoint,

        eoid: String,

        /// minx,miny,maxx,maxy
        #[arg(long, value_parser = parse_bbox)]
        bbox: Option<BoundingBox>,

        /// min,max
        #[arg(long, value_parser = parse_pair::<f64>)]
        subset_x: Option<[f64; 2]>,

        /// min,max
        #[arg(long, value_parser = parse_pair::<f64>)]
        subset_y: Option<[f64; 2]>,

        #[arg(long)]
        subset_crs: Option<String>,

        /// begin,end
        #[arg(long, value_parser = parse_pair::<String>)]
        subset_time: Option<[String; 2]>,

        /// overlaps or contains
        #[arg(long, value_parser = Containment::from_str)]
        containment: Option<Containment>,

        #[arg(long)]
        count: Option<u32>,

        /// Comma separated section names
        #[arg(long, value_delimiter = ',')]
        sections: Option<Vec<String>>,
    },

    /// Parse a response document and print it as JSON
    Parse {
        /// Input file, `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Only install the core WCS parsers
        #[arg(long)]
        core_only: bool,

        /// Fail on an exception report instead of printing it
        #[arg(long)]
        throw_on_exception: bool,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let config = CliConfig::load(cli.config.as_deref())?;
    let output = run(cli.command, &config)?;
    println!("{}", output);
    Ok(())
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(command: Command, config: &CliConfig) -> Result<String> {
    let url = match command {
        Command::CapabilitiesUrl {
            endpoint,
            updatesequence,
            sections,
        } => get_capabilities_url(
            &config.url(endpoint.url.as_deref()),
            &GetCapabilitiesOptions {
                updatesequence,
                sections,
            },
            &config.extra_params(&endpoint.extra),
        )?,

        Command::DescribeCoverageUrl {
            endpoint,
            coverage_ids,
        } => describe_coverage_url(
            &config.url(endpoint.url.as_deref()),
            coverage_ids,
            &config.extra_params(&endpoint.extra),
        )?,

        Command::GetCoverageUrl {
            endpoint,
            coverage_id,
            format,
            bbox,
            subset_x,
            subset_y,
            subset_crs,
            range_subset,
            size,
            size_x,
            size_y,
            resolution,
            resolution_x,
            resolution_y,
            interpolation,
            output_crs,
            multipart,
        } => {
            let has_subset = bbox.is_some() || subset_x.is_some() || subset_y.is_some();
            let options = GetCoverageOptions {
                format: format.or_else(|| config.format.clone()),
                bbox,
                subset_x,
                subset_y,
                subset_crs: subset_crs.or_else(|| {
                    has_subset.then(|| config.subset_crs.clone()).flatten()
                }),
                range_subset,
                size,
                size_x,
                size_y,
                resolution,
                resolution_x,
                resolution_y,
                interpolation,
                output_crs,
                multipart,
            };
            get_coverage_url(
                &config.url(endpoint.url.as_deref()),
                &coverage_id,
                &options,
                &config.extra_params(&endpoint.extra),
            )?
        }

        Command::DescribeEoCoverageSetUrl {
            endpoint,
            eoid,
            bbox,
            subset_x,
            subset_y,
            subset_crs,
            subset_time,
            containment,
            count,
            sections,
        } => {
            let options = DescribeEoCoverageSetOptions {
                bbox,
                subset_x,
                subset_y,
                subset_crs: subset_crs.or_else(|| config.subset_crs.clone()),
                subset_time,
                containment,
                count,
                sections,
            };
            describe_eo_coverage_set_url(
                &config.url(endpoint.url.as_deref()),
                &eoid,
                &options,
                &config.extra_params(&endpoint.extra),
            )?
        }

        Command::Parse {
            input,
            core_only,
            throw_on_exception,
            compact,
        } => {
            let xml = read_input(&input)?;
            return parse_document(&xml, core_only, throw_on_exception, compact);
        }
    };

    debug!(url = %url, "Built request URL");
    Ok(url)
}

fn parse_document(
    xml: &str,
    core_only: bool,
    throw_on_exception: bool,
    compact: bool,
) -> Result<String> {
    let parser = if core_only {
        WcsParser::new()
    } else {
        eowcs_protocol::parser()
    };
    let options = ParseOptions { throw_on_exception };

    let parsed = parser
        .parse_with(xml, options)
        .context("Failed to parse WCS response")?;
    info!(kind = parsed.kind(), "Parsed response");

    let json = if compact {
        serde_json::to_string(&parsed)?
    } else {
        serde_json::to_string_pretty(&parsed)?
    };
    Ok(json)
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        io::read_to_string(io::stdin()).context("Failed to read response from stdin")
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("Failed to read response from {}", input))
    }
}

fn parse_key_value(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => bail!("Expected key=value, got '{}'", s),
    }
}

fn parse_bbox(s: &str) -> Result<BoundingBox> {
    Ok(BoundingBox::from_kvp_string(s)?)
}

fn parse_pair<T>(s: &str) -> Result<[T; 2]>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match s.split_once(',') {
        Some((a, b)) => Ok([a.trim().parse()?, b.trim().parse()?]),
        None => bail!("Expected two comma separated values, got '{}'", s),
    }
}
