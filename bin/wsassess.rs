/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;
use windsolar::spatial::{AttributeMode, Extreme, SynergyMode};
use windsolar::{Assessment, AssessmentOptions, MemorySource, Result};

/// Assesses the complementarity of wind and solar energy over a region
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// The JSON5 options file. Defaults are used if none is given
    #[clap(short = 'c', long)]
    options: Option<String>,

    /// The JSON file with the wind speeds at reference height, in m/s
    #[clap(short = 'w', long)]
    wind: String,

    /// The JSON file with the solar irradiance, in W/m2
    #[clap(short = 's', long)]
    solar: String,

    /// The JSON file with the ambient temperature, in K. Only needed
    /// by the temperature-corrected PV model
    #[clap(short = 't', long)]
    temperature: Option<String>,

    /// Specifies the path to which to write the results.
    /// If none is given, STDOUT is used
    #[clap(short = 'o', long)]
    output: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reports everything about a single site
    Site {
        /// The site, counted from 1
        site: usize,
    },

    /// Calculates one value per site (e.g., `wind.mean-yearly` or `blend.matching-ratio`)
    Attribute {
        /// The attribute, written as `resource.metric`
        mode: AttributeMode,
    },

    /// Calculates the synergy between sites (`wind-wind`, `solar-solar`,
    /// `wind-solar` or `solar-wind`)
    Synergy {
        /// The resources compared
        mode: SynergyMode,

        /// Compares all sites against this one, instead of every pair of sites
        #[clap(short = 'r', long)]
        reference: Option<usize>,
    },

    /// Clusters sites by their synergy, using PCA and k-means
    #[cfg(feature = "clustering")]
    Cluster {
        /// The resources compared
        mode: SynergyMode,

        /// The number of principal components kept
        #[clap(long, default_value_t = 3)]
        components: usize,

        /// The number of clusters
        #[clap(long, default_value_t = 6)]
        clusters: usize,
    },
}

#[derive(Serialize)]
struct AttributeReport {
    name: String,
    values: Vec<windsolar::Float>,
    max: Option<Extreme>,
    min: Option<Extreme>,
}

fn write_json<T: Serialize>(value: &T, output: &Option<String>) -> Result<()> {
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer_pretty(file, value).map_err(std::io::Error::from)?;
        }
        None => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), value).map_err(std::io::Error::from)?;
            println!();
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let options = match &cli.options {
        Some(path) => AssessmentOptions::from_file(path)?,
        None => AssessmentOptions::from_str("{}")?,
    };
    let wind = MemorySource::from_file(&cli.wind)?;
    let solar = MemorySource::from_file(&cli.solar)?;
    let temperature = match &cli.temperature {
        Some(path) => Some(MemorySource::from_file(path)?),
        None => None,
    };
    let assessment = Assessment::from_sources(options, &wind, &solar, temperature.as_ref())?;
    tracing::info!(
        "loaded {} sites from {} to {}",
        assessment.n_sites(),
        assessment.years().start,
        assessment.years().end
    );

    match &cli.command {
        Command::Site { site } => write_json(&assessment.site_report(*site)?, &cli.output),
        Command::Attribute { mode } => {
            let vector = assessment.attribute_vector(*mode)?;
            let report = AttributeReport {
                max: vector.max(),
                min: vector.min(),
                name: vector.name,
                values: vector.values,
            };
            write_json(&report, &cli.output)
        }
        Command::Synergy { mode, reference } => {
            write_json(&assessment.synergy_matrix(*mode, *reference)?, &cli.output)
        }
        #[cfg(feature = "clustering")]
        Command::Cluster {
            mode,
            components,
            clusters,
        } => {
            let analysis = windsolar::cluster::pca_kmeans::PcaKMeans::default();
            let clustering = assessment.cluster(&analysis, *mode, *components, *clusters)?;
            write_json(&clustering, &cli.output)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
