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

//! Comparisons across the sites of a region: one value per site for a
//! chosen metric ([`AttributeVector`]) and correlation-based synergy between
//! pairs of sites ([`SynergyMatrix`]).

use crate::describe::{argmax, argmin, coefficient_of_variation, pearson};
use crate::single_site::{AnnualStats, HourlyStats};
use crate::synergy::{find_optimal_blend, improving_coefficient, local_synergy_coefficient};
use crate::{CapacityFactor, Error, Float, Matrix, ResourceSeries, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which resources are compared when calculating the synergy between
/// two sites. The first resource is read at the row site (or the
/// reference site), the second one at the column site.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SynergyMode {
    /// Wind against wind
    WindWind,

    /// Solar against solar
    SolarSolar,

    /// Wind (row site) against solar (column site)
    WindSolar,

    /// Solar (row site) against wind (column site)
    SolarWind,
}

impl SynergyMode {
    /// All the modes
    pub const ALL: [SynergyMode; 4] = [
        SynergyMode::WindWind,
        SynergyMode::SolarSolar,
        SynergyMode::WindSolar,
        SynergyMode::SolarWind,
    ];

    /// Picks the series read at the row site and the series read at the column site
    pub fn select<'a>(
        &self,
        wind: &'a ResourceSeries<CapacityFactor>,
        solar: &'a ResourceSeries<CapacityFactor>,
    ) -> (
        &'a ResourceSeries<CapacityFactor>,
        &'a ResourceSeries<CapacityFactor>,
    ) {
        match self {
            Self::WindWind => (wind, wind),
            Self::SolarSolar => (solar, solar),
            Self::WindSolar => (wind, solar),
            Self::SolarWind => (solar, wind),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::WindWind => "wind-wind",
            Self::SolarSolar => "solar-solar",
            Self::WindSolar => "wind-solar",
            Self::SolarWind => "solar-wind",
        }
    }
}

impl fmt::Display for SynergyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SynergyMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|m| m.name() == s)
            .copied()
            .ok_or_else(|| {
                format!(
                    "unknown synergy mode '{}'... expected one of wind-wind, solar-solar, wind-solar or solar-wind",
                    s
                )
            })
    }
}

/// `(1 - r) / 2`, where `r` is the correlation between two series.
///
/// Goes from 0 (identical variation) to 1 (perfectly inverse variation).
pub fn pairwise_synergy(a: &[Float], b: &[Float]) -> Result<Float> {
    Ok((1.0 - pearson(a, b)?) / 2.0)
}

/// The site (1-based) with the extreme value of an [`AttributeVector`]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extreme {
    /// The site ordinal
    pub site: usize,

    /// The value
    pub value: Float,
}

/// One value per site, ordered by site ordinal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeVector {
    /// What the values are
    pub name: String,

    /// Value `i` belongs to site `i + 1`
    pub values: Vec<Float>,
}

impl AttributeVector {
    /// The number of sites
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks whether there are no sites
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value of site `site` (1-based)
    pub fn get(&self, site: usize) -> Result<Float> {
        if site == 0 || site > self.values.len() {
            return Err(Error::IndexOutOfRange(format!(
                "site {} does not exist (there are {} sites, counted from 1)",
                site,
                self.values.len()
            )));
        }
        Ok(self.values[site - 1])
    }

    /// The largest value and its site. The lowest ordinal wins ties.
    pub fn max(&self) -> Option<Extreme> {
        argmax(&self.values).map(|(i, value)| Extreme { site: i + 1, value })
    }

    /// The smallest value and its site. The lowest ordinal wins ties.
    pub fn min(&self) -> Option<Extreme> {
        argmin(&self.values).map(|(i, value)| Extreme { site: i + 1, value })
    }

    /// The values as a `1 x N` matrix
    pub fn as_matrix(&self) -> Result<Matrix> {
        Matrix::from_data(1, self.values.len(), self.values.clone()).map_err(Error::ShapeMismatch)
    }
}

/// The synergy between every pair of sites, or between every site and a
/// reference site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynergyMatrix {
    /// The resources compared
    pub mode: SynergyMode,

    /// The reference site (1-based), if any
    pub reference: Option<usize>,

    /// The synergy coefficients, `N x N` (row site `i`, column site `j`, both
    /// counted from 0) or `1 x N` when there is a reference site.
    pub raw: Matrix,

    /// The values handed to downstream consumers. For a full matrix, each
    /// column of `raw` is min-max normalized independently, so it is not on
    /// the same scale as `raw`. For a reference site, it is equal to `raw`.
    pub values: Matrix,
}

/// The synergy between one reference site (1-based) and every site
pub fn synergy_to_site(
    wind: &ResourceSeries<CapacityFactor>,
    solar: &ResourceSeries<CapacityFactor>,
    mode: SynergyMode,
    reference: usize,
) -> Result<AttributeVector> {
    wind.check_same_shape(solar)?;
    let (first, second) = mode.select(wind, solar);
    let reference_row = first.decade_view(reference)?;
    let values = (1..=second.n_sites())
        .map(|site| pairwise_synergy(reference_row, second.decade_view(site)?))
        .collect::<Result<Vec<Float>>>()?;
    Ok(AttributeVector {
        name: format!("{} synergy with site {}", mode, reference),
        values,
    })
}

/// Calculates the synergy coefficients of every pair of sites (when
/// `reference` is `None`) or between one site and all the others.
///
/// The full matrix is also normalized column by column, which requires
/// every column to have some spread (i.e., at least two sites that are
/// not identically correlated).
pub fn synergy_matrix(
    wind: &ResourceSeries<CapacityFactor>,
    solar: &ResourceSeries<CapacityFactor>,
    mode: SynergyMode,
    reference: Option<usize>,
) -> Result<SynergyMatrix> {
    if let Some(reference) = reference {
        let raw = synergy_to_site(wind, solar, mode, reference)?.as_matrix()?;
        tracing::info!("built {} synergy vector of site {}", mode, reference);
        return Ok(SynergyMatrix {
            mode,
            reference: Some(reference),
            values: raw.clone(),
            raw,
        });
    }

    wind.check_same_shape(solar)?;
    let (first, second) = mode.select(wind, solar);
    let n = first.n_sites();
    let mut raw = Matrix::new(0.0, n, n);
    for i in 1..=n {
        let a = first.decade_view(i)?;
        for j in 1..=n {
            let v = pairwise_synergy(a, second.decade_view(j)?)?;
            raw.set(i - 1, j - 1, v).map_err(Error::IndexOutOfRange)?;
        }
    }
    let values = raw.normalize_columns().map_err(Error::DegenerateSeries)?;
    tracing::info!("built {}x{} {} synergy matrix", n, n, mode);
    Ok(SynergyMatrix {
        mode,
        reference: None,
        raw,
        values,
    })
}

/// The capacity factor series an attribute is calculated on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Wind
    Wind,

    /// Solar
    Solar,
}

/// Statistics of a single resource
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SiteMetric {
    /// Mean of the yearly totals
    MeanYearly,

    /// Standard deviation of the hourly values
    StdHourly,

    /// Coefficient of variation of the hourly values
    VariabilityHourly,

    /// Mean of the hourly values
    MeanHourly,
}

/// Statistics of the optimal blend of wind and solar
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMetric {
    /// Mean of the yearly totals of the blend
    MeanYearly,

    /// Coefficient of variation of the hourly values of the blend
    VariabilityHourly,

    /// How much blending reduces variability
    ImprovingCoefficient,

    /// `1 - r / 2` between wind and solar
    LocalSynergy,

    /// The optimal wind share
    MatchingRatio,
}

/// What an [`AttributeVector`] holds
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeMode {
    /// A statistic of wind or solar on their own
    Resource(ResourceKind, SiteMetric),

    /// A statistic of the optimal blend
    Blend(BlendMetric),
}

impl fmt::Display for AttributeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (prefix, metric) = match self {
            Self::Resource(ResourceKind::Wind, m) => ("wind", site_metric_name(*m)),
            Self::Resource(ResourceKind::Solar, m) => ("solar", site_metric_name(*m)),
            Self::Blend(m) => ("blend", blend_metric_name(*m)),
        };
        write!(f, "{}.{}", prefix, metric)
    }
}

fn site_metric_name(m: SiteMetric) -> &'static str {
    match m {
        SiteMetric::MeanYearly => "mean-yearly",
        SiteMetric::StdHourly => "std-hourly",
        SiteMetric::VariabilityHourly => "variability-hourly",
        SiteMetric::MeanHourly => "mean-hourly",
    }
}

fn blend_metric_name(m: BlendMetric) -> &'static str {
    match m {
        BlendMetric::MeanYearly => "mean-yearly",
        BlendMetric::VariabilityHourly => "variability-hourly",
        BlendMetric::ImprovingCoefficient => "improving-coefficient",
        BlendMetric::LocalSynergy => "local-synergy",
        BlendMetric::MatchingRatio => "matching-ratio",
    }
}

impl FromStr for AttributeMode {
    type Err = String;

    /// Parses modes written as `resource.metric` (e.g., `wind.mean-yearly`
    /// or `blend.matching-ratio`)
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let (prefix, metric) = lower
            .split_once('.')
            .ok_or_else(|| format!("attribute mode '{}' should look like 'resource.metric'", s))?;
        let parse_site_metric = || {
            [
                SiteMetric::MeanYearly,
                SiteMetric::StdHourly,
                SiteMetric::VariabilityHourly,
                SiteMetric::MeanHourly,
            ]
            .into_iter()
            .find(|m| site_metric_name(*m) == metric)
            .ok_or_else(|| format!("unknown single-resource metric '{}'", metric))
        };
        match prefix {
            "wind" => Ok(Self::Resource(ResourceKind::Wind, parse_site_metric()?)),
            "solar" => Ok(Self::Resource(ResourceKind::Solar, parse_site_metric()?)),
            "blend" => [
                BlendMetric::MeanYearly,
                BlendMetric::VariabilityHourly,
                BlendMetric::ImprovingCoefficient,
                BlendMetric::LocalSynergy,
                BlendMetric::MatchingRatio,
            ]
            .into_iter()
            .find(|m| blend_metric_name(*m) == metric)
            .map(Self::Blend)
            .ok_or_else(|| format!("unknown blend metric '{}'", metric)),
            _ => Err(format!(
                "unknown resource '{}'... expected wind, solar or blend",
                prefix
            )),
        }
    }
}

/// Calculates a single-resource statistic over a decade-style row
fn site_metric(row: &[Float], years: crate::YearRange, metric: SiteMetric) -> Result<Float> {
    match metric {
        SiteMetric::MeanYearly => Ok(AnnualStats::from_row(row, years)?.mean),
        SiteMetric::StdHourly => crate::describe::std(row),
        SiteMetric::VariabilityHourly => coefficient_of_variation(row),
        SiteMetric::MeanHourly => crate::describe::mean(row),
    }
}

/// Calculates a statistic of the optimal blend of two decade-style rows
fn blend_metric(wind: &[Float], solar: &[Float], years: crate::YearRange, metric: BlendMetric) -> Result<Float> {
    let search = || find_optimal_blend(wind, solar);
    match metric {
        BlendMetric::MeanYearly => Ok(AnnualStats::from_row(&search()?.blended, years)?.mean),
        BlendMetric::VariabilityHourly => {
            Ok(HourlyStats::from_samples(&search()?.blended)?.coefficient_of_variation)
        }
        BlendMetric::ImprovingCoefficient => {
            let search = search()?;
            improving_coefficient(
                search.coefficient_of_variation,
                coefficient_of_variation(wind)?,
                coefficient_of_variation(solar)?,
                search.ratio,
            )
        }
        BlendMetric::MatchingRatio => Ok(search()?.ratio),
        // does not need the blend search
        BlendMetric::LocalSynergy => local_synergy_coefficient(wind, solar),
    }
}

/// Calculates one value per site for the chosen metric, rerunning the
/// blend search at every site when the metric is about blends.
pub fn build_attribute_vector(
    wind: &ResourceSeries<CapacityFactor>,
    solar: &ResourceSeries<CapacityFactor>,
    mode: AttributeMode,
) -> Result<AttributeVector> {
    wind.check_same_shape(solar)?;
    let years = wind.years();
    let mut values = Vec::with_capacity(wind.n_sites());
    for site in 1..=wind.n_sites() {
        let v = match mode {
            AttributeMode::Resource(ResourceKind::Wind, m) => site_metric(wind.decade_view(site)?, years, m)?,
            AttributeMode::Resource(ResourceKind::Solar, m) => site_metric(solar.decade_view(site)?, years, m)?,
            AttributeMode::Blend(m) => blend_metric(wind.decade_view(site)?, solar.decade_view(site)?, years, m)?,
        };
        tracing::debug!("{} of site {} is {}", mode, site, v);
        values.push(v);
    }
    Ok(AttributeVector {
        name: mode.to_string(),
        values,
    })
}
