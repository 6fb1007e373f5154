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

//! Complementarity of wind and solar at a single site: how much the
//! variability of a hybrid plant drops when the two resources are blended.

use crate::describe::{coefficient_of_variation, cumulative_distribution, pearson, CdfPoint};
use crate::single_site::{AnnualStats, HourlyStats, RampStats, HALF_POWER};
use crate::{CapacityFactor, Error, Float, ResourceSeries, Result};
use serde::{Deserialize, Serialize};

/// The blend search evaluates `BLEND_STEPS + 1` ratios, from 0 to 1
pub const BLEND_STEPS: usize = 50;

/// Output distributions are evaluated at `CDF_STEPS + 1` capacity factors, from 0 to 1
pub const CDF_STEPS: usize = 20;

/// Blends two series as `ratio * wind + (1 - ratio) * solar`.
///
/// The arithmetic is arranged so that blending a series with itself
/// returns exactly the same series, whatever the ratio.
pub fn blend(wind: &[Float], solar: &[Float], ratio: Float) -> Result<Vec<Float>> {
    if wind.len() != solar.len() {
        return Err(Error::ShapeMismatch(format!(
            "cannot blend a wind series of {} values with a solar series of {} values",
            wind.len(),
            solar.len()
        )));
    }
    Ok(wind
        .iter()
        .zip(solar.iter())
        .map(|(w, s)| s + ratio * (w - s))
        .collect())
}

/// One of the candidates evaluated by the blend search
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendPoint {
    /// The fraction of the portfolio allocated to wind
    pub ratio: Float,

    /// The hourly coefficient of variation of the blend
    pub coefficient_of_variation: Float,
}

/// The ratios tested by the blend search: 0.00, 0.02, ..., 1.00
pub fn blend_ratios() -> impl Iterator<Item = Float> {
    (0..=BLEND_STEPS).map(|i| i as Float / BLEND_STEPS as Float)
}

/// Evaluates the coefficient of variation of every candidate blend
pub fn blend_curve(wind: &[Float], solar: &[Float]) -> Result<Vec<BlendPoint>> {
    blend_ratios()
        .map(|ratio| {
            let cv = coefficient_of_variation(&blend(wind, solar, ratio)?)?;
            Ok(BlendPoint {
                ratio,
                coefficient_of_variation: cv,
            })
        })
        .collect()
}

/// The outcome of the blend search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendSearch {
    /// The wind share that minimizes the variability of the blend
    pub ratio: Float,

    /// The coefficient of variation at `ratio`
    pub coefficient_of_variation: Float,

    /// Every candidate, in ascending ratio
    pub curve: Vec<BlendPoint>,

    /// The blended series at `ratio`
    #[serde(skip)]
    pub blended: Vec<Float>,
}

/// Searches the wind share (in steps of 0.02) whose blend has the lowest
/// hourly coefficient of variation. When several ratios tie, the
/// lowest one wins.
///
/// Fails if any of the candidate blends has a zero mean.
pub fn find_optimal_blend(wind: &[Float], solar: &[Float]) -> Result<BlendSearch> {
    let curve = blend_curve(wind, solar)?;
    let mut best = curve[0];
    for point in curve.iter().skip(1) {
        if point.coefficient_of_variation < best.coefficient_of_variation {
            best = *point;
        }
    }
    tracing::debug!(
        "optimal blend is {:.2} wind (CV = {:.4})",
        best.ratio,
        best.coefficient_of_variation
    );
    Ok(BlendSearch {
        ratio: best.ratio,
        coefficient_of_variation: best.coefficient_of_variation,
        blended: blend(wind, solar, best.ratio)?,
        curve,
    })
}

/// How much blending reduces the variability, relative to the
/// ratio-weighted variability of each resource on its own:
/// `1 - cv_blend / (ratio * cv_wind + (1 - ratio) * cv_solar)`.
///
/// Positive values mean that blending helps.
pub fn improving_coefficient(cv_blend: Float, cv_wind: Float, cv_solar: Float, ratio: Float) -> Result<Float> {
    let reference = ratio * cv_wind + (1.0 - ratio) * cv_solar;
    if reference == 0.0 {
        return Err(Error::DegenerateSeries(
            "the weighted variability of wind and solar is zero".to_string(),
        ));
    }
    Ok(1.0 - cv_blend / reference)
}

/// `1 - r / 2`, where `r` is the correlation between the wind and solar
/// series of a site. Goes from 0.5 (perfectly correlated) to 1.5
/// (perfectly anti-correlated).
pub fn local_synergy_coefficient(wind: &[Float], solar: &[Float]) -> Result<Float> {
    Ok(1.0 - 0.5 * pearson(wind, solar)?)
}

/// Cumulative distributions of the hourly output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputDistribution {
    /// Wind on its own
    pub wind: Vec<CdfPoint>,

    /// Solar on its own
    pub solar: Vec<CdfPoint>,

    /// The optimal blend
    pub blend: Vec<CdfPoint>,
}

/// The complementarity of wind and solar at one site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSynergy {
    /// The 1-based site ordinal
    pub site: usize,

    /// The optimal blend search
    pub search: BlendSearch,

    /// Yearly variability of the optimal blend
    pub annual: AnnualStats,

    /// Hourly variability of the optimal blend
    pub hourly: HourlyStats,

    /// How often the optimal blend produces more than half its capacity
    pub half_power_probability: Float,

    /// The ramps of the optimal blend
    pub ramp: RampStats,

    /// See [`improving_coefficient`]
    pub improving_coefficient: Float,

    /// See [`local_synergy_coefficient`]
    pub local_synergy: Float,

    /// The distributions of wind, solar and blended output
    pub output: OutputDistribution,
}

/// Calculates the complementarity of wind and solar capacity factors
/// at a site (1-based). Both series must be keyed identically.
pub fn site_synergy(
    wind: &ResourceSeries<CapacityFactor>,
    solar: &ResourceSeries<CapacityFactor>,
    site: usize,
) -> Result<SiteSynergy> {
    wind.check_same_shape(solar)?;
    let years = wind.years();
    let w = wind.decade_view(site)?;
    let s = solar.decade_view(site)?;

    let search = find_optimal_blend(w, s)?;
    let blended = &search.blended;

    let improving = improving_coefficient(
        search.coefficient_of_variation,
        coefficient_of_variation(w)?,
        coefficient_of_variation(s)?,
        search.ratio,
    )?;

    Ok(SiteSynergy {
        site,
        annual: AnnualStats::from_row(blended, years)?,
        hourly: HourlyStats::from_samples(blended)?,
        half_power_probability: crate::describe::fraction_above(blended, HALF_POWER)?,
        ramp: RampStats::from_row(blended, years)?,
        improving_coefficient: improving,
        local_synergy: local_synergy_coefficient(w, s)?,
        output: OutputDistribution {
            wind: cumulative_distribution(w, CDF_STEPS)?,
            solar: cumulative_distribution(s, CDF_STEPS)?,
            blend: cumulative_distribution(blended, CDF_STEPS)?,
        },
        search,
    })
}
