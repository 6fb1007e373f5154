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

use crate::describe::{argmax, argmin, fraction_above, first_difference, mean, mean_std_cv};
use crate::{CapacityFactor, Date, Error, Float, Matrix, Month, ResourceSeries, Result, YearRange};
use calendar::{days_in_year, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Capacity factors above this are considered "high output"
pub const HALF_POWER: Float = 0.5;

/// The z-score of a two-sided 95% confidence interval
const Z_95: Float = 1.96;

/// The first and last days of each month used for building diurnal
/// profiles. This leaves out the first day (which has no previous day
/// to borrow hours from) and makes every month equally long.
const PROFILE_DAYS: std::ops::RangeInclusive<usize> = 2..=28;

/// Variability of the yearly production
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualStats {
    /// The sum of the hourly capacity factors of each year, earliest first
    pub yearly_totals: Vec<Float>,

    /// The mean of `yearly_totals` (i.e., the sum over the whole row
    /// divided by the number of years)
    pub mean: Float,

    /// The population standard deviation of `yearly_totals`
    pub std: Float,

    /// `std / mean`
    pub coefficient_of_variation: Float,
}

impl AnnualStats {
    /// Calculates the statistics of a decade-style row covering `years`
    pub fn from_row(row: &[Float], years: YearRange) -> Result<Self> {
        check_row(row, years)?;
        let mut yearly_totals = Vec::with_capacity(years.len());
        let mut ini = 0;
        for year in years {
            let fin = ini + days_in_year(year) * HOURS_PER_DAY;
            yearly_totals.push(row[ini..fin].iter().sum());
            ini = fin;
        }
        let (mean, std, coefficient_of_variation) = mean_std_cv(&yearly_totals)?;
        Ok(Self {
            yearly_totals,
            mean,
            std,
            coefficient_of_variation,
        })
    }
}

/// Variability of the hourly production
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyStats {
    /// Mean capacity factor
    pub mean: Float,

    /// Population standard deviation of the capacity factor
    pub std: Float,

    /// `std / mean`
    pub coefficient_of_variation: Float,
}

impl HourlyStats {
    /// Calculates the statistics of some hourly samples
    pub fn from_samples(values: &[Float]) -> Result<Self> {
        let (mean, std, coefficient_of_variation) = mean_std_cv(values)?;
        Ok(Self {
            mean,
            std,
            coefficient_of_variation,
        })
    }
}

/// The distribution of the hour-to-hour change of capacity factor
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampStats {
    /// Mean ramp
    pub mean: Float,

    /// Population standard deviation of the ramps
    pub std: Float,

    /// Largest ramp
    pub max: Float,

    /// Smallest (i.e., steepest downwards) ramp
    pub min: Float,

    /// `mean - 1.96 std` and `mean + 1.96 std`
    pub confidence_interval: (Float, Float),

    /// Position of the largest ramp within the ramps
    pub max_index: usize,

    /// Position of the smallest ramp within the ramps
    pub min_index: usize,

    /// The hour at which the largest ramp ends, if the samples were a
    /// decade-style row
    pub max_at: Option<Date>,

    /// The hour at which the smallest ramp ends, if the samples were a
    /// decade-style row
    pub min_at: Option<Date>,
}

impl RampStats {
    /// Calculates the ramps of some consecutive hourly samples. At least
    /// two samples are needed.
    pub fn from_samples(values: &[Float]) -> Result<Self> {
        let ramps = first_difference(values);
        let mean = mean(&ramps)?;
        let std = crate::describe::std(&ramps)?;
        // neither can fail, ramps is not empty
        let (max_index, max) = argmax(&ramps).unwrap_or((0, mean));
        let (min_index, min) = argmin(&ramps).unwrap_or((0, mean));
        Ok(Self {
            mean,
            std,
            max,
            min,
            confidence_interval: (mean - Z_95 * std, mean + Z_95 * std),
            max_index,
            min_index,
            max_at: None,
            min_at: None,
        })
    }

    /// Calculates the ramps of a decade-style row covering `years`, also
    /// reporting when the extreme ramps happen.
    pub fn from_row(row: &[Float], years: YearRange) -> Result<Self> {
        check_row(row, years)?;
        let mut ret = Self::from_samples(row)?;
        // Ramp i goes from sample i to sample i + 1
        ret.max_at = years.date_at(ret.max_index + 1);
        ret.min_at = years.date_at(ret.min_index + 1);
        Ok(ret)
    }
}

/// Everything that is known about a single resource at a single site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteStatistics {
    /// Yearly variability
    pub annual: AnnualStats,

    /// Hourly variability
    pub hourly: HourlyStats,

    /// The fraction of hours with a capacity factor over one half
    pub half_power_probability: Float,

    /// Ramps
    pub ramp: RampStats,
}

impl SiteStatistics {
    /// Calculates the statistics of a decade-style row covering `years`
    pub fn from_row(row: &[Float], years: YearRange) -> Result<Self> {
        Ok(Self {
            annual: AnnualStats::from_row(row, years)?,
            hourly: HourlyStats::from_samples(row)?,
            half_power_probability: fraction_above(row, HALF_POWER)?,
            ramp: RampStats::from_row(row, years)?,
        })
    }
}

/// Checks that a row has exactly one value per hour in `years`
fn check_row(row: &[Float], years: YearRange) -> Result<()> {
    if row.len() != years.hours() {
        return Err(Error::ShapeMismatch(format!(
            "a row covering {} to {} needs {} values, found {}",
            years.start,
            years.end,
            years.hours(),
            row.len()
        )));
    }
    Ok(())
}

/// Per-year totals and their variability at a site (1-based)
pub fn annual_stats(series: &ResourceSeries<CapacityFactor>, site: usize) -> Result<AnnualStats> {
    AnnualStats::from_row(series.decade_view(site)?, series.years())
}

/// Mean, standard deviation and coefficient of variation over every hour
pub fn hourly_stats(series: &ResourceSeries<CapacityFactor>, site: usize) -> Result<HourlyStats> {
    HourlyStats::from_samples(series.decade_view(site)?)
}

/// The fraction of the hours with a capacity factor strictly above one half
pub fn half_power_probability(series: &ResourceSeries<CapacityFactor>, site: usize) -> Result<Float> {
    fraction_above(series.decade_view(site)?, HALF_POWER)
}

/// The distribution of hour-to-hour changes, including those that
/// cross the boundaries of months and years.
pub fn ramp_rate(series: &ResourceSeries<CapacityFactor>, site: usize) -> Result<RampStats> {
    RampStats::from_row(series.decade_view(site)?, series.years())
}

/// All the single-site statistics of a site
pub fn site_statistics(series: &ResourceSeries<CapacityFactor>, site: usize) -> Result<SiteStatistics> {
    SiteStatistics::from_row(series.decade_view(site)?, series.years())
}

/// How production changes over the months of the year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyVariation {
    /// The sum of the capacity factors of each month (rows, January first)
    /// and year (columns, earliest first)
    pub totals: Matrix,

    /// The mean of each month over all years
    pub mean: Vec<Float>,
}

/// Monthly totals of a site for every year, and their means
pub fn monthly_variation(
    series: &ResourceSeries<CapacityFactor>,
    site: usize,
) -> Result<MonthlyVariation> {
    let years = series.years();
    let mut data = Vec::with_capacity(12 * years.len());
    let mut mean = Vec::with_capacity(12);
    for month in Month::ALL {
        let mut acc = 0.0;
        for year in years {
            let total: Float = series.month_view(site, year, month)?.iter().sum();
            acc += total;
            data.push(total);
        }
        mean.push(acc / years.len() as Float);
    }
    let totals = Matrix::from_data(12, years.len(), data).map_err(Error::ShapeMismatch)?;
    Ok(MonthlyVariation { totals, mean })
}

/// The mean 24-hour profile of one month, averaged over days 2 to 28
/// and over all years.
///
/// Records are usually kept in UTC, so the profile can be shifted to
/// local time: position `h` of the result holds the mean of the
/// hours `h - shift_hours` (counted within each day, borrowing hours from
/// the previous day when negative).
pub fn diurnal_profile(
    series: &ResourceSeries<CapacityFactor>,
    site: usize,
    month: Month,
    shift_hours: usize,
) -> Result<Vec<Float>> {
    if shift_hours >= HOURS_PER_DAY {
        return Err(Error::IndexOutOfRange(format!(
            "cannot shift a diurnal profile by {} hours",
            shift_hours
        )));
    }
    let years = series.years();
    let mut profile = vec![0.0; HOURS_PER_DAY];
    let mut n = 0;
    for year in years {
        let values = series.month_view(site, year, month)?;
        for day in PROFILE_DAYS {
            let ini = (day - 1) * HOURS_PER_DAY - shift_hours;
            for (acc, v) in profile.iter_mut().zip(&values[ini..ini + HOURS_PER_DAY]) {
                *acc += v;
            }
            n += 1;
        }
    }
    profile.iter_mut().for_each(|v| *v /= n as Float);
    Ok(profile)
}
