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

//! Numerical kernels shared by every statistic in the crate.
//!
//! They all operate on plain slices (i.e., any of the month-, year- or
//! decade-style views of a series) and refuse to divide by zero: an empty
//! series, a ratio over a zero mean or a correlation involving a constant
//! series produce [`Error::DegenerateSeries`].

use crate::{Error, Float, Result};

fn check_not_empty(values: &[Float], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(Error::DegenerateSeries(format!(
            "cannot calculate the {} of an empty series",
            what
        )));
    }
    Ok(())
}

/// Arithmetic mean
pub fn mean(values: &[Float]) -> Result<Float> {
    check_not_empty(values, "mean")?;
    Ok(values.iter().sum::<Float>() / values.len() as Float)
}

/// Population standard deviation (i.e., divided by `n`, not `n - 1`)
pub fn std(values: &[Float]) -> Result<Float> {
    let mu = mean(values)?;
    let var = values.iter().map(|v| (v - mu) * (v - mu)).sum::<Float>() / values.len() as Float;
    Ok(var.sqrt())
}

/// Mean, population standard deviation and coefficient of variation, all at once
pub fn mean_std_cv(values: &[Float]) -> Result<(Float, Float, Float)> {
    let mu = mean(values)?;
    let sigma = std(values)?;
    if mu == 0.0 {
        return Err(Error::DegenerateSeries(
            "the coefficient of variation of a series with zero mean is undefined".to_string(),
        ));
    }
    Ok((mu, sigma, sigma / mu))
}

/// Standard deviation over mean. Fails when the mean is zero.
pub fn coefficient_of_variation(values: &[Float]) -> Result<Float> {
    let (_, _, cv) = mean_std_cv(values)?;
    Ok(cv)
}

/// Pearson's correlation coefficient between two series of equal length.
///
/// Fails if the lengths differ, or if either series is constant.
pub fn pearson(a: &[Float], b: &[Float]) -> Result<Float> {
    if a.len() != b.len() {
        return Err(Error::ShapeMismatch(format!(
            "cannot correlate series of {} and {} values",
            a.len(),
            b.len()
        )));
    }
    let mean_a = mean(a)?;
    let mean_b = mean(b)?;
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return Err(Error::DegenerateSeries(
            "the correlation with a constant series is undefined".to_string(),
        ));
    }
    Ok(cov / (var_a.sqrt() * var_b.sqrt()))
}

/// `values[t] - values[t - 1]` for every consecutive pair, so the result
/// has one element less than `values` (or none, if `values` is empty)
pub fn first_difference(values: &[Float]) -> Vec<Float> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// The fraction of the values that are strictly greater than `threshold`
pub fn fraction_above(values: &[Float], threshold: Float) -> Result<Float> {
    check_not_empty(values, "exceedance fraction")?;
    let n = values.iter().filter(|v| **v > threshold).count();
    Ok(n as Float / values.len() as Float)
}

/// A point of a cumulative distribution
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CdfPoint {
    /// The value
    pub x: Float,

    /// The percentage (0 to 100) of the samples that are lower than or equal to `x`
    pub percent: Float,
}

/// Evaluates the empirical cumulative distribution of `values` over
/// `n_steps + 1` evenly spaced points between `0` and `1`, both included.
pub fn cumulative_distribution(values: &[Float], n_steps: usize) -> Result<Vec<CdfPoint>> {
    check_not_empty(values, "cumulative distribution")?;
    if n_steps == 0 {
        return Err(Error::IndexOutOfRange(
            "a cumulative distribution needs at least one step".to_string(),
        ));
    }
    let n = values.len() as Float;
    let ret = (0..=n_steps)
        .map(|i| {
            let x = i as Float / n_steps as Float;
            let count = values.iter().filter(|v| **v <= x).count();
            CdfPoint {
                x,
                percent: 100. * count as Float / n,
            }
        })
        .collect();
    Ok(ret)
}

/// The position and value of the largest element, or `None` if
/// `values` is empty. The first one wins ties.
pub fn argmax(values: &[Float]) -> Option<(usize, Float)> {
    let mut ret: Option<(usize, Float)> = None;
    for (i, v) in values.iter().enumerate() {
        match ret {
            Some((_, best)) if *v <= best => {}
            _ => ret = Some((i, *v)),
        }
    }
    ret
}

/// The position and value of the smallest element, or `None` if
/// `values` is empty. The first one wins ties.
pub fn argmin(values: &[Float]) -> Option<(usize, Float)> {
    let mut ret: Option<(usize, Float)> = None;
    for (i, v) in values.iter().enumerate() {
        match ret {
            Some((_, best)) if *v >= best => {}
            _ => ret = Some((i, *v)),
        }
    }
    ret
}
