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

use crate::error::{Error, Result};
use crate::quantity::Quantity;
use crate::series::{checked_years, ResourceSeries};
use crate::site::Site;
use crate::Float;
use calendar::{Month, YearRange, HOURS_PER_DAY};
use std::marker::PhantomData;

/// Collects `[days x 24]` blocks, one (site, year, month) at a
/// time and in any order, and then assembles them into a
/// [`ResourceSeries`].
///
/// Every block is checked against the calendar when inserted, and
/// [`SeriesBuilder::build`] fails if any block is missing. Nothing is
/// ever padded or truncated.
#[derive(Debug, Clone)]
pub struct SeriesBuilder<Q: Quantity> {
    years: YearRange,
    sites: Vec<Site>,

    /// Flattened blocks, indexed by `(site * n_years + year) * 12 + month`
    blocks: Vec<Option<Vec<Float>>>,

    quantity: PhantomData<Q>,
}

impl<Q: Quantity> SeriesBuilder<Q> {
    /// Creates an empty builder for `sites` over `years`. Fails if
    /// `years` ends before it starts.
    pub fn new(years: YearRange, sites: Vec<Site>) -> Result<Self> {
        let years = checked_years(years)?;
        let n = sites.len() * years.len() * 12;
        Ok(Self {
            years,
            sites,
            blocks: vec![None; n],
            quantity: PhantomData,
        })
    }

    fn block_index(&self, site: usize, year: i32, month: Month) -> Result<usize> {
        if site == 0 || site > self.sites.len() {
            return Err(Error::IndexOutOfRange(format!(
                "site {} does not exist (there are {} sites, counted from 1)",
                site,
                self.sites.len()
            )));
        }
        let year_i = self.years.offset(year).ok_or_else(|| {
            Error::IndexOutOfRange(format!(
                "year {} is not between {} and {}",
                year, self.years.start, self.years.end
            ))
        })?;
        Ok(((site - 1) * self.years.len() + year_i) * 12 + month.index())
    }

    /// Adds the records of one month of one site. `days` must have as many
    /// rows as the month has days on that year, and each row must hold 24 values.
    ///
    /// Inserting the same block twice replaces the first one.
    pub fn insert(&mut self, site: usize, year: i32, month: Month, days: &[Vec<Float>]) -> Result<()> {
        let i = self.block_index(site, year, month)?;
        let n_days = month.days_in(year);
        if days.len() != n_days {
            return Err(Error::ShapeMismatch(format!(
                "{} of site {} for {} {} has {} days, but that month has {}",
                Q::NAME,
                site,
                month,
                year,
                days.len(),
                n_days
            )));
        }
        let mut block = Vec::with_capacity(n_days * HOURS_PER_DAY);
        for (nday, day) in days.iter().enumerate() {
            if day.len() != HOURS_PER_DAY {
                return Err(Error::ShapeMismatch(format!(
                    "{} of site {} for {} {}, day {}, has {} hourly values instead of {}",
                    Q::NAME,
                    site,
                    month,
                    year,
                    nday + 1,
                    day.len(),
                    HOURS_PER_DAY
                )));
            }
            block.extend_from_slice(day);
        }
        self.blocks[i] = Some(block);
        Ok(())
    }

    /// Assembles the series. Fails if any (site, year, month) was never inserted.
    pub fn build(self) -> Result<ResourceSeries<Q>> {
        let n_years = self.years.len();
        let mut rows = Vec::with_capacity(self.sites.len());
        let mut blocks = self.blocks.into_iter();
        for site in 1..=self.sites.len() {
            let mut row = Vec::with_capacity(self.years.hours());
            for year_i in 0..n_years {
                for month in Month::ALL {
                    match blocks.next().flatten() {
                        Some(block) => row.extend(block),
                        None => {
                            return Err(Error::ShapeMismatch(format!(
                                "{} of site {} for {} {} is missing",
                                Q::NAME,
                                site,
                                month,
                                self.years.start + year_i as i32
                            )))
                        }
                    }
                }
            }
            rows.push(row);
        }
        tracing::info!(
            "assembled {} records of {} sites, {} to {}",
            Q::NAME,
            self.sites.len(),
            self.years.start,
            self.years.end
        );
        ResourceSeries::from_rows(self.years, self.sites, rows)
    }
}
