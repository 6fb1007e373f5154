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
use crate::site::Site;
use crate::Float;
use calendar::{Month, YearRange, HOURS_PER_DAY};
use std::marker::PhantomData;

/// Hourly records of a certain [`Quantity`] for a set of sites over a
/// range of years.
///
/// Each site owns a single chronological row (January to December,
/// earliest year to latest year). The position where every
/// (year, month) starts within that row is computed once, so that
/// month-style, year-style and decade-style views are just slices.
#[derive(Debug, Clone)]
pub struct ResourceSeries<Q: Quantity> {
    /// The years covered by the series
    years: YearRange,

    /// The sites. Site ordinal `i` lives in position `i - 1`.
    sites: Vec<Site>,

    /// Where each (year, month) starts within a row, plus the
    /// length of the row at the end.
    offsets: Vec<usize>,

    /// One chronological row per site
    rows: Vec<Vec<Float>>,

    quantity: PhantomData<Q>,
}

/// Rejects year ranges that end before they start. `YearRange` fields are
/// public, so such ranges can exist without going through `YearRange::new`.
pub(crate) fn checked_years(years: YearRange) -> Result<YearRange> {
    YearRange::new(years.start, years.end).map_err(Error::IndexOutOfRange)
}

/// Calculates where every (year, month) starts within a
/// chronological row covering `years`
fn month_offsets(years: YearRange) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(years.len() * 12 + 1);
    let mut acc = 0;
    for year in years {
        for month in Month::ALL {
            offsets.push(acc);
            acc += month.days_in(year) * HOURS_PER_DAY;
        }
    }
    offsets.push(acc);
    offsets
}

impl<Q: Quantity> ResourceSeries<Q> {
    /// Creates a new series from one chronological row per site.
    ///
    /// Fails if `years` ends before it starts, if the number of rows does not
    /// match the number of sites, or if any row does not cover exactly every
    /// hour in `years`.
    pub fn from_rows(years: YearRange, sites: Vec<Site>, rows: Vec<Vec<Float>>) -> Result<Self> {
        let years = checked_years(years)?;
        if sites.len() != rows.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} series has {} sites but {} rows",
                Q::NAME,
                sites.len(),
                rows.len()
            )));
        }
        let offsets = month_offsets(years);
        let expected = offsets[offsets.len() - 1];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(Error::ShapeMismatch(format!(
                    "{} row of site {} has {} values, but {} to {} has {} hours",
                    Q::NAME,
                    i + 1,
                    row.len(),
                    years.start,
                    years.end,
                    expected
                )));
            }
        }
        Ok(Self {
            years,
            sites,
            offsets,
            rows,
            quantity: PhantomData,
        })
    }

    /// The years covered by the series
    pub fn years(&self) -> YearRange {
        self.years
    }

    /// The number of sites in the series
    pub fn n_sites(&self) -> usize {
        self.sites.len()
    }

    /// All the sites, ordered by ordinal
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    /// The grid location of site `site` (1-based)
    pub fn site(&self, site: usize) -> Result<Site> {
        Ok(self.sites[self.site_index(site)?])
    }

    /// Transforms a 1-based site ordinal into a position within `rows`
    fn site_index(&self, site: usize) -> Result<usize> {
        if site == 0 || site > self.sites.len() {
            return Err(Error::IndexOutOfRange(format!(
                "site {} does not exist (there are {} sites, counted from 1)",
                site,
                self.sites.len()
            )));
        }
        Ok(site - 1)
    }

    /// Transforms a year into its position within the range
    fn year_index(&self, year: i32) -> Result<usize> {
        self.years.offset(year).ok_or_else(|| {
            Error::IndexOutOfRange(format!(
                "year {} is not between {} and {}",
                year, self.years.start, self.years.end
            ))
        })
    }

    /// Borrows the hourly values of one month, day after day
    /// (i.e., the month-style view; `24 x days` values).
    pub fn month_view(&self, site: usize, year: i32, month: Month) -> Result<&[Float]> {
        let row = &self.rows[self.site_index(site)?];
        let i = self.year_index(year)? * 12 + month.index();
        Ok(&row[self.offsets[i]..self.offsets[i + 1]])
    }

    /// Iterates the days of one month, each of them as a slice of 24 hourly values
    /// (i.e., the `[days x 24]` shape the records came in).
    pub fn month_days(
        &self,
        site: usize,
        year: i32,
        month: Month,
    ) -> Result<std::slice::ChunksExact<'_, Float>> {
        Ok(self.month_view(site, year, month)?.chunks_exact(HOURS_PER_DAY))
    }

    /// Borrows the 24 hourly values of a single day (days are counted from 1)
    pub fn day(&self, site: usize, year: i32, month: Month, day: usize) -> Result<&[Float]> {
        let values = self.month_view(site, year, month)?;
        let n_days = values.len() / HOURS_PER_DAY;
        if day == 0 || day > n_days {
            return Err(Error::IndexOutOfRange(format!(
                "day {} does not exist in {} {} (which has {} days)",
                day, month, year, n_days
            )));
        }
        let ini = (day - 1) * HOURS_PER_DAY;
        Ok(&values[ini..ini + HOURS_PER_DAY])
    }

    /// Borrows the hourly values of one year, January to December
    /// (i.e., the year-style view; 8760 or 8784 values).
    pub fn year_view(&self, site: usize, year: i32) -> Result<&[Float]> {
        let row = &self.rows[self.site_index(site)?];
        let i = self.year_index(year)? * 12;
        Ok(&row[self.offsets[i]..self.offsets[i + 12]])
    }

    /// Borrows all the hourly values of a site, earliest year first
    /// (i.e., the decade-style view).
    pub fn decade_view(&self, site: usize) -> Result<&[Float]> {
        Ok(&self.rows[self.site_index(site)?])
    }

    /// Checks that `other` covers the same years and the same number of sites
    pub fn check_same_shape<O: Quantity>(&self, other: &ResourceSeries<O>) -> Result<()> {
        if self.years != other.years || self.sites.len() != other.sites.len() {
            return Err(Error::ShapeMismatch(format!(
                "{} series ({} sites, {} to {}) and {} series ({} sites, {} to {}) are not keyed identically",
                Q::NAME,
                self.sites.len(),
                self.years.start,
                self.years.end,
                O::NAME,
                other.sites.len(),
                other.years.start,
                other.years.end
            )));
        }
        Ok(())
    }

    /// Builds a new series by applying `f` to every hourly value
    pub fn map<R, F>(&self, f: F) -> ResourceSeries<R>
    where
        R: Quantity,
        F: Fn(Float) -> Float,
    {
        ResourceSeries {
            years: self.years,
            sites: self.sites.clone(),
            offsets: self.offsets.clone(),
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|v| f(*v)).collect())
                .collect(),
            quantity: PhantomData,
        }
    }

    /// Builds a new series by applying `f` to every pair of hourly values
    /// of `self` and `other`, which must be keyed identically.
    pub fn zip_map<O, R, F>(&self, other: &ResourceSeries<O>, f: F) -> Result<ResourceSeries<R>>
    where
        O: Quantity,
        R: Quantity,
        F: Fn(Float, Float) -> Float,
    {
        self.check_same_shape(other)?;
        Ok(ResourceSeries {
            years: self.years,
            sites: self.sites.clone(),
            offsets: self.offsets.clone(),
            rows: self
                .rows
                .iter()
                .zip(other.rows.iter())
                .map(|(a, b)| a.iter().zip(b.iter()).map(|(x, y)| f(*x, *y)).collect())
                .collect(),
            quantity: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{CapacityFactor, WindSpeed};

    /// Two sites over 2011-2012, where every value is its own index within the row
    fn indexed() -> Result<ResourceSeries<WindSpeed>> {
        let years = YearRange::new(2011, 2012).map_err(Error::IndexOutOfRange)?;
        let n = years.hours();
        let rows = vec![
            (0..n).map(|i| i as Float).collect(),
            (0..n).map(|i| -(i as Float)).collect(),
        ];
        ResourceSeries::from_rows(years, vec![Site::new(-6, 2), Site::new(-6, 6)], rows)
    }

    #[test]
    fn test_from_rows_checks_lengths() -> Result<()> {
        let years = YearRange::new(2011, 2011).map_err(Error::IndexOutOfRange)?;
        let short = ResourceSeries::<WindSpeed>::from_rows(years, vec![Site::default()], vec![vec![0.; 100]]);
        assert!(matches!(short, Err(Error::ShapeMismatch(_))));

        let missing = ResourceSeries::<WindSpeed>::from_rows(years, vec![Site::default()], vec![]);
        assert!(matches!(missing, Err(Error::ShapeMismatch(_))));
        Ok(())
    }

    #[test]
    fn test_inverted_years() {
        let years = YearRange { start: 2015, end: 2006 };
        let r = ResourceSeries::<CapacityFactor>::from_rows(years, vec![Site::default()], vec![vec![0.; 10]]);
        assert!(matches!(r, Err(Error::IndexOutOfRange(_))));
    }

    #[test]
    fn test_views_are_chronological() -> Result<()> {
        let s = indexed()?;
        assert_eq!(s.n_sites(), 2);
        assert_eq!(s.site(2)?, Site::new(-6, 6));

        let jan = s.month_view(1, 2011, Month::Jan)?;
        assert_eq!(jan.len(), 31 * 24);
        assert_eq!(jan[0], 0.);

        let feb = s.month_view(1, 2012, Month::Feb)?;
        assert_eq!(feb.len(), 29 * 24);
        assert_eq!(feb[0], ((365 + 31) * 24) as Float);

        let y2012 = s.year_view(1, 2012)?;
        assert_eq!(y2012.len(), 8784);
        assert_eq!(y2012[0], 8760.);

        let decade = s.decade_view(2)?;
        assert_eq!(decade.len(), 8760 + 8784);
        assert_eq!(decade[10], -10.);
        Ok(())
    }

    #[test]
    fn test_months_concatenate_into_years() -> Result<()> {
        let s = indexed()?;
        for site in 1..=2 {
            let mut decade = Vec::new();
            for year in s.years() {
                let mut concat = Vec::new();
                for month in Month::ALL {
                    concat.extend_from_slice(s.month_view(site, year, month)?);
                }
                assert_eq!(concat.as_slice(), s.year_view(site, year)?);
                decade.extend(concat);
            }
            assert_eq!(decade.as_slice(), s.decade_view(site)?);
        }
        Ok(())
    }

    #[test]
    fn test_days() -> Result<()> {
        let s = indexed()?;
        let days: Vec<&[Float]> = s.month_days(1, 2011, Month::Apr)?.collect();
        assert_eq!(days.len(), 30);
        assert!(days.iter().all(|d| d.len() == 24));

        let d = s.day(1, 2011, Month::Jan, 2)?;
        assert_eq!(d[0], 24.);
        assert_eq!(d[23], 47.);
        assert!(matches!(s.day(1, 2011, Month::Feb, 29), Err(Error::IndexOutOfRange(_))));
        assert!(s.day(1, 2012, Month::Feb, 29).is_ok());
        assert!(matches!(s.day(1, 2011, Month::Jan, 0), Err(Error::IndexOutOfRange(_))));
        Ok(())
    }

    #[test]
    fn test_out_of_range() -> Result<()> {
        let s = indexed()?;
        assert!(matches!(s.decade_view(0), Err(Error::IndexOutOfRange(_))));
        assert!(matches!(s.decade_view(3), Err(Error::IndexOutOfRange(_))));
        assert!(matches!(s.year_view(1, 2010), Err(Error::IndexOutOfRange(_))));
        assert!(matches!(s.month_view(1, 2013, Month::Jan), Err(Error::IndexOutOfRange(_))));
        Ok(())
    }

    #[test]
    fn test_map_and_zip() -> Result<()> {
        let s = indexed()?;
        let doubled: ResourceSeries<CapacityFactor> = s.map(|v| 2. * v);
        assert_eq!(doubled.decade_view(1)?[3], 6.);

        let summed: ResourceSeries<CapacityFactor> = s.zip_map(&doubled, |a, b| a + b)?;
        assert_eq!(summed.decade_view(1)?[3], 9.);
        assert_eq!(summed.decade_view(2)?[3], -9.);

        let years = YearRange::new(2011, 2011).map_err(Error::IndexOutOfRange)?;
        let other = ResourceSeries::<WindSpeed>::from_rows(
            years,
            vec![Site::default(), Site::default()],
            vec![vec![0.; 8760], vec![0.; 8760]],
        )?;
        let r: Result<ResourceSeries<CapacityFactor>> = s.zip_map(&other, |a, b| a + b);
        assert!(matches!(r, Err(Error::ShapeMismatch(_))));
        Ok(())
    }
}
