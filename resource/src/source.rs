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

use crate::builder::SeriesBuilder;
use crate::error::{Error, Result};
use crate::quantity::Quantity;
use crate::series::ResourceSeries;
use crate::site::Site;
use crate::Float;
use calendar::{Month, YearRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Anything that can deliver hourly records of a set of sites,
/// one `[days x 24]` block per site, year and month.
///
/// How the records are stored (files, databases, remote services)
/// is up to the implementor.
pub trait ResourceSource {
    /// The sites this source knows about. Site ordinal `i` is in position `i - 1`.
    fn sites(&self) -> Vec<Site>;

    /// Reads the records of one month of one site (1-based), day after day.
    fn read_month(&self, site: usize, year: i32, month: Month) -> Result<Vec<Vec<Float>>>;

    /// Reads every month of every site over `years` into a [`ResourceSeries`]
    fn load<Q: Quantity>(&self, years: YearRange) -> Result<ResourceSeries<Q>>
    where
        Self: Sized,
    {
        let sites = self.sites();
        let n_sites = sites.len();
        let mut builder = SeriesBuilder::<Q>::new(years, sites)?;
        for site in 1..=n_sites {
            for year in years {
                for month in Month::ALL {
                    let days = self.read_month(site, year, month)?;
                    builder.insert(site, year, month, &days)?;
                }
            }
        }
        builder.build()
    }
}

/// Hourly records held in memory as nested maps:
/// site ordinal, then year, then month name (e.g., `"Jan"`), then one
/// row of 24 values per day.
///
/// This is also the layout of the JSON data files, e.g.,
///
/// ```json
/// {
///     "sites": [{"row": -6, "column": 2}],
///     "data": {
///         "1": { "2006": { "Jan": [[3.1, 2.9, ...], ...], ... } }
///     }
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct MemorySource {
    /// The grid location of each site, ordered by ordinal
    pub sites: Vec<Site>,

    /// The records
    pub data: BTreeMap<usize, BTreeMap<i32, BTreeMap<String, Vec<Vec<Float>>>>>,
}

impl MemorySource {
    /// Creates an empty source for `sites`
    pub fn new(sites: Vec<Site>) -> Self {
        Self {
            sites,
            data: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the records of one month of one site
    pub fn insert(&mut self, site: usize, year: i32, month: Month, days: Vec<Vec<Float>>) {
        self.data
            .entry(site)
            .or_default()
            .entry(year)
            .or_default()
            .insert(month.name().to_string(), days);
    }

    /// Parses a JSON document, checking that every month key is a
    /// known month name and every site key is a known ordinal.
    pub fn from_json(json: &str) -> Result<Self> {
        let source: MemorySource =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        source.validate_keys()?;
        Ok(source)
    }

    /// Reads and parses a JSON file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate_keys(&self) -> Result<()> {
        for (site, years) in &self.data {
            if *site == 0 || *site > self.sites.len() {
                return Err(Error::IndexOutOfRange(format!(
                    "records found for site {}, but only {} sites were declared",
                    site,
                    self.sites.len()
                )));
            }
            for months in years.values() {
                for name in months.keys() {
                    name.parse::<Month>().map_err(Error::IndexOutOfRange)?;
                }
            }
        }
        Ok(())
    }
}

impl ResourceSource for MemorySource {
    fn sites(&self) -> Vec<Site> {
        self.sites.clone()
    }

    fn read_month(&self, site: usize, year: i32, month: Month) -> Result<Vec<Vec<Float>>> {
        self.data
            .get(&site)
            .and_then(|years| years.get(&year))
            .and_then(|months| {
                months
                    .iter()
                    .find(|(name, _)| name.parse::<Month>().ok() == Some(month))
                    .map(|(_, days)| days.clone())
            })
            .ok_or_else(|| {
                Error::ShapeMismatch(format!(
                    "no records for site {}, {} {}",
                    site, month, year
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::WindSpeed;
    use calendar::HOURS_PER_DAY;

    fn full_source(years: YearRange, n_sites: usize) -> MemorySource {
        let sites = (0..n_sites).map(|i| Site::new(-6, i as i32)).collect();
        let mut source = MemorySource::new(sites);
        for site in 1..=n_sites {
            for year in years {
                for month in Month::ALL {
                    let days = vec![vec![site as Float; HOURS_PER_DAY]; month.days_in(year)];
                    source.insert(site, year, month, days);
                }
            }
        }
        source
    }

    #[test]
    fn test_load() -> Result<()> {
        let years = YearRange::new(2007, 2008).map_err(Error::IndexOutOfRange)?;
        let source = full_source(years, 3);
        let series: ResourceSeries<WindSpeed> = source.load(years)?;
        assert_eq!(series.n_sites(), 3);
        assert_eq!(series.site(3)?, Site::new(-6, 2));
        assert!(series.decade_view(2)?.iter().all(|v| *v == 2.));
        Ok(())
    }

    #[test]
    fn test_load_missing_month() -> Result<()> {
        let years = YearRange::new(2008, 2008).map_err(Error::IndexOutOfRange)?;
        let mut source = full_source(years, 1);
        if let Some(months) = source.data.get_mut(&1).and_then(|y| y.get_mut(&2008)) {
            months.remove("Nov");
        }
        let r: Result<ResourceSeries<WindSpeed>> = source.load(years);
        assert!(matches!(r, Err(Error::ShapeMismatch(_))));
        Ok(())
    }

    #[test]
    fn test_json() -> Result<()> {
        let years = YearRange::new(2008, 2008).map_err(Error::IndexOutOfRange)?;
        let source = full_source(years, 2);
        let json = serde_json::to_string(&source).map_err(|e| Error::Config(e.to_string()))?;
        let parsed = MemorySource::from_json(&json)?;
        assert_eq!(parsed.sites, source.sites);
        let series: ResourceSeries<WindSpeed> = parsed.load(years)?;
        assert_eq!(series.month_view(2, 2008, Month::Feb)?.len(), 29 * 24);
        Ok(())
    }

    #[test]
    fn test_json_unknown_keys() {
        let bad_month = r#"{"sites": [{"row": 0, "column": 0}], "data": {"1": {"2008": {"Janvier": []}}}}"#;
        assert!(matches!(
            MemorySource::from_json(bad_month),
            Err(Error::IndexOutOfRange(_))
        ));

        let bad_site = r#"{"sites": [{"row": 0, "column": 0}], "data": {"2": {"2008": {"Jan": []}}}}"#;
        assert!(matches!(
            MemorySource::from_json(bad_site),
            Err(Error::IndexOutOfRange(_))
        ));

        assert!(matches!(
            MemorySource::from_json("not json"),
            Err(Error::Config(_))
        ));
    }
}
