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

use crate::cluster::CentroidRule;
use crate::conversion::{HubHeight, PvModel, WindTurbine};
use crate::{Error, Result, YearRange, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// The parameters of an assessment.
///
/// Every field has a default value, so they can all be left out of
/// the configuration files. These are written in JSON5, e.g.,
///
/// ```json5
/// {
///     start_year: 2006,
///     end_year: 2015,
///     turbine: { rated: 12.5 },
///     pv: { "temperature-corrected": { c1: 0.9 } },
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssessmentOptions {
    /// The first year of records
    pub start_year: i32,

    /// The last year of records (included)
    pub end_year: i32,

    /// Extrapolation of wind speeds to the hub height
    pub hub_height: HubHeight,

    /// The power curve of the wind turbines
    pub turbine: WindTurbine,

    /// The photovoltaic model
    pub pv: PvModel,

    /// How clusters choose their representative site
    pub centroid_rule: CentroidRule,

    /// Hours added to the records' clock when building diurnal profiles
    /// (e.g., `8` for records in UTC and sites in UTC+8)
    pub local_time_shift: usize,
}

impl Default for AssessmentOptions {
    fn default() -> Self {
        Self {
            start_year: 2006,
            end_year: 2015,
            hub_height: HubHeight::default(),
            turbine: WindTurbine::default(),
            pv: PvModel::default(),
            centroid_rule: CentroidRule::default(),
            local_time_shift: 0,
        }
    }
}

impl FromStr for AssessmentOptions {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let options: Self = json5::from_str(s)
            .map_err(|e| Error::Config(format!("could not parse options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }
}

impl AssessmentOptions {
    /// Reads the options from a JSON5 file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)?;
        Self::from_str(&s).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{} (in '{}')", msg, path.display())),
            other => other,
        })
    }

    /// Checks that the years are in order and that the local time shift
    /// is less than a day
    pub fn validate(&self) -> Result<()> {
        self.years()?;
        if self.local_time_shift >= HOURS_PER_DAY {
            return Err(Error::Config(format!(
                "local_time_shift must be less than {} hours, found {}",
                HOURS_PER_DAY, self.local_time_shift
            )));
        }
        Ok(())
    }

    /// The range of years to assess
    pub fn years(&self) -> Result<YearRange> {
        YearRange::new(self.start_year, self.end_year).map_err(Error::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::TemperatureCorrectedPv;

    #[test]
    fn test_empty() -> Result<()> {
        let options = AssessmentOptions::from_str("{}")?;
        assert_eq!(options, AssessmentOptions::default());
        let years = options.years()?;
        assert_eq!(years.len(), 10);
        Ok(())
    }

    #[test]
    fn test_json5() -> Result<()> {
        let options = AssessmentOptions::from_str(
            "{
                // a comment
                start_year: 2010,
                end_year: 2012,
                hub_height: { hub_height: 80 },
                turbine: { rated: 12.5, },
                pv: { 'temperature-corrected': { c1: 0.9 } },
                centroid_rule: 'medoid',
                local_time_shift: 8,
            }",
        )?;
        assert_eq!(options.years()?, YearRange { start: 2010, end: 2012 });
        assert_eq!(options.hub_height.hub_height, 80.);
        assert_eq!(options.hub_height.alpha, 0.35);
        assert_eq!(options.turbine.rated, 12.5);
        assert_eq!(options.turbine.cut_out, 25.);
        assert_eq!(
            options.pv,
            PvModel::TemperatureCorrected(TemperatureCorrectedPv {
                c1: 0.9,
                ..TemperatureCorrectedPv::default()
            })
        );
        assert_eq!(options.centroid_rule, CentroidRule::Medoid);
        assert_eq!(options.local_time_shift, 8);
        Ok(())
    }

    #[test]
    fn test_bad_options() {
        assert!(matches!(
            AssessmentOptions::from_str("{ start_year: 2015, end_year: 2006 }"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            AssessmentOptions::from_str("{ local_time_shift: 24 }"),
            Err(Error::Config(_))
        ));
        assert!(AssessmentOptions::from_str("{ local_time_shift: 23 }").is_ok());
        assert!(matches!(
            AssessmentOptions::from_str("{ start_yr: 2015 }"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            AssessmentOptions::from_str("not json"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            AssessmentOptions::from_file("./this/does/not/exist.json5"),
            Err(Error::Io(_))
        ));
    }
}
