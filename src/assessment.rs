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

use crate::cluster::{self, ClusterAnalysis, Clustering, CrossClusterSynergy};
use crate::options::AssessmentOptions;
use crate::single_site::{self, MonthlyVariation, SiteStatistics};
use crate::spatial::{self, AttributeMode, AttributeVector, ResourceKind, SynergyMatrix, SynergyMode};
use crate::synergy::{self, SiteSynergy};
use crate::{
    CapacityFactor, Error, Float, Irradiance, Month, ResourceSeries, ResourceSource, Result, Site,
    Temperature, WindSpeed, YearRange,
};
use serde::{Deserialize, Serialize};

/// The wind and solar capacity factors of a region, keyed identically.
///
/// This is the input of every assessment. It is immutable: each operation
/// returns a new value computed from the capacity factors.
#[derive(Debug, Clone)]
pub struct Assessment {
    options: AssessmentOptions,
    wind: ResourceSeries<CapacityFactor>,
    solar: ResourceSeries<CapacityFactor>,
}

/// Everything about a single site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteReport {
    /// The 1-based site ordinal
    pub site: usize,

    /// The location of the site
    pub location: Site,

    /// Wind on its own
    pub wind: SiteStatistics,

    /// Solar on its own
    pub solar: SiteStatistics,

    /// Monthly totals of wind
    pub wind_monthly: MonthlyVariation,

    /// Monthly totals of solar
    pub solar_monthly: MonthlyVariation,

    /// Mean daily profile of wind, one per month (in local time)
    pub wind_diurnal: Vec<Vec<Float>>,

    /// Mean daily profile of solar, one per month (in local time)
    pub solar_diurnal: Vec<Vec<Float>>,

    /// Complementarity of wind and solar
    pub synergy: SiteSynergy,
}

impl Assessment {
    /// Puts together wind and solar capacity factors
    pub fn new(
        options: AssessmentOptions,
        wind: ResourceSeries<CapacityFactor>,
        solar: ResourceSeries<CapacityFactor>,
    ) -> Result<Self> {
        wind.check_same_shape(&solar)?;
        Ok(Self {
            options,
            wind,
            solar,
        })
    }

    /// Converts reference-height wind speeds and irradiances (and, if the
    /// PV model needs them, ambient temperatures) into capacity factors
    pub fn from_physical(
        options: AssessmentOptions,
        wind_speed: &ResourceSeries<WindSpeed>,
        irradiance: &ResourceSeries<Irradiance>,
        temperature: Option<&ResourceSeries<Temperature>>,
    ) -> Result<Self> {
        let hub_speed = options.hub_height.correct(wind_speed);
        let wind = options.turbine.convert(&hub_speed);
        let solar = options.pv.convert(irradiance, temperature)?;
        Self::new(options, wind, solar)
    }

    /// Reads the physical records over the years in `options` and converts them
    pub fn from_sources<S: ResourceSource>(
        options: AssessmentOptions,
        wind: &S,
        solar: &S,
        temperature: Option<&S>,
    ) -> Result<Self> {
        let years = options.years()?;
        let wind_speed = wind.load::<WindSpeed>(years)?;
        let irradiance = solar.load::<Irradiance>(years)?;
        let temperature = match temperature {
            Some(source) if options.pv.needs_temperature() => Some(source.load::<Temperature>(years)?),
            _ => None,
        };
        Self::from_physical(options, &wind_speed, &irradiance, temperature.as_ref())
    }

    /// The options of the assessment
    pub fn options(&self) -> &AssessmentOptions {
        &self.options
    }

    /// The wind capacity factors
    pub fn wind(&self) -> &ResourceSeries<CapacityFactor> {
        &self.wind
    }

    /// The solar capacity factors
    pub fn solar(&self) -> &ResourceSeries<CapacityFactor> {
        &self.solar
    }

    /// The capacity factors of one resource
    pub fn resource(&self, kind: ResourceKind) -> &ResourceSeries<CapacityFactor> {
        match kind {
            ResourceKind::Wind => &self.wind,
            ResourceKind::Solar => &self.solar,
        }
    }

    /// The years covered
    pub fn years(&self) -> YearRange {
        self.wind.years()
    }

    /// The number of sites
    pub fn n_sites(&self) -> usize {
        self.wind.n_sites()
    }

    /// The mean daily profile of a resource at a site in a month, in local time
    pub fn diurnal_profile(&self, kind: ResourceKind, site: usize, month: Month) -> Result<Vec<Float>> {
        single_site::diurnal_profile(self.resource(kind), site, month, self.options.local_time_shift)
    }

    /// Puts together everything known about a site (1-based)
    pub fn site_report(&self, site: usize) -> Result<SiteReport> {
        let profiles = |kind| {
            Month::ALL
                .iter()
                .map(|m| self.diurnal_profile(kind, site, *m))
                .collect::<Result<Vec<Vec<Float>>>>()
        };
        Ok(SiteReport {
            site,
            location: self.wind.site(site)?,
            wind: single_site::site_statistics(&self.wind, site)?,
            solar: single_site::site_statistics(&self.solar, site)?,
            wind_monthly: single_site::monthly_variation(&self.wind, site)?,
            solar_monthly: single_site::monthly_variation(&self.solar, site)?,
            wind_diurnal: profiles(ResourceKind::Wind)?,
            solar_diurnal: profiles(ResourceKind::Solar)?,
            synergy: synergy::site_synergy(&self.wind, &self.solar, site)?,
        })
    }

    /// One value per site, see [`spatial::build_attribute_vector`]
    pub fn attribute_vector(&self, mode: AttributeMode) -> Result<AttributeVector> {
        spatial::build_attribute_vector(&self.wind, &self.solar, mode)
    }

    /// See [`spatial::synergy_matrix`]
    pub fn synergy_matrix(&self, mode: SynergyMode, reference: Option<usize>) -> Result<SynergyMatrix> {
        spatial::synergy_matrix(&self.wind, &self.solar, mode, reference)
    }

    /// See [`spatial::synergy_to_site`]
    pub fn synergy_to_site(&self, mode: SynergyMode, reference: usize) -> Result<AttributeVector> {
        spatial::synergy_to_site(&self.wind, &self.solar, mode, reference)
    }

    /// Clusters the sites by their (normalized) synergy in `mode`, using the
    /// centroid rule in the options
    pub fn cluster<A: ClusterAnalysis>(
        &self,
        analysis: &A,
        mode: SynergyMode,
        n_components: usize,
        n_clusters: usize,
    ) -> Result<Clustering> {
        let synergy = self.synergy_matrix(mode, None)?;
        cluster::run_clustering(
            analysis,
            &synergy.values,
            n_components,
            n_clusters,
            self.options.centroid_rule,
        )
    }

    /// See [`cluster::cross_cluster_synergy`]
    pub fn cross_cluster_synergy(
        &self,
        a: &Clustering,
        b: &Clustering,
        mode: SynergyMode,
    ) -> Result<CrossClusterSynergy> {
        if a.centroids.is_empty() {
            return Err(Error::DegenerateSeries(
                "the first clustering has no centroids".to_string(),
            ));
        }
        cluster::cross_cluster_synergy(&self.wind, &self.solar, &a.centroids, &b.centroids, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySource, HOURS_PER_DAY};

    fn source(years: YearRange, f: impl Fn(usize, usize) -> Float) -> MemorySource {
        let sites = vec![Site::new(-5, 3), Site::new(-5, 4)];
        let mut source = MemorySource::new(sites);
        for site in 1..=2 {
            for year in years {
                for month in Month::ALL {
                    let days = (0..month.days_in(year))
                        .map(|_| (0..HOURS_PER_DAY).map(|h| f(site, h)).collect())
                        .collect();
                    source.insert(site, year, month, days);
                }
            }
        }
        source
    }

    fn options() -> AssessmentOptions {
        AssessmentOptions {
            start_year: 2012,
            end_year: 2013,
            local_time_shift: 8,
            ..AssessmentOptions::default()
        }
    }

    fn assessment() -> Result<Assessment> {
        let years = options().years()?;
        let wind = source(years, |site, h| 4.0 + site as Float + (h % 12) as Float);
        let solar = source(years, |_, h| if (6..18).contains(&h) { 700.0 } else { 0.0 });
        Assessment::from_sources(options(), &wind, &solar, None)
    }

    #[test]
    fn test_from_sources() -> Result<()> {
        let a = assessment()?;
        assert_eq!(a.n_sites(), 2);
        assert_eq!(a.years(), YearRange { start: 2012, end: 2013 });
        assert_eq!(a.wind().decade_view(1)?.len(), (366 + 365) * 24);

        // First hour of site 1: 5 m/s at 50 m
        let v = a.options().hub_height.speed(5.0);
        let cf = a.options().turbine.capacity_factor(v);
        assert!((a.wind().decade_view(1)?[0] - cf).abs() < 1e-12);

        // Temperatures are needed by the temperature-corrected model
        let mut corrected = options();
        corrected.pv = crate::conversion::PvModel::TemperatureCorrected(Default::default());
        let years = corrected.years()?;
        let wind = source(years, |_, _| 8.0);
        let solar = source(years, |_, h| h as Float * 10.0);
        assert!(matches!(
            Assessment::from_sources(corrected, &wind, &solar, None),
            Err(Error::Config(_))
        ));
        Ok(())
    }

    #[test]
    fn test_mismatched_series() -> Result<()> {
        let a = assessment()?;
        let other_years = YearRange { start: 2012, end: 2012 };
        let other = source(other_years, |_, _| 1.0).load::<CapacityFactor>(other_years)?;
        assert!(matches!(
            Assessment::new(options(), a.wind().clone(), other),
            Err(Error::ShapeMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn test_site_report() -> Result<()> {
        let a = assessment()?;
        let report = a.site_report(2)?;
        assert_eq!(report.site, 2);
        assert_eq!(report.location, Site::new(-5, 4));
        assert_eq!(report.wind_diurnal.len(), 12);
        assert_eq!(report.solar_diurnal[0].len(), 24);
        // Sun rises at 06:00 UTC, which is 14:00 with an 8 hour shift
        assert_eq!(report.solar_diurnal[0][13], 0.0);
        assert!(report.solar_diurnal[0][14] > 0.0);
        assert_eq!(report.wind_monthly.totals.size(), (12, 2));
        assert!((0.5..=1.5).contains(&report.synergy.local_synergy));
        assert!(report.synergy.search.ratio > 0.0);

        assert!(matches!(a.site_report(3), Err(Error::IndexOutOfRange(_))));
        Ok(())
    }

    #[test]
    fn test_spatial() -> Result<()> {
        let a = assessment()?;
        let v = a.attribute_vector(AttributeMode::Resource(
            ResourceKind::Wind,
            crate::spatial::SiteMetric::MeanHourly,
        ))?;
        assert_eq!(v.max().map(|e| e.site), Some(2));

        let to_site = a.synergy_to_site(SynergyMode::WindWind, 1)?;
        let m = a.synergy_matrix(SynergyMode::WindWind, Some(1))?;
        assert_eq!(m.values.row(0).map_err(Error::Config)?, &to_site.values[..]);
        Ok(())
    }
}
