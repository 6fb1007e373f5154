use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::str::FromStr;
use windsolar::cluster::{ClusterAnalysis, CentroidRule};
use windsolar::spatial::{AttributeMode, BlendMetric, ResourceKind, SiteMetric, SynergyMode};
use windsolar::{
    Assessment, AssessmentOptions, Error, Float, Matrix, MemorySource, Month, ResourceSource,
    Result, Site, WindSpeed, YearRange, HOURS_PER_DAY,
};

const N_SITES: usize = 4;

/// Wind speeds with a diurnal cycle whose phase changes from site to site
fn wind_source(years: YearRange, rng: &mut StdRng) -> MemorySource {
    let sites = (0..N_SITES as i32).map(|i| Site::new(-5, 3 + i)).collect();
    let mut source = MemorySource::new(sites);
    for site in 1..=N_SITES {
        let phase = site as Float * 3.0;
        for year in years {
            for month in Month::ALL {
                let days = (0..month.days_in(year))
                    .map(|_| {
                        (0..HOURS_PER_DAY)
                            .map(|h| {
                                let angle = (h as Float + phase) * std::f64::consts::PI as Float / 12.0;
                                7.0 + site as Float + 4.0 * angle.sin() + rng.gen::<Float>()
                            })
                            .collect()
                    })
                    .collect();
                source.insert(site, year, month, days);
            }
        }
    }
    source
}

/// Irradiance during the day, slightly cloudier in winter
fn solar_source(years: YearRange, rng: &mut StdRng) -> MemorySource {
    let sites = (0..N_SITES as i32).map(|i| Site::new(-5, 3 + i)).collect();
    let mut source = MemorySource::new(sites);
    for site in 1..=N_SITES {
        for year in years {
            for month in Month::ALL {
                let season = 0.7 + 0.3 * (month.index() as Float / 11.0);
                let days = (0..month.days_in(year))
                    .map(|_| {
                        (0..HOURS_PER_DAY)
                            .map(|h| {
                                if (6..18).contains(&h) {
                                    let angle = (h - 6) as Float * std::f64::consts::PI as Float / 12.0;
                                    season * 950.0 * angle.sin() * (0.8 + 0.2 * rng.gen::<Float>())
                                } else {
                                    0.0
                                }
                            })
                            .collect()
                    })
                    .collect();
                source.insert(site, year, month, days);
            }
        }
    }
    source
}

/// Splits the sites in two by their first coordinate
struct Halves;

impl ClusterAnalysis for Halves {
    fn project(&self, features: &Matrix, n_components: usize) -> Result<Matrix> {
        let (nrows, ncols) = features.size();
        let k = n_components.min(ncols);
        let mut data = Vec::with_capacity(nrows * k);
        for i in 0..nrows {
            data.extend_from_slice(&features.row(i).map_err(Error::IndexOutOfRange)?[..k]);
        }
        Matrix::from_data(nrows, k, data).map_err(Error::ShapeMismatch)
    }

    fn assign(&self, points: &Matrix, _n_clusters: usize) -> Result<Vec<usize>> {
        let col = points.column(0).map_err(Error::IndexOutOfRange)?;
        Ok(col.iter().map(|v| if *v < 0.0 { 0 } else { 1 }).collect())
    }
}

fn assessment() -> Result<Assessment> {
    let options = AssessmentOptions::from_str(
        "{
            start_year: 2011,
            end_year: 2013,
            centroid_rule: 'medoid',
            local_time_shift: 8,
        }",
    )?;
    let years = options.years()?;
    let mut rng = StdRng::seed_from_u64(1234);
    let wind = wind_source(years, &mut rng);
    let solar = solar_source(years, &mut rng);
    Assessment::from_sources(options, &wind, &solar, None)
}

#[test]
fn test_reshaping() -> Result<()> {
    let years = YearRange { start: 2011, end: 2013 };
    let mut rng = StdRng::seed_from_u64(7);
    let source = wind_source(years, &mut rng);
    let speeds = source.load::<WindSpeed>(years)?;

    for site in 1..=N_SITES {
        let mut decade = Vec::new();
        for year in years {
            let mut year_row = Vec::new();
            for month in Month::ALL {
                let month_row = speeds.month_view(site, year, month)?;
                // Exactly what came from the source, day after day
                let raw: Vec<Float> = source.read_month(site, year, month)?.concat();
                assert_eq!(month_row, &raw[..]);
                year_row.extend_from_slice(month_row);
            }
            assert_eq!(speeds.year_view(site, year)?, &year_row[..]);
            decade.extend(year_row);
        }
        assert_eq!(speeds.decade_view(site)?, &decade[..]);
        assert_eq!(decade.len(), (365 + 366 + 365) * 24);
    }
    assert_eq!(speeds.month_view(1, 2012, Month::Feb)?.len(), 29 * 24);
    assert!(matches!(
        speeds.month_view(1, 2014, Month::Jan),
        Err(Error::IndexOutOfRange(_))
    ));
    Ok(())
}

#[test]
fn test_site_reports() -> Result<()> {
    let a = assessment()?;
    assert_eq!(a.n_sites(), N_SITES);
    for site in 1..=N_SITES {
        let report = a.site_report(site)?;

        // Capacity factors stay within bounds
        let turbine = a.options().turbine;
        assert!(a
            .wind()
            .decade_view(site)?
            .iter()
            .all(|v| (0.0..=turbine.efficiency).contains(v)));

        let blend = &report.synergy;
        assert!((0.0..=1.0).contains(&blend.search.ratio));
        assert_eq!(blend.search.curve.len(), 51);
        // The optimum is never worse than either resource on its own
        assert!(blend.hourly.coefficient_of_variation <= report.wind.hourly.coefficient_of_variation + 1e-12);
        assert!(blend.hourly.coefficient_of_variation <= report.solar.hourly.coefficient_of_variation + 1e-12);
        assert!(blend.improving_coefficient > -1e-9);
        assert!((0.5..=1.5).contains(&blend.local_synergy));

        assert_eq!(report.wind.annual.yearly_totals.len(), 3);
        let total: Float = a.wind().decade_view(site)?.iter().sum();
        assert!((report.wind.annual.mean - total / 3.0).abs() < 1e-6);

        // The sun never shines at 04:00 local time (20:00 UTC)
        assert_eq!(report.solar_diurnal[5][4], 0.0);
        assert!(report.solar_diurnal[5][15] > 0.0);
    }
    Ok(())
}

#[test]
fn test_attribute_vectors() -> Result<()> {
    let a = assessment()?;
    let modes = [
        AttributeMode::Resource(ResourceKind::Wind, SiteMetric::MeanYearly),
        AttributeMode::Resource(ResourceKind::Solar, SiteMetric::StdHourly),
        AttributeMode::Resource(ResourceKind::Wind, SiteMetric::VariabilityHourly),
        AttributeMode::Resource(ResourceKind::Solar, SiteMetric::MeanHourly),
        AttributeMode::Blend(BlendMetric::MeanYearly),
        AttributeMode::Blend(BlendMetric::VariabilityHourly),
        AttributeMode::Blend(BlendMetric::ImprovingCoefficient),
        AttributeMode::Blend(BlendMetric::LocalSynergy),
        AttributeMode::Blend(BlendMetric::MatchingRatio),
    ];
    for mode in modes {
        let v = a.attribute_vector(mode)?;
        assert_eq!(v.len(), N_SITES);
        let max = v.max().ok_or(Error::Config("no max".into()))?;
        let min = v.min().ok_or(Error::Config("no min".into()))?;
        assert!((1..=N_SITES).contains(&max.site));
        assert!((1..=N_SITES).contains(&min.site));
        assert!(max.value >= min.value);
        assert_eq!(AttributeMode::from_str(&v.name).map_err(Error::Config)?, mode);
    }

    // Windier sites have larger wind speeds
    let mean = a.attribute_vector(AttributeMode::Resource(ResourceKind::Wind, SiteMetric::MeanHourly))?;
    assert_eq!(mean.max().map(|e| e.site), Some(N_SITES));

    // The matching ratio agrees with the site report
    let ratio = a.attribute_vector(AttributeMode::Blend(BlendMetric::MatchingRatio))?;
    assert_eq!(ratio.get(2)?, a.site_report(2)?.synergy.search.ratio);
    Ok(())
}

#[test]
fn test_synergy_and_clusters() -> Result<()> {
    let a = assessment()?;
    for mode in SynergyMode::ALL {
        let full = a.synergy_matrix(mode, None)?;
        assert_eq!(full.raw.size(), (N_SITES, N_SITES));
        for i in 0..N_SITES {
            for j in 0..N_SITES {
                let v = full.raw.get(i, j).map_err(Error::Config)?;
                assert!((-1e-12..=1.0 + 1e-12).contains(&v));
                let n = full.values.get(i, j).map_err(Error::Config)?;
                assert!((-1e-12..=1.0 + 1e-12).contains(&n));
            }
        }
        if matches!(mode, SynergyMode::WindWind | SynergyMode::SolarSolar) {
            for i in 0..N_SITES {
                assert!(full.raw.get(i, i).map_err(Error::Config)?.abs() < 1e-9);
            }
        }

        let reference = a.synergy_matrix(mode, Some(3))?;
        assert_eq!(reference.raw.size(), (1, N_SITES));
        assert_eq!(
            reference.raw.row(0).map_err(Error::Config)?,
            full.raw.row(2).map_err(Error::Config)?
        );
    }

    let wind_clusters = a.cluster(&Halves, SynergyMode::WindWind, 2, 2)?;
    let solar_clusters = a.cluster(&Halves, SynergyMode::SolarSolar, 2, 2)?;
    let n_grouped: usize = wind_clusters.groups.iter().map(|g| g.len()).sum();
    assert_eq!(n_grouped, N_SITES);
    assert_eq!(wind_clusters.centroids.len(), 2);
    for (group, centroid) in wind_clusters.groups.iter().zip(&wind_clusters.centroids) {
        assert!(group.contains(centroid));
    }
    assert_eq!(a.options().centroid_rule, CentroidRule::Medoid);

    let cross = a.cross_cluster_synergy(&wind_clusters, &solar_clusters, SynergyMode::WindSolar)?;
    assert_eq!(cross.matrix.size(), (2, 2));
    for (best, worst) in cross.best.iter().zip(&cross.worst) {
        assert!(best.synergy >= worst.synergy);
        assert!(solar_clusters.centroids.contains(&best.site));
    }
    Ok(())
}

#[test]
fn test_json_source() -> Result<()> {
    let years = YearRange { start: 2012, end: 2012 };
    let mut rng = StdRng::seed_from_u64(99);
    let source = wind_source(years, &mut rng);
    let json = serde_json::to_string(&source).map_err(|e| Error::Config(e.to_string()))?;

    let path = std::env::temp_dir().join("windsolar_pipeline_wind.json");
    std::fs::write(&path, json)?;
    let back = MemorySource::from_file(&path)?;
    std::fs::remove_file(&path)?;

    assert_eq!(back.sites(), source.sites());
    assert_eq!(
        back.load::<WindSpeed>(years)?.decade_view(4)?,
        source.load::<WindSpeed>(years)?.decade_view(4)?
    );
    Ok(())
}
