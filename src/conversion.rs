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

//! Device models turning physical records into capacity factors.
//!
//! Every model is a plain value holding its parameters (with sensible
//! defaults), and exposes both a scalar transformation and one that builds
//! a whole new [`ResourceSeries`] out of an existing one.

use crate::Float;
use crate::{CapacityFactor, Error, Irradiance, ResourceSeries, Result, Temperature, WindSpeed};
use serde::{Deserialize, Serialize};

/// Absolute zero, in C
const KELVIN_OFFSET: Float = 273.15;

/// Calculates the wind speed from its two orthogonal components
pub fn wind_speed(u: Float, v: Float) -> Float {
    (u * u + v * v).sqrt()
}

/// Builds a wind speed series from two identically keyed series
/// holding its orthogonal components (e.g., eastward and northward).
pub fn wind_speed_from_components(
    u: &ResourceSeries<WindSpeed>,
    v: &ResourceSeries<WindSpeed>,
) -> Result<ResourceSeries<WindSpeed>> {
    u.zip_map(v, wind_speed)
}

/// Extrapolates wind speeds from the height at which they were
/// measured to the hub height of a turbine, using the power law
/// $`v_{hub} = v_{ref} (h_{hub}/h_{ref})^\alpha`$
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HubHeight {
    /// The height of the records, in m
    pub reference_height: Float,

    /// The height of the turbine hub, in m
    pub hub_height: Float,

    /// The exponent of the power law
    pub alpha: Float,
}

impl Default for HubHeight {
    fn default() -> Self {
        Self {
            reference_height: 50.0,
            hub_height: 65.0,
            alpha: 0.35,
        }
    }
}

impl HubHeight {
    /// The factor by which reference speeds are multiplied
    pub fn factor(&self) -> Float {
        (self.hub_height / self.reference_height).powf(self.alpha)
    }

    /// Extrapolates a single wind speed
    pub fn speed(&self, v_ref: Float) -> Float {
        v_ref * self.factor()
    }

    /// Extrapolates a whole series
    pub fn correct(&self, speeds: &ResourceSeries<WindSpeed>) -> ResourceSeries<WindSpeed> {
        let factor = self.factor();
        speeds.map(|v| v * factor)
    }
}

/// The power curve of a wind turbine.
///
/// Below `cut_in` and above `cut_out` the turbine does not produce. Between
/// `cut_in` and `rated` the output grows linearly up to `efficiency`, and it
/// stays there until `cut_out`.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WindTurbine {
    /// Cut-in speed, in m/s
    pub cut_in: Float,

    /// Cut-out speed, in m/s
    pub cut_out: Float,

    /// Rated speed, in m/s
    pub rated: Float,

    /// The fraction of the rated power delivered at rated speed
    pub efficiency: Float,
}

impl Default for WindTurbine {
    fn default() -> Self {
        Self {
            cut_in: 3.0,
            cut_out: 25.0,
            rated: 13.5,
            efficiency: 0.95,
        }
    }
}

impl WindTurbine {
    /// The capacity factor at hub-height wind speed `v`. Speeds that are
    /// not numbers produce nothing.
    pub fn capacity_factor(&self, v: Float) -> Float {
        if !(v >= self.cut_in && v <= self.cut_out) {
            0.0
        } else if v <= self.rated {
            self.efficiency * (v - self.cut_in) / (self.rated - self.cut_in)
        } else {
            self.efficiency
        }
    }

    /// Transforms a series of hub-height wind speeds into capacity factors
    pub fn convert(&self, speeds: &ResourceSeries<WindSpeed>) -> ResourceSeries<CapacityFactor> {
        speeds.map(|v| self.capacity_factor(v))
    }
}

/// A photovoltaic module described by its area and efficiency. The
/// capacity factor is the power the module would produce
/// (irradiance x area x efficiency) over its rated power.
///
/// Results are not clamped.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PvModule {
    /// Rated power, in W
    pub rated_power: Float,

    /// Area of the module, in m2
    pub area: Float,

    /// Conversion efficiency
    pub efficiency: Float,
}

impl Default for PvModule {
    fn default() -> Self {
        Self {
            rated_power: 255.0,
            area: 1.6368,
            efficiency: 0.1248,
        }
    }
}

impl PvModule {
    /// The capacity factor under `irradiance` W/m2
    pub fn capacity_factor(&self, irradiance: Float) -> Float {
        irradiance * self.efficiency * self.area / self.rated_power
    }

    /// Transforms a series of irradiances into capacity factors
    pub fn convert(&self, irradiance: &ResourceSeries<Irradiance>) -> ResourceSeries<CapacityFactor> {
        irradiance.map(|h| self.capacity_factor(h))
    }
}

/// A photovoltaic module whose output is derated by the temperature of the module,
/// which is estimated from the ambient temperature and the irradiance.
///
/// Results are not clamped, so small excursions below 0 or above 1 are
/// possible (e.g., at sunrise and sunset).
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TemperatureCorrectedPv {
    /// Irradiance at standard test conditions, in W/m2
    pub h_stc: Float,

    /// Derating coefficient
    pub c1: Float,

    /// Power temperature coefficient, in 1/C
    pub c2: Float,

    /// Module temperature at standard test conditions, in C
    pub t_stc: Float,

    /// Module temperature at the temperature-estimation test, in C
    pub t_module_test: Float,

    /// Ambient temperature at the temperature-estimation test, in C
    pub t_ambient_test: Float,

    /// Irradiance at the temperature-estimation test, in W/m2
    pub h_test: Float,
}

impl Default for TemperatureCorrectedPv {
    fn default() -> Self {
        Self {
            h_stc: 1000.0,
            c1: 0.93,
            c2: -0.005,
            t_stc: 25.0,
            t_module_test: 47.0,
            t_ambient_test: 20.0,
            h_test: 800.0,
        }
    }
}

impl TemperatureCorrectedPv {
    /// The temperature of the module, in C, for an `irradiance` in W/m2
    /// and an `ambient` temperature in K
    pub fn module_temperature(&self, irradiance: Float, ambient: Float) -> Float {
        ambient - KELVIN_OFFSET
            + irradiance * (self.t_module_test - self.t_ambient_test) / self.h_test
    }

    /// The capacity factor for an `irradiance` in W/m2 and an
    /// `ambient` temperature in K
    pub fn capacity_factor(&self, irradiance: Float, ambient: Float) -> Float {
        let t_module = self.module_temperature(irradiance, ambient);
        (irradiance / self.h_stc) * self.c1 * (1.0 + self.c2 * (t_module - self.t_stc))
    }

    /// Transforms a series of irradiances into capacity factors, using an
    /// identically keyed series of ambient temperatures
    pub fn convert(
        &self,
        irradiance: &ResourceSeries<Irradiance>,
        ambient: &ResourceSeries<Temperature>,
    ) -> Result<ResourceSeries<CapacityFactor>> {
        irradiance.zip_map(ambient, |h, t| self.capacity_factor(h, t))
    }
}

/// The photovoltaic model used for turning irradiance into capacity factors
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum PvModel {
    /// See [`PvModule`]
    AreaEfficiency(PvModule),

    /// See [`TemperatureCorrectedPv`]
    TemperatureCorrected(TemperatureCorrectedPv),
}

impl Default for PvModel {
    fn default() -> Self {
        Self::AreaEfficiency(PvModule::default())
    }
}

impl PvModel {
    /// Checks whether the model needs ambient temperatures
    pub fn needs_temperature(&self) -> bool {
        matches!(self, Self::TemperatureCorrected(_))
    }

    /// Transforms a series of irradiances into capacity factors. The
    /// `ambient` temperatures are ignored by models that do not need them.
    pub fn convert(
        &self,
        irradiance: &ResourceSeries<Irradiance>,
        ambient: Option<&ResourceSeries<Temperature>>,
    ) -> Result<ResourceSeries<CapacityFactor>> {
        match (self, ambient) {
            (Self::AreaEfficiency(pv), _) => Ok(pv.convert(irradiance)),
            (Self::TemperatureCorrected(pv), Some(ambient)) => pv.convert(irradiance, ambient),
            (Self::TemperatureCorrected(_), None) => Err(Error::Config(
                "the temperature-corrected PV model needs ambient temperatures".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource::{Month, Site, YearRange};

    fn constant<Q: resource::Quantity>(v: Float) -> ResourceSeries<Q> {
        let years = YearRange { start: 2010, end: 2010 };
        let row = vec![v; years.hours()];
        match ResourceSeries::from_rows(years, vec![Site::default()], vec![row]) {
            Ok(s) => s,
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_wind_speed() {
        assert!((wind_speed(3., 4.) - 5.).abs() < 1e-9);
        assert!((wind_speed(-3., 4.) - 5.).abs() < 1e-9);
        assert_eq!(wind_speed(0., 0.), 0.);
    }

    #[test]
    fn test_wind_speed_from_components() -> Result<()> {
        let u = constant::<WindSpeed>(6.);
        let v = constant::<WindSpeed>(8.);
        let speed = wind_speed_from_components(&u, &v)?;
        assert!(speed.decade_view(1)?.iter().all(|s| (s - 10.).abs() < 1e-9));
        Ok(())
    }

    #[test]
    fn test_power_curve_boundaries() {
        let t = WindTurbine::default();
        assert_eq!(t.capacity_factor(0.0), 0.0);
        assert_eq!(t.capacity_factor(2.999), 0.0);
        // Continuous at cut-in
        assert_eq!(t.capacity_factor(3.0), 0.0);
        assert!(t.capacity_factor(3.001) > 0.0);
        // Linear ramp
        let mid = 0.5 * (3.0 + 13.5);
        assert!((t.capacity_factor(mid) - 0.95 / 2.).abs() < 1e-9);
        // Continuous at rated
        assert!((t.capacity_factor(13.5) - 0.95).abs() < 1e-12);
        assert_eq!(t.capacity_factor(13.501), 0.95);
        // Constant until cut-out, included
        assert_eq!(t.capacity_factor(20.0), 0.95);
        assert_eq!(t.capacity_factor(25.0), 0.95);
        // Not a number
        assert_eq!(t.capacity_factor(Float::NAN), 0.0);
        assert_eq!(t.capacity_factor(25.001), 0.0);
    }

    #[test]
    fn test_power_curve_other_turbines() {
        for (cut_in, rated, cut_out, efficiency) in
            [(2.5, 11.0, 20.0, 1.0), (4.0, 15.0, 30.0, 0.9), (3.5, 12.0, 22.0, 0.5)]
        {
            let t = WindTurbine {
                cut_in,
                rated,
                cut_out,
                efficiency,
            };
            assert_eq!(t.capacity_factor(cut_in), 0.0);
            assert!((t.capacity_factor(rated) - efficiency).abs() < 1e-12);
            assert_eq!(t.capacity_factor(0.5 * (rated + cut_out)), efficiency);
            assert_eq!(t.capacity_factor(cut_out), efficiency);
            assert_eq!(t.capacity_factor(cut_out + 0.1), 0.0);
            // Never outside [0, efficiency]
            for i in 0..400 {
                let cf = t.capacity_factor(i as Float * 0.1);
                assert!((0.0..=efficiency).contains(&cf));
            }
        }
    }

    #[test]
    fn test_hub_height() -> Result<()> {
        let h = HubHeight::default();
        let expected = 10. * (65.0 as Float / 50.0).powf(0.35);
        assert!((h.speed(10.) - expected).abs() < 1e-9);

        let corrected = h.correct(&constant::<WindSpeed>(10.));
        assert!((corrected.month_view(1, 2010, Month::Jun)?[5] - expected).abs() < 1e-9);

        let same = HubHeight {
            reference_height: 50.,
            hub_height: 50.,
            alpha: 0.35,
        };
        assert_eq!(same.speed(7.), 7.);
        Ok(())
    }

    #[test]
    fn test_convert_wind() -> Result<()> {
        let cf = WindTurbine::default().convert(&constant::<WindSpeed>(14.));
        assert!(cf.decade_view(1)?.iter().all(|v| *v == 0.95));
        Ok(())
    }

    #[test]
    fn test_pv_module() -> Result<()> {
        let pv = PvModule::default();
        let expected = 1000. * 0.1248 * 1.6368 / 255.0;
        assert!((pv.capacity_factor(1000.) - expected).abs() < 1e-12);
        assert_eq!(pv.capacity_factor(0.), 0.);

        let cf = pv.convert(&constant::<Irradiance>(500.));
        assert!((cf.decade_view(1)?[0] - expected / 2.).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_temperature_corrected_pv() -> Result<()> {
        let pv = TemperatureCorrectedPv::default();

        // At 800 W/m2 and 20C ambient, the module is at 47C
        let t_module = pv.module_temperature(800., 293.15);
        assert!((t_module - 47.).abs() < 1e-9);

        let cf = pv.capacity_factor(800., 293.15);
        let expected = 0.8 * 0.93 * (1. - 0.005 * (47. - 25.));
        assert!((cf - expected).abs() < 1e-9);

        // Standard test conditions
        let t_ambient = 25. + 273.15 - 1000. * 27. / 800.;
        let cf = pv.capacity_factor(1000., t_ambient);
        assert!((cf - 0.93).abs() < 1e-9);

        // No irradiance, no power
        assert_eq!(pv.capacity_factor(0., 280.), 0.);

        let series = pv.convert(&constant::<Irradiance>(800.), &constant::<Temperature>(293.15))?;
        assert!((series.decade_view(1)?[100] - expected).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_pv_model() -> Result<()> {
        let irradiance = constant::<Irradiance>(800.);
        let ambient = constant::<Temperature>(293.15);

        let simple = PvModel::default();
        assert!(!simple.needs_temperature());
        let a = simple.convert(&irradiance, None)?;
        let b = PvModule::default().convert(&irradiance);
        assert_eq!(a.decade_view(1)?, b.decade_view(1)?);

        let corrected = PvModel::TemperatureCorrected(TemperatureCorrectedPv::default());
        assert!(corrected.needs_temperature());
        assert!(matches!(corrected.convert(&irradiance, None), Err(Error::Config(_))));
        let cf = corrected.convert(&irradiance, Some(&ambient))?;
        assert!((cf.decade_view(1)?[0] - 0.8 * 0.93 * 0.89).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_deserialize() -> std::result::Result<(), String> {
        let turbine: WindTurbine = serde_json::from_str("{\"rated\": 12.0}").map_err(|e| e.to_string())?;
        assert_eq!(turbine.rated, 12.0);
        assert_eq!(turbine.cut_in, 3.0);

        let pv: PvModel = serde_json::from_str("{\"temperature-corrected\": {\"c1\": 0.9}}")
            .map_err(|e| e.to_string())?;
        match pv {
            PvModel::TemperatureCorrected(pv) => {
                assert_eq!(pv.c1, 0.9);
                assert_eq!(pv.h_test, 800.);
            }
            _ => return Err("expected the temperature-corrected model".to_string()),
        }

        assert!(serde_json::from_str::<HubHeight>("{\"height\": 12.0}").is_err());
        Ok(())
    }
}
