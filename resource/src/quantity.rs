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

/// A physical quantity stored in a [`crate::ResourceSeries`].
///
/// Quantities are zero-sized markers: they only exist so that the
/// compiler does not let a wind speed be used where a capacity factor
/// was expected.
pub trait Quantity: Copy + Clone + std::fmt::Debug + PartialEq {
    /// A human-readable name
    const NAME: &'static str;

    /// The units of the values
    const UNITS: &'static str;
}

/// Wind speed, in m/s
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindSpeed;

impl Quantity for WindSpeed {
    const NAME: &'static str = "wind speed";
    const UNITS: &'static str = "m/s";
}

/// Global horizontal solar irradiance, in W/m2
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Irradiance;

impl Quantity for Irradiance {
    const NAME: &'static str = "solar irradiance";
    const UNITS: &'static str = "W/m2";
}

/// Ambient (dry bulb) temperature, in K
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Temperature;

impl Quantity for Temperature {
    const NAME: &'static str = "ambient temperature";
    const UNITS: &'static str = "K";
}

/// Generated power divided by rated power. Dimensionless.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CapacityFactor;

impl Quantity for CapacityFactor {
    const NAME: &'static str = "capacity factor";
    const UNITS: &'static str = "-";
}
