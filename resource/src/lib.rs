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

#![deny(missing_docs)]

//! Hourly resource records (wind speed, solar irradiance, ambient temperature
//! and the capacity factors derived from them) for a grid of sites over a
//! range of years.
//!
//! Records come from a [`ResourceSource`] as one `[days x 24]` block per site,
//! year and month, and are kept as a [`ResourceSeries`]: one chronological row
//! per site. Month-, year- and decade-style views are borrowed slices of that
//! row, so reshaping never copies, reorders or drops a sample.
//!
//! Sites are referred to by their 1-based ordinal (i.e., the first site is `1`).

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The errors produced when building or querying records
pub mod error;
pub use error::{Error, Result};

/// The physical quantities a series can hold
pub mod quantity;
pub use quantity::{CapacityFactor, Irradiance, Quantity, Temperature, WindSpeed};

/// Location of the sites
pub mod site;
pub use site::Site;

/// The main container of hourly records
pub mod series;
pub use series::ResourceSeries;

/// Assembles series one month at a time
pub mod builder;
pub use builder::SeriesBuilder;

/// Where the hourly records come from
pub mod source;
pub use source::{MemorySource, ResourceSource};

pub use calendar::{Month, YearRange, HOURS_PER_DAY};
