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

//! Assessment of the spatial and temporal complementarity of wind and
//! solar energy over a region.
//!
//! Hourly wind speeds and solar irradiances of a grid of sites (typically
//! a decade of reanalysis data) are converted into capacity factors, and
//! then compared:
//!
//! * at a single site, measuring the variability of each resource over
//!   hours, months and years, and how much of it disappears when both are
//!   blended in the best possible proportion;
//! * across sites, by correlating the output of pairs of sites and
//!   clustering sites whose output varies in the same way.
//!
//! The [`Assessment`] puts everything together.

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

/// Turns physical records into capacity factors
pub mod conversion;

/// Basic statistics
pub mod describe;

/// Statistics of a single resource at a single site
pub mod single_site;

/// Blending wind and solar at a single site
pub mod synergy;

/// Comparisons between sites
pub mod spatial;

/// Clustering of sites
pub mod cluster;

/// Configuration
pub mod options;
pub use options::AssessmentOptions;

/// The assessment of a region
pub mod assessment;
pub use assessment::{Assessment, SiteReport};

// Re-exports
pub use calendar::{Date, Month, YearRange, HOURS_PER_DAY};
pub use matrix::Matrix;
pub use resource::{
    CapacityFactor, Error, Irradiance, MemorySource, Quantity, ResourceSeries, ResourceSource,
    Result, SeriesBuilder, Site, Temperature, WindSpeed,
};
