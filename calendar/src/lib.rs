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

//! Gregorian calendar primitives for hourly reanalysis records.
//!
//! Records are organized as years, then months, then days of 24 hourly
//! samples. This crate knows how many days every month has on every year
//! (leap years included), and how to walk a range of years one hour at a
//! time. Months and days are counted from 1 (e.g. January is 1, not 0),
//! hours go from 0 to 23.
//!
//! # Interaction with Serde
//!
//! You can enable the `serde` feature and do stuff like this:
//!
//! ```ignore
//! use calendar::{Date, Month};
//! use serde_json; // import "serde_json" and enable feature "serde"
//!
//! let v = r#"{"year": 2010, "month": "Sep", "day": 4, "hour": 21}"#;
//! let d : Date = serde_json::from_str(&v).unwrap();
//! assert_eq!(d.month, Month::Sep);
//! assert_eq!(d.day, 4);
//! ```
//!
//! # Interaction with Chrono
//!
//! You can enable the `chrono` feature and transform a [`Date`] into
//! a `chrono::NaiveDateTime` through [`Date::into_naive_datetime`].

/// The number of hourly samples in a day.
pub const HOURS_PER_DAY: usize = 24;

mod month;
pub use crate::month::{days_in_year, is_leap_year, Month};

mod year_range;
pub use crate::year_range::YearRange;

mod date;
pub use crate::date::Date;

mod date_factory;
pub use crate::date_factory::HourIterator;
