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

use crate::date::Date;
use crate::month::{days_in_year, Month};
use crate::HOURS_PER_DAY;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An inclusive range of calendar years (e.g., 2006 to 2015)
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct YearRange {
    /// The first year of the range
    pub start: i32,

    /// The last year of the range (included)
    pub end: i32,
}

impl YearRange {
    /// Creates a new `YearRange`. Fails if `end` comes before `start`.
    pub fn new(start: i32, end: i32) -> Result<Self, String> {
        if end < start {
            return Err(format!(
                "Year range ends ({}) before it starts ({})",
                end, start
            ));
        }
        Ok(Self { start, end })
    }

    /// The number of years in the range
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Checks whether a year is within the range
    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    /// The position of `year` within the range, starting at 0
    pub fn offset(&self, year: i32) -> Option<usize> {
        if self.contains(year) {
            Some((year - self.start) as usize)
        } else {
            None
        }
    }

    /// Iterates the years, earliest first
    pub fn iter(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }

    /// The total number of hours covered by the range
    pub fn hours(&self) -> usize {
        self.iter().map(|y| days_in_year(y) * HOURS_PER_DAY).sum()
    }

    /// Retrieves the [`Date`] of the `i`-th hour of the range, counting
    /// from 0 at midnight of January 1st of the first year.
    ///
    /// Returns `None` if the range has fewer hours than that.
    pub fn date_at(&self, i: usize) -> Option<Date> {
        let mut remaining = i;
        for year in self.iter() {
            let year_hours = days_in_year(year) * HOURS_PER_DAY;
            if remaining >= year_hours {
                remaining -= year_hours;
                continue;
            }
            for month in Month::ALL {
                let month_hours = month.days_in(year) * HOURS_PER_DAY;
                if remaining < month_hours {
                    return Some(Date {
                        year,
                        month,
                        day: (1 + remaining / HOURS_PER_DAY) as u8,
                        hour: (remaining % HOURS_PER_DAY) as u8,
                    });
                }
                remaining -= month_hours;
            }
        }
        None
    }
}

impl IntoIterator for YearRange {
    type Item = i32;
    type IntoIter = std::ops::RangeInclusive<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.start..=self.end
    }
}
