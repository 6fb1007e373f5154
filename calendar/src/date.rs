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

use crate::month::Month;
use crate::HOURS_PER_DAY;
use std::fmt;

#[cfg(feature = "chrono")]
use chrono::{NaiveDate, NaiveDateTime};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The date and hour of a single hourly sample.
///
/// Days are counted from 1, hours go from 0 to 23. Dates
/// are ordered chronologically (year, then month, then day, then hour).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Date {
    /// The calendar year
    pub year: i32,

    /// Month of the year
    pub month: Month,

    /// Day of the month, from 1 to N
    pub day: u8,

    /// Hour of the day, from 0 to 23
    pub hour: u8,
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{:02}/{:02} - {:02}:00",
            self.year,
            self.month.number(),
            self.day,
            self.hour
        )
    }
}

impl Date {
    /// Creates a new date, checking that the day exists in that month
    /// and year, and that the hour is within the day.
    pub fn new(year: i32, month: Month, day: u8, hour: u8) -> Result<Self, String> {
        let n_days = month.days_in(year);
        if day == 0 || day as usize > n_days {
            return Err(format!(
                "Day {} does not exist in {} {} (which has {} days)",
                day, month, year, n_days
            ));
        }
        if hour as usize >= HOURS_PER_DAY {
            return Err(format!("Hour {} is out of the day (0 to 23)", hour));
        }
        Ok(Self {
            year,
            month,
            day,
            hour,
        })
    }

    /// Transforms a Date into a `chrono` `NaiveDateTime`.
    #[cfg(feature = "chrono")]
    pub fn into_naive_datetime(self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, self.month.number() as u32, self.day as u32)?
            .and_hms_opt(self.hour as u32, 0, 0)
    }

    /// Moves the date one hour forward, changing the day, month
    /// and year when needed.
    pub fn add_hour(&mut self) {
        self.hour += 1;
        if self.hour as usize == HOURS_PER_DAY {
            self.hour = 0;
            self.add_days(1);
        }
    }

    /// Adds a certain number of hours to a date
    pub fn add_hours(&mut self, n_hours: usize) {
        let n_days = n_hours / HOURS_PER_DAY;
        self.add_days(n_days);
        for _ in 0..(n_hours % HOURS_PER_DAY) {
            self.add_hour();
        }
    }

    /// Adds a certain number of days to a date.
    pub fn add_days(&mut self, n_days: usize) {
        // Lets consume n_days month by month.
        let mut n_days = n_days;
        while n_days > 0 {
            let n_days_this_month = self.month.days_in(self.year);
            let would_be_day = self.day as usize + n_days;

            if would_be_day > n_days_this_month {
                // Jump to the first day of the next month
                n_days -= n_days_this_month - self.day as usize + 1;
                if self.month == Month::Dec {
                    self.year += 1;
                }
                self.month = self.month.next();
                self.day = 1;
            } else {
                // No change in month.
                self.day = would_be_day as u8;
                n_days = 0;
            }
        }
    }

    /// Checks whether two dates fall on the same day
    pub fn same_day(&self, other: Self) -> bool {
        self.year == other.year && self.month == other.month && self.day == other.day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        assert!(Date::new(2010, Month::Jan, 31, 23).is_ok());
        assert!(Date::new(2010, Month::Jan, 32, 0).is_err());
        assert!(Date::new(2010, Month::Jan, 0, 0).is_err());
        assert!(Date::new(2010, Month::Jan, 1, 24).is_err());
        assert!(Date::new(2010, Month::Feb, 29, 0).is_err());
        assert!(Date::new(2012, Month::Feb, 29, 0).is_ok());
        assert!(Date::new(1900, Month::Feb, 29, 0).is_err());
        assert!(Date::new(2000, Month::Feb, 29, 0).is_ok());
    }

    #[test]
    fn test_display() -> Result<(), String> {
        let d = Date::new(2010, Month::Apr, 3, 7)?;
        assert_eq!(format!("{}", d), "2010/04/03 - 07:00");
        Ok(())
    }

    #[test]
    fn compare_dates() -> Result<(), String> {
        let before = Date::new(2010, Month::Dec, 31, 23)?;
        let after = Date::new(2011, Month::Jan, 1, 0)?;
        assert!(before < after);

        let before = Date::new(2010, Month::Mar, 2, 23)?;
        let after = Date::new(2010, Month::Mar, 3, 0)?;
        assert!(before < after);

        let before = Date::new(2010, Month::Mar, 3, 5)?;
        let after = Date::new(2010, Month::Mar, 3, 6)?;
        assert!(before < after);
        assert!(after == after);
        Ok(())
    }

    #[test]
    fn test_add_days_within_month() -> Result<(), String> {
        let mut d = Date::new(2010, Month::Jan, 1, 5)?;
        d.add_days(10);
        assert_eq!(d, Date::new(2010, Month::Jan, 11, 5)?);
        Ok(())
    }

    #[test]
    fn test_add_days_changing_month() -> Result<(), String> {
        let mut d = Date::new(2010, Month::Jan, 30, 0)?;
        d.add_days(2);
        assert_eq!(d, Date::new(2010, Month::Feb, 1, 0)?);

        // Leap year
        let mut d = Date::new(2012, Month::Feb, 28, 0)?;
        d.add_days(1);
        assert_eq!(d, Date::new(2012, Month::Feb, 29, 0)?);
        d.add_days(1);
        assert_eq!(d, Date::new(2012, Month::Mar, 1, 0)?);

        // Non leap year
        let mut d = Date::new(2011, Month::Feb, 28, 0)?;
        d.add_days(1);
        assert_eq!(d, Date::new(2011, Month::Mar, 1, 0)?);
        Ok(())
    }

    #[test]
    fn test_add_days_changing_year() -> Result<(), String> {
        let mut d = Date::new(2010, Month::Dec, 31, 12)?;
        d.add_days(1);
        assert_eq!(d, Date::new(2011, Month::Jan, 1, 12)?);

        let mut d = Date::new(2011, Month::Jan, 1, 0)?;
        d.add_days(365);
        assert_eq!(d, Date::new(2012, Month::Jan, 1, 0)?);

        let mut d = Date::new(2012, Month::Jan, 1, 0)?;
        d.add_days(365);
        assert_eq!(d, Date::new(2012, Month::Dec, 31, 0)?);
        Ok(())
    }

    #[test]
    fn test_add_hours() -> Result<(), String> {
        let mut d = Date::new(2010, Month::Dec, 31, 22)?;
        d.add_hour();
        assert_eq!(d, Date::new(2010, Month::Dec, 31, 23)?);
        d.add_hour();
        assert_eq!(d, Date::new(2011, Month::Jan, 1, 0)?);

        let mut d = Date::new(2010, Month::Jan, 1, 0)?;
        d.add_hours(24 * 31 + 5);
        assert_eq!(d, Date::new(2010, Month::Feb, 1, 5)?);
        assert!(d.same_day(Date::new(2010, Month::Feb, 1, 23)?));
        Ok(())
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_serde() -> Result<(), String> {
        let v = r#"{"year": 2010, "month": "Sep", "day": 4, "hour": 21}"#;
        let d: Date = serde_json::from_str(v).map_err(|e| e.to_string())?;
        assert_eq!(d, Date::new(2010, Month::Sep, 4, 21)?);
        Ok(())
    }

    #[test]
    #[cfg(feature = "chrono")]
    fn test_into_naive_datetime() -> Result<(), String> {
        use chrono::{Datelike, Timelike};
        let d = Date::new(2012, Month::Feb, 29, 13)?;
        let n = d.into_naive_datetime().ok_or("could not build datetime")?;
        assert_eq!(n.year(), 2012);
        assert_eq!(n.month(), 2);
        assert_eq!(n.day(), 29);
        assert_eq!(n.hour(), 13);
        Ok(())
    }
}
