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
use crate::month::Month;
use crate::year_range::YearRange;

/// Walks every hour of a [`YearRange`], in chronological order,
/// starting at midnight of January 1st of the first year.
#[derive(Clone, Copy, Debug)]
pub struct HourIterator {
    /// The last year to be visited
    end_year: i32,

    /// The next date to be returned
    current: Option<Date>,
}

impl HourIterator {
    /// Creates an iterator over all the hours in `range`
    pub fn new(range: YearRange) -> Self {
        Self {
            end_year: range.end,
            current: Some(Date {
                year: range.start,
                month: Month::Jan,
                day: 1,
                hour: 0,
            }),
        }
    }
}

impl Iterator for HourIterator {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        let ret = self.current?;
        let mut new = ret;
        new.add_hour();
        self.current = if new.year > self.end_year {
            None
        } else {
            Some(new)
        };
        Some(ret)
    }
}
