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

use thiserror::Error;

/// Everything that can go wrong when assembling, reshaping or
/// analysing hourly records.
#[derive(Debug, Error)]
pub enum Error {
    /// A (site, year, month) block is missing, or it does not have
    /// the number of days and hours the calendar says it should; or
    /// two series that should be keyed identically are not.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A statistic was asked to divide by a zero mean, a zero standard
    /// deviation or a zero range.
    #[error("degenerate series: {0}")]
    DegenerateSeries(String),

    /// A site ordinal, year, month or day outside of the configured ranges
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// A malformed options or data file
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing a file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `Result` whose error is [`Error`]
pub type Result<T> = std::result::Result<T, Error>;
