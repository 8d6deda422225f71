//! Tenure intervals: inclusive date ranges that can be merged per key and rendered
//! as short, human-readable strings.

pub mod date_format;
pub mod grouping;
pub mod interval;
pub mod interval_set;
pub mod serde;

pub use date_format::{DateFormat, DateStyle, Locale};
pub use grouping::{format_grouped, format_grouped_with, group_and_simplify};
pub use interval::Interval;
pub use interval_set::{MultiInterval, simplify};

use eyre::{OptionExt as _, Result};

/// Extension trait for `Option<T>`
pub trait OptionExt<T> {
    /// Convert None to an error
    fn some(self) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn some(self) -> Result<T> {
        self.ok_or_eyre("Expected Some but got None")
    }
}

