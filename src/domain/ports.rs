use crate::utils::error::Result;
use chrono::NaiveDate;
use std::io::Write;

/// A single-pass tool run: read the input, compute, print the result.
pub trait Pipeline {
    type Extracted;
    type Transformed;

    fn extract(&self) -> Result<Self::Extracted>;
    fn transform(&self, data: Self::Extracted) -> Result<Self::Transformed>;
    fn load(&self, result: Self::Transformed, out: &mut dyn Write) -> Result<()>;
}

/// Source of "today" for anything that defaults to the current month.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
