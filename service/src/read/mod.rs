//! Read entities definitions.

pub mod statistics;

pub use self::statistics::Statistics;
