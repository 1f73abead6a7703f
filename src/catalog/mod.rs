//! Course catalog records and their tabular source.
//!
//! A catalog is read once at startup from a CSV export of the course
//! table and never modified afterwards.

mod loader;
mod record;

pub use loader::{load_courses, parse_courses};
pub use record::{CourseRecord, Language};
