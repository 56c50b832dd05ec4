pub mod analysis;
pub mod course;
pub mod review;

pub use analysis::{CourseSummary, ScheduleAnalysis};
pub use course::{CourseInput, CourseRef, SectionInfo};
pub use review::{ResearchBundle, ReviewRecord};

// Include tests
#[cfg(test)]
mod tests;
