pub mod session;
pub mod status;
pub mod summary;

pub use session::{Session, TestCase};
pub use status::TestStatus;
pub use summary::{DutStats, OverallStats, StatusCounts, Summary};
