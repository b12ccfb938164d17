pub mod ids;
pub mod io;
pub mod log;
pub mod stats;
pub mod task;

pub use ids::{IdError, LogId, TaskId, UserId};
pub use io::{NewStudyLog, NewStudyTask};
pub use log::StudyLogRecord;
pub use stats::{DailyTotal, DayBucket, Overview, RankingEntry, SubjectTotal};
pub use task::StudyTask;
