mod academic_group;
mod calendar;
mod conflict;
mod group;
mod ids;
mod input;
mod result;
mod room;
mod student;
mod subject;
mod teacher;
mod time_range;
mod weekday;

pub use academic_group::*;
pub use calendar::*;
pub use conflict::*;
pub use group::*;
pub use ids::*;
pub use input::*;
pub use result::*;
pub use room::*;
pub use student::*;
pub use subject::*;
pub use teacher::*;
pub use time_range::*;
pub use weekday::*;
