//! Builder style entry points, `prepare()` a task, configure it and `execute()`.

pub mod hide;
pub mod unveil;
