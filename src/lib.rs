//! Lab Scheduler - round-robin laboratory session scheduling engine
//!
//! This library schedules university laboratory sessions: given a
//! subject's weekly time grid, its enrolled students, and a semester's
//! calendar, it produces lab group rosters with assigned teacher,
//! room, and meeting dates.
//!
//! # Algorithm overview
//!
//! The engine runs in five stages:
//! 1. **Input Normalizer**: canonicalizes time ranges, dates, and the
//!    weekly schedule grid's legacy cell shapes.
//! 2. **Enrollment Index**: builds `(academic-group, subject) ->
//!    students` once per run.
//! 3. **Resource Tracker**: the shared mutable store of teacher/room
//!    occupancy and load counters.
//! 4. **Subject Planner**: per subject, creates group shells, selects
//!    teachers and rooms, distributes students with parity balancing.
//! 5. **Date Interleaver**: round-robin distribution of concrete
//!    meeting dates across a subject's groups.
//!
//! # Example
//!
//! ```no_run
//! use lab_scheduler::parser::load_config;
//! use lab_scheduler::planificar::ejecutar;
//! use lab_scheduler::types::PlanningConfig;
//! use std::path::Path;
//!
//! let document = load_config(Path::new("configuracion_labs.json")).unwrap();
//! let result = ejecutar(document, &PlanningConfig::default());
//! ```

pub mod enrollment;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod planificar;
pub mod planner;
pub mod reporter;
pub mod tracker;
pub mod types;

pub use error::{PlanningError, Result};
