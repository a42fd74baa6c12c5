//! Course timetable enumeration for the U-Engine ecosystem.
//!
//! Given a catalog of subjects, each offering several groups (a teacher
//! plus weekly time blocks), finds every way to take `k` subjects with one
//! group each such that no two chosen groups meet at the same time.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `TimeBlock`, `Group`, `Subject`,
//!   `Schedule`
//! - **`scheduler`**: Lazy brute-force search (`Scheduler`, `Schedules`) and
//!   `SearchStats`
//! - **`validation`**: Catalog integrity checks (duplicate subjects, empty subjects)
//! - **`catalog`**: JSON catalog documents, loader and bundled demo catalog
//! - **`error`**: `ScheduleError`, the error type shared by models and search
//!
//! # Example
//!
//! ```
//! use u_timetable::catalog::demo_catalog;
//! use u_timetable::scheduler::enumerate_schedules;
//!
//! let catalog = demo_catalog().unwrap();
//! let first = enumerate_schedules(&catalog, 4).unwrap().next().unwrap();
//! assert_eq!(first.len(), 4);
//! println!("{first}");
//! ```

pub mod catalog;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
