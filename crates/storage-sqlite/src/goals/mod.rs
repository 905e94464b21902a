//! SQLite storage implementation for goals and their contributions.

mod model;
mod repository;

pub use model::{GoalContributionDB, GoalDB};
pub use repository::GoalRepository;
