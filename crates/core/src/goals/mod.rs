//! Goals module - savings goals and their contributions.

mod goals_model;
mod goals_service;
mod goals_traits;

pub use goals_model::{
    Goal, GoalContribution, GoalUpdate, NewGoal, NewGoalContribution,
    GOAL_REQUIRED_FIELDS_MESSAGE, INVALID_CONTRIBUTION_MESSAGE,
};
pub use goals_service::GoalService;
pub use goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
