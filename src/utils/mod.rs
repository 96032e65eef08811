//! Utility modules for the route planner.

pub mod slug;
