// Domain layer - Portal view models and client-side rules
pub mod analytics;
pub mod application;
pub mod candidate;
pub mod dashboard;
pub mod job;
pub mod theme;
pub mod view;
