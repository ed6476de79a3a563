// Application layer - Use cases driving the portal views
pub mod application_service;
pub mod dashboard_service;
pub mod portal_repository;
pub mod theme_preference;
pub mod view_controller;
