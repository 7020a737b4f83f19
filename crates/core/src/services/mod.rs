pub mod event_service;
pub mod history_service;
pub mod overview_service;
