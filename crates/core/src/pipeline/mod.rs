pub mod capture_decision_use_case;
pub mod capture_event;
pub mod detection_coordinator;
pub mod infrastructure;
pub mod pipeline_logger;
