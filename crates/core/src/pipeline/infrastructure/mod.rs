pub mod threaded_detection_coordinator;
