pub mod containment_gate;
pub mod outline_region;
