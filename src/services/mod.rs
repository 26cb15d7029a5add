pub mod pipeline;
pub mod region_service;
