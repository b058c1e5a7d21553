pub mod actuals_service;
pub mod budget_service;
pub mod coverage;
pub mod dto;
pub mod pipeline_service;
pub mod projection;
pub mod source_service;
