//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between the
//! HTTP boundary and the email collaborator.

mod lead_service;

pub use lead_service::LeadService;
