pub mod field_service;
pub mod form_builder_service;
pub mod form_processor_service;
