pub mod document_service;
pub mod import_service;
pub mod preview_service;
