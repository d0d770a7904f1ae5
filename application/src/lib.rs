pub mod rag_service;
pub mod verification_service;
