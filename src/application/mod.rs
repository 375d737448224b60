// Application layer - Use cases and the upstream fetch seam
pub mod chart_service;
pub mod record_repository;
