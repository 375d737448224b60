// Domain layer - Pure chart aggregation types and algorithms
pub mod dashboard;
pub mod record;
pub mod series;
