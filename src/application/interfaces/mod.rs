/// Scan service interface
pub mod scan;
