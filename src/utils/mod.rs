pub mod database;
#[cfg(test)]
pub mod fixtures;
pub mod geo;
pub mod pagination;
pub mod storage;
pub mod validation;
