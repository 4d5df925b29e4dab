pub mod aggregate;
pub mod compare;
pub mod data_models;
pub mod errors;
pub mod filters;
pub mod parse;
pub mod report;
pub mod schema;
pub mod score;
pub mod session;

#[cfg(test)]
mod tests;
