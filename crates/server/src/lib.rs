pub mod config;
pub mod error;
pub mod pipeline;
pub mod response;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;
