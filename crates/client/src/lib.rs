pub mod api;
pub mod orchestrator;
pub mod poller;
pub mod token;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::*;
pub use orchestrator::*;
pub use poller::*;
pub use token::*;
