pub mod capture;
pub mod error;
pub mod events;
pub mod machine;
pub mod output;
pub mod search;
pub mod session;
pub mod traits;

#[cfg(test)]
mod fakes;
