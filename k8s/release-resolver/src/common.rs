/// Contains the error handling tooling.
pub mod error;
