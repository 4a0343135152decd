pub mod config;
pub mod fare;
pub mod places;
pub mod run;
pub mod tutorial;
