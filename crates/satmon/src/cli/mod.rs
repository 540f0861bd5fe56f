//! CLI module for saturdaymorning

pub mod error;
pub mod run;
