//! Usage Service - Raw usage window computation for arrears usage invoicing.

pub mod config;
pub mod models;
pub mod services;
pub mod startup;
