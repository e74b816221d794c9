//! ERP Assistant - Natural-Language Query Agent
//!
//! This crate implements the conversational query agent of the ERP
//! application: free-text questions are answered by a reasoning oracle
//! that selects typed read-only tools over the record collections.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
