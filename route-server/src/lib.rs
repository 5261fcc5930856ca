//! Transit route server.
//!
//! Loads a network of stations and weighted connections, then answers:
//! "what is the best way from here to there, by time, cost or distance?"

pub mod config;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
