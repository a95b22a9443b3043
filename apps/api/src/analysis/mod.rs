//! Resume analysis: static criteria, scoring, and the HTTP handlers that tie
//! extraction and scoring together.

pub mod criteria;
pub mod handlers;
pub mod scoring;
pub mod service;
