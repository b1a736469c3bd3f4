// src/lib.rs

//! Fellcast: Lake District mountain weather refresh library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(feature = "lambda")]
pub mod lambda;
