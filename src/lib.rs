//! Crossword Together - collaborative real-time crossword solving.
//!
//! This crate builds annotated crossword grids from clue entries and relays
//! every participant's cell edits to everyone else solving the same grid.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
