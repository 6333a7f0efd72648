//! HvZ API - Backend for Humans vs Zombies, a live location-aware tag game
//!
//! This crate provides:
//! - Game lifecycle management (created, registration, active, ended, cancelled)
//! - Player registration with secret bite codes and single-use infection
//! - Maps with supplies, safezones and missions
//! - Geofenced, time-windowed, faction-gated visibility of points of interest

pub mod config;
pub mod db;
pub mod domain;
pub mod dto;
pub mod entities;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
