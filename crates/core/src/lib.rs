//! Core business logic for the studio back office.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence is reached through the repository traits each module defines.
//!
//! # Modules
//!
//! - `analytics` - Dashboard metrics, trends, forecasts and insights
//! - `documents` - Upload validation and document records
//! - `signature` - Signature block templates
//! - `storage` - Object storage through OpenDAL

pub mod analytics;
pub mod documents;
pub mod signature;
pub mod storage;
