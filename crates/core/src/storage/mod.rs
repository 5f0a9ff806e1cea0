//! Object storage for uploaded documents using Apache OpenDAL.
//!
//! Two backends are supported:
//! - S3-compatible: Cloudflare R2, Supabase Storage, AWS S3
//! - Local filesystem
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │               Apache OpenDAL                 │
//! ├──────────────────────────────────────────────┤
//! │ op.write("key", data)   │ op.stat("key")     │
//! │ op.read("key")          │ op.delete("key")   │
//! └──────────────────────────────────────────────┘
//! ```

mod error;
mod service;

pub use error::StorageError;
pub use service::StorageService;
