//! Oxidiff: linear-space Myers sequence alignment in Rust.
//!
//! The crate provides:
//! - The aligner: Myers' O(ND) algorithm producing per-element change markers (`align`)
//! - Edit scripts built from those markers (`script`)
//! - Context-padded hunks over an edit script (`hunk`)
//! - High-level byte, line and generic entry points (`engine`)
//! - File-oriented helpers (`io`)
//! - An optional CLI (`cli` feature)
//!
//! # Quick Start
//!
//! ```
//! use oxidiff::engine::{diff_lines, DiffOptions};
//! use oxidiff::script::Edit;
//!
//! let d = diff_lines("line1\nline2\nline3", "line1\nmodified\nline3", &DiffOptions::default()).unwrap();
//! assert_eq!(
//!     d.edits,
//!     [
//!         Edit::Match("line1\n"),
//!         Edit::Delete("line2\n"),
//!         Edit::Insert("modified\n"),
//!         Edit::Match("line3"),
//!     ]
//! );
//! assert_eq!(d.hunks().len(), 1);
//! ```

pub mod align;
pub mod engine;
pub mod error;
pub mod hunk;
pub mod io;
pub mod script;

#[cfg(feature = "cli")]
pub mod cli;

pub use align::{Aligner, ResultVectors, align, align_by};
pub use error::{DiffError, Result};
pub use hunk::{Hunk, assemble_hunks, group_hunks};
pub use script::{Edit, build_edit_script};
