//! # sdk-codegen
//!
//! A CLI tool and library for generating client bindings and reference docs
//! from an SDK `api.json` schema.
//!
//! The schema describes modules, their types and functions. From it this crate produces:
//! - **TypeScript bindings**: type declarations, variant constructors and one
//!   class per module whose methods call an injected transport.
//! - **Markdown reference**: an index and one page per module.
//!
//! ## Usage
//!
//! Although primarily used as a CLI tool, you can also use it as a library:
//!
//! ```rust,no_run
//! use sdk_codegen::config::Config;
//! use sdk_codegen::pipeline::Pipeline;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default_config();
//!     let pipeline = Pipeline::new(false);
//!     pipeline.run(&config)?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod known_types;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod utils;
