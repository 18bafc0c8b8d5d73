//! # CLI Module
//!
//! Command-line access to a routing tree described in a route table file.
//!
//! ## Commands
//!
//! ### `resolve`
//!
//! ```bash
//! nestrouter resolve --config routes.yaml /v1/users/7
//! ```
//!
//! ### `reverse`
//!
//! Names are qualified with the root namespace:
//!
//! ```bash
//! nestrouter reverse --config routes.yaml root:v1:users -p id=7
//! ```
//!
//! ### `routes`
//!
//! ```bash
//! nestrouter routes --config routes.yaml
//! ```
//!
//! ### `dispatch`
//!
//! Runs the full request path with echo handlers:
//!
//! ```bash
//! nestrouter dispatch --config routes.yaml /v1/users/7
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use nestrouter::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(&cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{load_echo_router, run_cli, Cli, Commands};
