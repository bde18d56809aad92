//! uif Engine
//!
//! Page sessions for the component loader: parse a page, scan it for
//! components, then route host events to dispatch and validation.
//!
//! # Example
//! ```rust,ignore
//! use uif_engine::{Engine, Config};
//!
//! let engine = Engine::new(Config::default());
//! let page = engine.open("<body><nav-bar></nav-bar></body>")?;
//! smol::block_on(page.load());
//! println!("{}", page.to_html(false));
//! ```

mod config;
mod engine;
mod page;

pub use config::Config;
pub use engine::{Engine, EngineError};
pub use page::Page;

// Re-export sub-crates
pub use uif_component as component;
pub use uif_dom as dom;
pub use uif_html as html;
pub use uif_net as net;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
