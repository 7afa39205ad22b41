//! Croma Token Configuration
//!
//! The strongly-typed data model for croma theme configurations:
//!
//! - **Decode**: a raw JSON theme configuration becomes a [`TokenConfig`]
//!   exactly once, including one-shot color classification into the
//!   [`ColorValue`] tagged union; downstream code never re-inspects raw
//!   shapes.
//! - **Validation**: top-level categories are checked against the canonical
//!   set; overrides may change values but never introduce new categories.
//! - **Subset projection**: [`subset`] extracts partial views out of any
//!   configuration-shaped JSON tree for consumers that only need a slice.
//!
//! # Example
//!
//! ```rust
//! use croma_tokens::{ColorValue, TokenConfig};
//!
//! let config = TokenConfig::from_json_str(
//!     r##"{ "colors": { "text": "#000000", "primary": [75, 67, 190] } }"##,
//! )
//! .unwrap();
//!
//! assert_eq!(
//!     config.colors.get("primary"),
//!     Some(&ColorValue::RgbTriplet(75, 67, 190))
//! );
//! ```

pub mod breakpoints;
pub mod color_value;
pub mod config;
pub mod error;
pub mod font_size;
pub mod scalar;
pub mod subset;

pub use breakpoints::{Breakpoint, Breakpoints};
pub use color_value::ColorValue;
pub use config::{LayoutConfig, LayoutMax, TokenConfig, TokenMap, Viewports};
pub use error::ConfigError;
pub use font_size::{FontSizeEntry, TextBreakpointValue, TextProperty};
pub use scalar::{format_number, ScalarValue, ScaleValue};
pub use subset::{subset, Selector, SelectorEntry};
