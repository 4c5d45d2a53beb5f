//! The scrubbing engine and its supporting types.
//!
//! This module provides the machinery for replacing sensitive fields in a
//! log payload before it is encoded:
//!
//! - **`value`**: The closed variant tree (`Value`, `Scalar`, `MapKey`,
//!   `Field`) the engine traverses.
//! - **`engine`**: The traversal itself (`Scrubber`, `FieldSet`,
//!   `FaultPolicy`, the `***scrubbed***` marker).
//! - **`convert`**: Per-type adapters (`Scrubbable`, `ScrubKey`) that turn
//!   caller data into the tree.
//! - **`fields`**: The ordered payload type (`Fields`) and the `fields!`
//!   macro.
//! - **`json`** (feature `json`): the `serde_json::Value` bridge.

mod convert;
mod engine;
mod fields;
#[cfg(feature = "json")]
mod json;
mod value;

pub use convert::{ScrubKey, Scrubbable};
pub use engine::{FaultPolicy, FieldSet, SCRUBBED_PLACEHOLDER, Scrubber};
pub use fields::Fields;
pub use value::{Field, MapKey, Scalar, Value};
