//! # vardump
//!
//! Deterministic, indented, type-annotated dumps of runtime values for
//! debugging.
//!
//! ```
//! use vardump::sdump;
//!
//! let text = sdump!(8i32, "ab").unwrap();
//! assert_eq!(text, "(i32) 8\n(string: 2) \"ab\"\n");
//! ```

pub mod config;
pub mod error;
pub mod renderer;
pub mod value;

#[cfg(test)]
mod tests;

use std::io::Write;

pub use config::{DumpConfig, UnsupportedPolicy, VisibilityMode};
pub use error::{DumpError, DumpResult};
pub use renderer::{type_name, Dumper, Render, RenderContext};
pub use value::{
    Channel, Complex, ComplexNumber, Field, FieldVisibility, Float, Inspect, Integer, Kind, Map,
    Record, Reference, ReferenceKey, Sequence, Value, Visit,
};

/// Prints every value to stdout with the default configuration.
///
/// Failures are logged rather than returned, so this stays usable as a
/// drop-in debugging statement.
pub fn dump(values: &[&dyn Inspect]) {
    if let Err(err) = Dumper::default().dump(values) {
        tracing::warn!(error = %err, "dump failed");
    }
}

/// Renders every value with the default configuration, one per line
pub fn sdump(values: &[&dyn Inspect]) -> DumpResult<String> {
    Dumper::default().sdump(values)
}

/// Writes the rendering of every value into `sink`, returning the byte count
pub fn fdump<W: Write + ?Sized>(sink: &mut W, values: &[&dyn Inspect]) -> DumpResult<usize> {
    Dumper::default().fdump(sink, values)
}

/// `dump!(a, b, ...)` prints any [`Inspect`] values to stdout
#[macro_export]
macro_rules! dump {
    ($($value:expr),+ $(,)?) => {
        $crate::dump(&[$(&$value as &dyn $crate::Inspect),+])
    };
}

/// `sdump!(a, b, ...)` renders any [`Inspect`] values into a `DumpResult<String>`
#[macro_export]
macro_rules! sdump {
    ($($value:expr),+ $(,)?) => {
        $crate::sdump(&[$(&$value as &dyn $crate::Inspect),+])
    };
}
