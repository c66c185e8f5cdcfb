//! Record hydration: binding tables, the field walker, and value decoding.

mod binding;
mod decode;
mod process;

pub use binding::{Binding, Hydrate};
pub use decode::{DecodeError, FromParam};
pub use process::process;
