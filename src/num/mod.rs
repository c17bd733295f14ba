pub mod number;

pub use number::{format_float, format_number};
