//! Pretty-printed value dumps for error details.

use std::fmt::Debug;

/// A value that can be dumped into an error's details.
///
/// Implemented for every `Debug` type. A dump is the value's type name in
/// parentheses followed by its pretty `Debug` form and a newline.
///
/// # Examples
///
/// ```
/// use herror::Dump;
///
/// assert_eq!(42u8.dump(), "(u8) 42\n");
/// ```
pub trait Dump {
    /// Fully qualified name of the value's type.
    fn type_name(&self) -> &'static str;

    /// The `(type) value` block for this value.
    fn dump(&self) -> String;
}

impl<T: Debug + ?Sized> Dump for T {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn dump(&self) -> String {
        format!("({}) {:#?}\n", self.type_name(), self)
    }
}
