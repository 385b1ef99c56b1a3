//! Rusty-Forms-Validation
//!
//! Pure field predicates used to build `rusty-forms` validator rules.
//! Every check takes the field's text and answers whether it is acceptable;
//! message-producing checks return `Result<(), String>`.
//!
//! Empty input is the engine's business (required / optional rules), so these
//! functions are never consulted for an empty optional field.

pub mod email;
pub mod numeric;
pub mod password;
pub mod string;

// Re-export all validators
pub use email::*;
pub use numeric::*;
pub use password::*;
pub use string::*;
