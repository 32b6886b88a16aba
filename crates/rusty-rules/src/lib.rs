//! Rusty-Rules
//!
//! Declarative, rule-based form validation. Fields declare their rules as
//! strings such as `required|min_length[5]|equal_to[password,Password]`;
//! a [`Validator`] parses them once and evaluates them against any
//! [`FormSnapshot`], producing one verdict per field.
//!
//! ```
//! use rusty_rules::{FieldSpec, FormValues, MessageCatalog, Validator};
//!
//! let validator = Validator::new(
//!     [
//!         FieldSpec::new("email", "required|email").label("Email"),
//!         FieldSpec::new("age", "integer|greater_than_equal_to[18]").label("Age"),
//!     ],
//!     MessageCatalog::default(),
//! )
//! .unwrap();
//!
//! let values = FormValues::new()
//!     .with_value("email", "ada@example.com")
//!     .with_value("age", "17");
//!
//! let report = validator.evaluate_form(&values);
//! assert!(!report.is_valid());
//! assert_eq!(report.errors[0].message, "Age requires a value greater than or equal to 18");
//! ```

pub mod date;
pub mod error;
pub mod message;
pub mod patterns;
pub mod rule;

// Parsing and evaluation
pub mod engine;
pub mod field;
pub mod parser;
pub mod report;

// Construction
pub mod options;
pub mod validator;

pub use engine::{ErrorResult, FieldVerdict, SuccessResult};
pub use error::{ConfigError, ConfigErrors, FormatError, RuleError};
pub use field::{
    FieldDeclaration, FieldInput, FieldKind, FieldSpec, FieldState, FormSnapshot, FormValues,
    GroupMember,
};
pub use message::{MessageCatalog, MessageKey};
pub use options::{DisplayOptions, ErrorDisplay};
pub use patterns::Pattern;
pub use report::FormReport;
pub use rule::{ParsedRule, RuleName, RuleParam};
pub use validator::{Validator, ValidatorBuilder};
