//! Form domain layer
//!
//! Schema types for form definitions plus the pure evaluators that run on
//! every change: visibility, wizard steps, progress and validation. The
//! wizard reducer in `form_state` ties them together.

mod definition;
mod field;
mod form_state;
mod progress;
mod steps;
mod validation;
mod value;
mod visibility;

pub use definition::{DefinitionError, FormDefinition, FormSection};
pub use field::{
    AutocompleteConfig, FieldOption, FieldType, FormField, Shortcut, ShowWhen, Subsection,
    Validation,
};
pub use form_state::{FieldView, WizardEvent, WizardState};
pub use progress::{progress, progress_with_policy, ProgressPolicy};
pub use steps::{build_steps, visible_steps, WizardStep};
pub use validation::{
    validate_all, DateRule, FieldRule, FieldValidator, NumericRule, ValidationContext,
    ValidationErrors, MSG_FUTURE_DATE, MSG_INVALID_DATE, MSG_INVALID_FORMAT, MSG_NOT_A_NUMBER,
    MSG_REQUIRED,
};
pub use value::{
    as_number, format_number, is_blank, is_filled, is_truthy, loose_string, loosely_equal,
    FormValues,
};
pub use visibility::{condition_holds, is_visible, visible_fields};
