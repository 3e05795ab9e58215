//! Coverform - conditional form engine for insurance comparison wizards
//!
//! The engine takes a declarative form definition and a map of current
//! values and derives everything a wizard UI needs: which fields are
//! visible, how they group into steps, which ones are invalid, how far the
//! user got, and finally the normalized payload the backend accepts.
//!
//! ```
//! use coverform::state::{FieldType, FormDefinition, FormField, WizardEvent, WizardState};
//!
//! let definition = FormDefinition::from_fields(
//!     "auto",
//!     vec![
//!         FormField::new("usageType", "Usage", FieldType::Select)
//!             .required()
//!             .subsection("usage", "Usage"),
//!         FormField::new("workPostalCode", "Work postal code", FieldType::Text)
//!             .required()
//!             .show_when_in("usageType", ["private_work", "private_tours"])
//!             .subsection("usage", "Usage"),
//!     ],
//! );
//!
//! let state = WizardState::new(&definition).apply(WizardEvent::changed("usageType", "private_work"));
//! assert!(state.errors.contains_key("workPostalCode"));
//! assert_eq!(state.progress, 50.0);
//! ```

pub mod backend;
pub mod config;
pub mod normalize;
pub mod state;

pub use backend::{
    prepare_submission, submit_wizard, BackendClient, BackendClientTrait, ComparisonResponse,
    GatewayError, SubmissionError, SubmissionRequest,
};
pub use config::{ApiSettings, AppConfig};
pub use normalize::{normalize, normalize_with_report, BackendPayload, Category};
pub use state::{FormDefinition, FormField, FormValues, WizardEvent, WizardState};
