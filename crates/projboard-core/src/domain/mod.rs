//! Domain model (ids, projects, snapshots, validation, form input, errors).

pub mod ids;
pub mod project;
pub mod events;
pub mod snapshot;
pub mod validation;
pub mod form;
pub mod errors;

pub use self::ids::{Id, IdMarker, IdParseError, ProjectId};
pub use self::project::{NewProject, Project, ProjectStatus, UnknownStatus};
pub use self::events::BoardEvent;
pub use self::snapshot::Snapshot;
pub use self::validation::{InputValue, Validatable, Violation, check, validate};
pub use self::form::{FormError, FormErrorKind, FormField, FormRules, ProjectForm};
pub use self::errors::{BoardError, IdError};
