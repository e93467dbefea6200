//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Storage layout
// =============================================================================

/// Top-level collection holding one document per user
pub const USERS_COLLECTION: &str = "users";

/// Per-user sub-collection holding interview records
pub const INTERVIEWS_COLLECTION: &str = "interviews";

/// Default on-disk snapshot used by the file-backed store
pub const DEFAULT_DATA_FILE: &str = "interviews.json";

// =============================================================================
// Navigation
// =============================================================================

/// View shown after an interview is created
pub const LIST_VIEW_PATH: &str = "/list";

// =============================================================================
// Interview fields
// =============================================================================

pub const FIELD_ID: &str = "id";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_RESULT: &str = "result";
pub const FIELD_STAGES: &str = "stages";
pub const FIELD_COMPANY: &str = "company";
pub const FIELD_VACANCY_LINK: &str = "vacancyLink";
pub const FIELD_HR_NAME: &str = "hrName";
pub const FIELD_CONTACT_TELEGRAM: &str = "contactTelegram";
pub const FIELD_CONTACT_WHATSAPP: &str = "contactWhatsApp";
pub const FIELD_CONTACT_PHONE: &str = "contactPhone";
pub const FIELD_SALARY_FROM: &str = "salaryFrom";
pub const FIELD_SALARY_TO: &str = "salaryTo";

/// Fields assigned by the repository and never taken from a payload
pub const RESERVED_FIELDS: &[&str] = &[FIELD_ID, FIELD_CREATED_AT];

// =============================================================================
// Stage fields
// =============================================================================

pub const STAGE_FIELD_NAME: &str = "name";
pub const STAGE_FIELD_DATE: &str = "date";
pub const STAGE_FIELD_DESCRIPTION: &str = "description";

// =============================================================================
// Interview results
// =============================================================================

/// Result stamped on every newly created interview
pub const RESULT_REFUSAL: &str = "Refusal";

pub const RESULT_OFFER: &str = "Offer";
