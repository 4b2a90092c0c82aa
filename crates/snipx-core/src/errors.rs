use thiserror::Error;

/// Result type alias using SnipError
pub type Result<T> = std::result::Result<T, SnipError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure in SnipX is classified into one of these kinds. The web
/// layer decides the user-visible outcome from the kind alone, so adding a
/// kind means deciding how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    InvalidCredentials,

    // Lookup
    NotFound,
    AlreadyExists,

    // Access
    Unauthorised,
    Forbidden,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidCredentials => "ERR_INVALID_CREDENTIALS",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::Unauthorised => "ERR_UNAUTHORISED",
            ExErrorKind::Forbidden => "ERR_FORBIDDEN",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the kind belongs to the silent-deny class.
    ///
    /// Missing entities and forbidden access are reported identically to
    /// the requester.
    pub fn is_silent_deny(&self) -> bool {
        matches!(self, ExErrorKind::NotFound | ExErrorKind::Forbidden)
    }
}

/// A single field-level validation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// for logs. Store and engine functions return this type.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    field_errors: Vec<FieldError>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            field_errors: Vec::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach field-level validation messages
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.field_errors = errors;
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field-level messages (empty unless kind is InvalidInput)
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        for field_error in &self.field_errors {
            write!(f, " [{}]", field_error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain error taxonomy for SnipX operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnipError {
    // ===== Lookup Errors =====
    /// Snippet id does not exist
    #[error("Snippet not found: {snippet_id}")]
    SnippetNotFound { snippet_id: i64 },

    /// Language slug does not exist in the catalog
    #[error("Language not found: {slug}")]
    LanguageNotFound { slug: String },

    /// Username does not exist
    #[error("User not found: {username}")]
    UserNotFound { username: String },

    // ===== Access Errors =====
    /// Requester identity does not permit the action
    #[error("Access denied for action {action}")]
    AccessDenied { action: String },

    /// Action requires an authenticated requester
    #[error("Authentication required for action {action}")]
    AuthenticationRequired { action: String },

    /// Username/password pair did not match
    #[error("Invalid username or password")]
    InvalidCredentials,

    // ===== Validation Errors =====
    /// Submitted snippet form failed validation
    #[error("Invalid snippet draft: {} field error(s)", errors.len())]
    InvalidDraft { errors: Vec<FieldError> },

    /// Slug contains characters that are not URL-safe
    #[error("Invalid slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: String },

    /// Username is not usable as a URL segment
    #[error("Invalid username '{username}': {reason}")]
    InvalidUsername { username: String, reason: String },

    // ===== Generic Errors =====
    /// Password hashing backend failure
    #[error("Credential error: {message}")]
    Credential { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<SnipError> for ExError {
    fn from(err: SnipError) -> Self {
        match err {
            SnipError::SnippetNotFound { snippet_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(snippet_id.to_string())
                .with_message("Snippet not found"),

            SnipError::LanguageNotFound { slug } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(slug)
                .with_message("Language not found"),

            SnipError::UserNotFound { username } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(username)
                .with_message("User not found"),

            SnipError::AccessDenied { action } => ExError::new(ExErrorKind::Forbidden)
                .with_op(action)
                .with_message("Access denied"),

            SnipError::AuthenticationRequired { action } => {
                ExError::new(ExErrorKind::Unauthorised)
                    .with_op(action)
                    .with_message("Authentication required")
            }

            SnipError::InvalidCredentials => ExError::new(ExErrorKind::InvalidCredentials)
                .with_op("login")
                .with_message("Invalid username or password"),

            SnipError::InvalidDraft { errors } => ExError::new(ExErrorKind::InvalidInput)
                .with_message("Invalid snippet draft")
                .with_field_errors(errors),

            SnipError::InvalidSlug { slug, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity_id(slug)
                .with_message(format!("Invalid slug: {}", reason)),

            SnipError::InvalidUsername { username, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_entity_id(username)
                    .with_message(format!("Invalid username: {}", reason))
            }

            SnipError::Credential { message } => ExError::new(ExErrorKind::Internal)
                .with_op("credentials")
                .with_message(message),

            SnipError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}
