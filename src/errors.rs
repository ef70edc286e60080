use std::fmt;

#[derive(Debug, Clone)]
pub enum CitiesError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    /// The entity lacks the field a query needs (e.g. radius filter without a location)
    FieldError(String),
    /// The entity cannot take part in a distance computation at all
    TypeMismatch(String),
}

impl CitiesError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CitiesError::DatabaseConfig(_) => "E001",
            CitiesError::DatabaseConnection(_) => "E002",
            CitiesError::DatabaseOperation(_) => "E003",
            CitiesError::Validation(_) => "E004",
            CitiesError::NotFound(_) => "E005",
            CitiesError::Serialization(_) => "E006",
            CitiesError::FieldError(_) => "E007",
            CitiesError::TypeMismatch(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            CitiesError::DatabaseConfig(_) => "Database Configuration Error",
            CitiesError::DatabaseConnection(_) => "Database Connection Error",
            CitiesError::DatabaseOperation(_) => "Database Operation Error",
            CitiesError::Validation(_) => "Validation Error",
            CitiesError::NotFound(_) => "Resource Not Found",
            CitiesError::Serialization(_) => "Serialization Error",
            CitiesError::FieldError(_) => "Field Error",
            CitiesError::TypeMismatch(_) => "Type Mismatch",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CitiesError::DatabaseConfig(msg) => msg,
            CitiesError::DatabaseConnection(msg) => msg,
            CitiesError::DatabaseOperation(msg) => msg,
            CitiesError::Validation(msg) => msg,
            CitiesError::NotFound(msg) => msg,
            CitiesError::Serialization(msg) => msg,
            CitiesError::FieldError(msg) => msg,
            CitiesError::TypeMismatch(msg) => msg,
        }
    }

    /// Colored output for terminals
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CitiesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CitiesError {}

impl CitiesError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        CitiesError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CitiesError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CitiesError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CitiesError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CitiesError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        CitiesError::Serialization(msg.into())
    }

    pub fn field_error<T: Into<String>>(msg: T) -> Self {
        CitiesError::FieldError(msg.into())
    }

    pub fn type_mismatch<T: Into<String>>(msg: T) -> Self {
        CitiesError::TypeMismatch(msg.into())
    }
}

impl From<sea_orm::DbErr> for CitiesError {
    fn from(err: sea_orm::DbErr) -> Self {
        CitiesError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for CitiesError {
    fn from(err: serde_json::Error) -> Self {
        CitiesError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CitiesError>;
