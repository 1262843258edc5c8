use thiserror::Error;

/// Recoverable engine failures. Everything here happens at load/config time;
/// a failed catalog load never touches the running grid.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("element catalog is not valid JSON: {0}")]
    CatalogParse(#[source] serde_json::Error),

    #[error("element `{name}` is invalid: {reason}")]
    InvalidElement { name: String, reason: String },

    #[error("generator `{element}` references unknown material `{material}`")]
    UnknownGeneratedMaterial { element: String, material: String },

    #[error("{role} product `{name}` is not in the catalog")]
    MissingReactionProduct { role: &'static str, name: String },

    #[error("no element name contains `{pattern}`")]
    NoDefaultSelection { pattern: String },

    #[error("catalog has {0} elements, at most 255 fit in a cell id")]
    TooManyElements(usize),

    #[error("element `{element}` uses invalid direction code {code}")]
    InvalidDirection { element: String, code: i32 },

    #[error("engine settings are not valid JSON: {0}")]
    SettingsParse(#[source] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
