#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("node `html` and `markdown` labels are mutually exclusive")]
    ConflictingLabelSource,

    #[error("graph `{inner}` cannot be entered while graph `{outer}` is current")]
    NestedGraph { outer: String, inner: String },

    #[error("duplicate node name: {name}")]
    DuplicateNode { name: String },

    #[error("feature unavailable: {feature} (enable the `{feature}` cargo feature)")]
    FeatureUnavailable { feature: &'static str },

    #[error("{message}")]
    Parse { message: String },

    #[error("layout program `{program}` not found")]
    BackendNotFound { program: String },

    #[error("layout program failed: {message}")]
    Backend { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
