/// Startup and configuration failures. Per-frame work has no error path of
/// its own; compositor errors are reported through `Compositor::Error`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("shader source `{0}` is empty")]
    MissingShader(&'static str),

    #[error("invalid value `{value}` for `{key}`: {reason}")]
    InvalidConfig {
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("unknown config key `{0}`")]
    UnknownConfigKey(String),
}

pub type Result<T> = std::result::Result<T, Error>;
