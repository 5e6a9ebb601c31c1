use crate::common::error::RepotreeError;

/// Result alias used throughout the crate.
///
/// # Examples
///
/// ```
/// use repotree::common::result::RepotreeResult;
/// use repotree::common::error::RepotreeError;
///
/// fn example_function() -> RepotreeResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> RepotreeResult<()> {
///     Err(RepotreeError::config_error("Something went wrong", None))
/// }
/// ```
pub type RepotreeResult<T> = Result<T, RepotreeError>;

/// Helpers for turning an `Option` into a `RepotreeResult`.
pub trait OptionExt<T> {
    /// Converts `None` into an argument error for `flag`.
    ///
    /// ```
    /// use repotree::common::result::{RepotreeResult, OptionExt};
    ///
    /// let none_value: Option<String> = None;
    /// let result: RepotreeResult<String> = none_value.ok_or_argument_error("--group", "flag needs an argument");
    /// assert!(result.is_err());
    /// ```
    fn ok_or_argument_error(
        self,
        flag: impl Into<String>,
        message: impl Into<String>,
    ) -> RepotreeResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_argument_error(
        self,
        flag: impl Into<String>,
        message: impl Into<String>,
    ) -> RepotreeResult<T> {
        self.ok_or_else(|| RepotreeError::argument_error(flag, message))
    }
}

/// Helpers for attaching crate context to foreign errors.
pub trait ResultExt<T, E> {
    /// Converts an I/O failure into a configuration error bound to `path`.
    fn with_config_error(
        self,
        message: impl Into<String>,
        path: &std::path::Path,
    ) -> RepotreeResult<T>
    where
        E: std::error::Error + Send + Sync + 'static;

    /// Converts an I/O failure into a translation error for `repository`.
    fn with_translation_error(
        self,
        message: impl Into<String>,
        repository: impl Into<String>,
    ) -> RepotreeResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_config_error(
        self,
        message: impl Into<String>,
        path: &std::path::Path,
    ) -> RepotreeResult<T>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.map_err(|e| {
            RepotreeError::config_error_with_source(message, Some(path.to_path_buf()), e)
        })
    }

    fn with_translation_error(
        self,
        message: impl Into<String>,
        repository: impl Into<String>,
    ) -> RepotreeResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| RepotreeError::translation_error_with_source(message, repository, e.into()))
    }
}
