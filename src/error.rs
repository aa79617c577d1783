use std::error;
use std::fmt;
use std::result;

/// The error type for tree operations that can reject their input.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// An argument was outside the set of values the operation accepts.
    InvalidArgument(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
        }
    }
}

/// Convenience alias for results whose error is `Error`.
pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        let err = Error::InvalidArgument(String::from("unknown traversal `mid`"));
        assert_eq!(format!("{}", err), "invalid argument: unknown traversal `mid`");
    }

    #[test]
    fn test_eq() {
        fn assert_eq_impl<T: Eq>(_: &T) {}

        let err = Error::InvalidArgument(String::from("mid"));
        assert_eq_impl(&err);
        assert_eq!(err.clone(), err);
        assert_ne!(err, Error::InvalidArgument(String::from("pre")));
    }
}
