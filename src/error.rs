/// Exit code for bad user input, local I/O and configuration problems.
pub const EXIT_USAGE: u8 = 2;
/// Exit code for failures talking to (or decoding) the upstream data source.
pub const EXIT_UPSTREAM: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(EXIT_UPSTREAM, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_exit_codes() {
        let err = AppError::usage("bad country");
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert_eq!(err.to_string(), "bad country");

        let err = AppError::upstream("HTTP 503");
        assert_eq!(err.exit_code(), EXIT_UPSTREAM);
        assert_eq!(err.message(), "HTTP 503");
    }
}
