use std::io;

#[derive(Debug, thiserror::Error)]
pub enum TotpError {
    #[error("Failed to read secret from stdin")]
    InputRead(#[source] io::Error),
    #[error("Invalid Base32 secret")]
    InvalidSecret,
    #[error("Invalid Base32 secret: decodes to more than {capacity} bytes")]
    BufferOverflow { capacity: usize },
}

impl TotpError {
    // Every startup failure exits the same way, the variant is only for logs.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_startup_errors_exit_with_one() {
        let errors = [
            TotpError::InputRead(io::Error::new(io::ErrorKind::UnexpectedEof, "eof")),
            TotpError::InvalidSecret,
            TotpError::BufferOverflow { capacity: 64 },
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "{}", err);
        }
    }

    #[test]
    fn overflow_message_names_capacity() {
        let err = TotpError::BufferOverflow { capacity: 64 };
        assert!(err.to_string().contains("64 bytes"));
    }
}
