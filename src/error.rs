use std::error;
use std::fmt;

/// Errors produced while parsing or disassembling an ABC file.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The cursor ran past the end of the buffer while decoding a value.
    ShortInput { offset: usize },
    /// A decoded field violates an invariant of the format.
    BadValue { msg: &'static str, val: u32 },
    /// The disassembler encountered a byte not present in the opcode table.
    BadOpcode { byte: u8 },
    /// A lower-level failure, tagged with the cursor offset at the time.
    ParseError { msg: &'static str, offset: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ShortInput { offset } => {
                write!(f, "short input at offset {offset}")
            }
            Error::BadValue { msg, val } => {
                write!(f, "bad value ({val}): {msg}")
            }
            Error::BadOpcode { byte } => {
                write!(f, "unknown opcode 0x{byte:02x}")
            }
            Error::ParseError { msg, offset } => {
                write!(f, "parse error at offset {offset}: {msg}")
            }
        }
    }
}

impl error::Error for Error {}
