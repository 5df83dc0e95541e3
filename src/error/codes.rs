#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Also used when the user declines to overwrite
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    InvalidSource = 3,
    MissingTokens = 4,
    IdenticalPaths = 5,
    NoCandidates = 6,
    UnparseableLatest = 7,
    DirectoryCreateError = 8,
    ReadError = 9,
    WriteError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
