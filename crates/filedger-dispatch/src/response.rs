use std::fmt;

/// Outcome of an invocation, using the ledger's HTTP-style codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Error,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Error => 500,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK ({})", self.code()),
            Self::Error => write!(f, "ERROR ({})", self.code()),
        }
    }
}

/// What an invocation returns to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub payload: Vec<u8>,
    pub message: String,
}

impl Response {
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: Status::Ok,
            payload,
            message: String::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            payload: Vec::new(),
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
