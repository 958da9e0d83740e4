/// Outcome band of an HTTP status, computed once per response.
///
/// Only `400` and `500..=599` are errors. [`StatusClass::Unclassified`] covers every
/// status that is neither 2xx nor one of those error bands (1xx, 3xx, 401–499, ≥600);
/// the submission handler renders it exactly like [`StatusClass::Success`] and logs a
/// warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    ClientError,
    ServerError,
    Unclassified,
}

impl StatusClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            200..=299 => StatusClass::Success,
            _ => StatusClass::Unclassified,
        }
    }
}
