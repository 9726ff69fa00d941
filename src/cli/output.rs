//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map an error to the line printed on stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Api {
            url: Some(url), ..
        } => format!("Error: {}\n  see {}", e, url),
        _ => format!("Error: {}", e),
    }
}

/// Process exit code for an error: 2 for local configuration problems, 1 otherwise.
pub fn exit_code(e: &ApiError) -> i32 {
    match e {
        ApiError::ConfigError(_) | ApiError::NotAuthenticated => 2,
        _ => 1,
    }
}
