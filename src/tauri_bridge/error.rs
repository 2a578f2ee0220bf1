//! Errors returned to the frontend

use std::sync::{Mutex, MutexGuard};

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{0} lock poisoned")]
    Poisoned(&'static str),
    #[error("globe renderer is unavailable")]
    GlobeUnavailable,
    #[error("no frame yet (scene still loading)")]
    NotReady,
    #[error("frame buffer does not match {width}x{height}")]
    MalformedFrame { width: u32, height: u32 },
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

// Tauri sends command errors to JavaScript as their display string.
impl Serialize for BridgeError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

/// Lock `mutex`, naming it in the error if a holder panicked
pub fn lock<'a, T>(mutex: &'a Mutex<T>, what: &'static str) -> Result<MutexGuard<'a, T>, BridgeError> {
    mutex.lock().map_err(|_| BridgeError::Poisoned(what))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_message() {
        let json = serde_json::to_string(&BridgeError::GlobeUnavailable).unwrap();
        assert_eq!(json, "\"globe renderer is unavailable\"");
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let mutex = std::sync::Arc::new(Mutex::new(0));
        let clone = mutex.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.lock().unwrap();
            panic!("poison");
        })
        .join();
        let err = lock(&mutex, "session").unwrap_err();
        assert_eq!(err.to_string(), "session lock poisoned");
    }
}
