//! Load state for remote data.

use visconti_commerce::catalog::{Catalog, GalleryImage};

use crate::client::{FetchError, MenuSource};

/// Message shown when the menu cannot be fetched.
pub const MENU_FETCH_FAILED: &str = "Failed to fetch menu items. Please try again later.";

/// Message shown when the menu arrives in an unknown shape.
pub const MENU_FORMAT_INVALID: &str = "API response is not in the expected format";

/// Message shown when the gallery cannot be fetched.
pub const IMAGES_FETCH_FAILED: &str = "Failed to fetch menu images";

/// Where a remote collection is in its lifecycle.
///
/// Failures are terminal until the user asks to try again, which moves the
/// state back to `Loading` through [`FetchState::begin_retry`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed {
        message: String,
    },
}

// Written by hand: the derive would require `T: Default`.
impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, FetchState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed { .. })
    }

    /// Loaded value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Start a load. Returns false if one is already running.
    pub fn begin(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = FetchState::Loading;
        true
    }

    /// The "try again" action: `Failed` becomes `Loading`.
    ///
    /// Returns false, leaving the state alone, from any other state.
    pub fn begin_retry(&mut self) -> bool {
        if !self.is_failed() {
            return false;
        }
        *self = FetchState::Loading;
        true
    }

    /// Record a finished load.
    pub fn finish(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => FetchState::Ready(value),
            Err(message) => FetchState::Failed { message },
        };
    }

    /// Take the loaded value, leaving `Idle`.
    pub fn take(&mut self) -> Option<T> {
        match std::mem::take(self) {
            FetchState::Ready(value) => Some(value),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Fetch the menu into `state` as a flat catalog.
pub async fn load_catalog<S>(source: &S, state: &mut FetchState<Catalog>)
where
    S: MenuSource + ?Sized,
{
    state.begin();
    let result = source
        .fetch_menu()
        .await
        .map(|menu| menu.into_catalog())
        .map_err(|e| {
            tracing::warn!(error = %e, "menu fetch failed");
            menu_failure_message(&e).to_string()
        });
    state.finish(result);
}

/// Fetch the menu photo gallery into `state`.
pub async fn load_gallery<S>(source: &S, state: &mut FetchState<Vec<GalleryImage>>)
where
    S: MenuSource + ?Sized,
{
    state.begin();
    let result = source.fetch_images().await.map_err(|e| {
        tracing::warn!(error = %e, "image fetch failed");
        IMAGES_FETCH_FAILED.to_string()
    });
    state.finish(result);
}

/// User-facing message for a failed menu fetch.
pub fn menu_failure_message(err: &FetchError) -> &'static str {
    match err {
        FetchError::UnexpectedFormat(_) => MENU_FORMAT_INVALID,
        _ => MENU_FETCH_FAILED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_take_without_default_payload() {
        #[derive(Debug, PartialEq)]
        struct Menu(u32);

        let mut state: FetchState<Menu> = FetchState::default();
        assert_eq!(state, FetchState::Idle);

        state.finish(Ok(Menu(3)));
        assert_eq!(state.take(), Some(Menu(3)));
        assert_eq!(state, FetchState::Idle);
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut state: FetchState<u32> = FetchState::Idle;
        assert!(!state.begin_retry());

        state.finish(Err("boom".to_string()));
        assert_eq!(state.error(), Some("boom"));

        assert!(state.begin_retry());
        assert!(state.is_loading());
        assert!(!state.begin_retry());

        state.finish(Ok(7));
        assert_eq!(state.value(), Some(&7));
        assert!(!state.begin_retry());
    }

    #[test]
    fn test_begin_is_not_reentrant() {
        let mut state: FetchState<()> = FetchState::default();
        assert!(state.begin());
        assert!(!state.begin());
    }

    #[test]
    fn test_take() {
        let mut state = FetchState::Ready(vec![1, 2]);
        assert_eq!(state.take(), Some(vec![1, 2]));
        assert_eq!(state, FetchState::Idle);

        let mut failed: FetchState<u8> = FetchState::Failed {
            message: "x".to_string(),
        };
        assert_eq!(failed.take(), None);
        assert!(failed.is_failed());
    }

    #[test]
    fn test_menu_failure_messages() {
        assert_eq!(
            menu_failure_message(&FetchError::UnexpectedFormat(String::new())),
            MENU_FORMAT_INVALID
        );
        assert_eq!(
            menu_failure_message(&FetchError::Timeout(String::new())),
            MENU_FETCH_FAILED
        );
    }
}
