//! Sharing links to catalog items
//!
//! The platform decides how a share happens (native share sheet, clipboard,
//! printing). A user cancelling the share sheet is a normal outcome.

use crate::data::types::{ContentItem, LikedItem};
use crate::error::AppError;
use thiserror::Error;
use tracing::debug;

/// What gets shared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareRequest {
    /// Request sharing `item`'s detail page under `origin`
    pub fn for_item(origin: &str, item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            text: item.description.clone(),
            url: share_link(origin, &item.id),
        }
    }

    /// Request sharing a liked item, which may no longer be in the catalog
    pub fn for_liked(origin: &str, item: &LikedItem) -> Self {
        Self {
            title: item.title.clone(),
            text: item.description.clone(),
            url: share_link(origin, &item.id),
        }
    }
}

/// Why a native share did not happen
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Share cancelled")]
    Cancelled,

    #[error(transparent)]
    Failed(#[from] AppError),
}

/// How a share request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the platform's share action
    Shared,
    /// Link copied instead (no native share available)
    Copied,
    /// The user dismissed the share action; nothing happened
    Cancelled,
}

/// Platform share capability
pub trait SharePlatform {
    /// Whether a native share action exists
    fn can_share(&self) -> bool;

    /// Run the native share action
    fn share(&self, request: &ShareRequest) -> Result<(), ShareError>;

    /// Copy a link for the user to paste elsewhere
    fn copy_link(&self, url: &str) -> crate::error::Result<()>;
}

/// Detail-page link for an item: `{origin}/content/{id}`
pub fn share_link(origin: &str, id: &str) -> String {
    format!("{}/content/{}", origin.trim_end_matches('/'), id)
}

/// Share through the platform, falling back to copying the link
///
/// Cancellation is a no-op and reported as [`ShareOutcome::Cancelled`].
pub fn share(platform: &dyn SharePlatform, request: &ShareRequest) -> crate::error::Result<ShareOutcome> {
    if !platform.can_share() {
        platform.copy_link(&request.url)?;
        return Ok(ShareOutcome::Copied);
    }

    match platform.share(request) {
        Ok(()) => Ok(ShareOutcome::Shared),
        Err(ShareError::Cancelled) => {
            debug!("Share of {} cancelled", request.url);
            Ok(ShareOutcome::Cancelled)
        }
        Err(ShareError::Failed(e)) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records what the platform was asked to do
    struct MockPlatform {
        native: bool,
        cancel: bool,
        shared: RefCell<Vec<String>>,
        copied: RefCell<Vec<String>>,
    }

    impl MockPlatform {
        fn new(native: bool, cancel: bool) -> Self {
            Self {
                native,
                cancel,
                shared: RefCell::new(Vec::new()),
                copied: RefCell::new(Vec::new()),
            }
        }
    }

    impl SharePlatform for MockPlatform {
        fn can_share(&self) -> bool {
            self.native
        }

        fn share(&self, request: &ShareRequest) -> Result<(), ShareError> {
            if self.cancel {
                return Err(ShareError::Cancelled);
            }
            self.shared.borrow_mut().push(request.url.clone());
            Ok(())
        }

        fn copy_link(&self, url: &str) -> crate::error::Result<()> {
            self.copied.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn request() -> ShareRequest {
        let item = ContentItem::new("2", "Astronaut", "Space").with_description("Space gear");
        ShareRequest::for_item("https://shelf.example/", &item)
    }

    #[test]
    fn test_share_link() {
        assert_eq!(share_link("http://localhost:5173", "42"), "http://localhost:5173/content/42");
        assert_eq!(share_link("http://localhost:5173/", "42"), "http://localhost:5173/content/42");
    }

    #[test]
    fn test_request_for_item() {
        let req = request();
        assert_eq!(req.title, "Astronaut");
        assert_eq!(req.text, "Space gear");
        assert_eq!(req.url, "https://shelf.example/content/2");
    }

    #[test]
    fn test_native_share() {
        let platform = MockPlatform::new(true, false);
        assert_eq!(share(&platform, &request()).unwrap(), ShareOutcome::Shared);
        assert_eq!(platform.shared.borrow().len(), 1);
        assert!(platform.copied.borrow().is_empty());
    }

    #[test]
    fn test_cancel_is_noop() {
        let platform = MockPlatform::new(true, true);
        assert_eq!(share(&platform, &request()).unwrap(), ShareOutcome::Cancelled);
        assert!(platform.shared.borrow().is_empty());
        assert!(platform.copied.borrow().is_empty());
    }

    #[test]
    fn test_copy_fallback() {
        let platform = MockPlatform::new(false, false);
        assert_eq!(share(&platform, &request()).unwrap(), ShareOutcome::Copied);
        assert_eq!(
            platform.copied.borrow().as_slice(),
            ["https://shelf.example/content/2".to_string()]
        );
    }
}
