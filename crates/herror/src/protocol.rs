//! Free functions over the standard error protocol.

use crate::HError;
use std::error::Error;

/// Build a node from `err` and wrap `wrapped` as its cause.
///
/// # Examples
///
/// ```
/// use herror::{HError, unwrap, wrap};
///
/// let err = wrap(HError::new("something went wrong"), std::io::Error::other("because of this error"));
/// assert_eq!(unwrap(&err).map(|cause| cause.to_string()).as_deref(), Some("because of this error"));
/// assert_eq!(err.to_string(), "something went wrong\n-> because of this error");
/// ```
pub fn wrap<E, W>(err: E, wrapped: W) -> HError
where
    E: Error + Send + Sync + 'static,
    W: Error + Send + Sync + 'static,
{
    HError::from_error(err).wrap(wrapped)
}

/// The immediate cause of any error.
pub fn unwrap<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    err.source()
}

/// Report whether any error in `err`'s chain matches `target`.
///
/// Any error in the chain matches when it is the very same value as
/// `target`. An [`HError`] in the chain also matches by message text through
/// [`HError::matches`].
///
/// # Examples
///
/// ```
/// use herror::{HError, is};
///
/// let err_a = HError::new("something went wrong");
/// let err_b = HError::new("something went wrong");
/// assert!(is(&err_a, &err_b));
/// ```
pub fn is(err: &(dyn Error + 'static), target: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(candidate) = current {
        if std::ptr::addr_eq(candidate, target) {
            return true;
        }
        if let Some(chain) = candidate.downcast_ref::<HError>() {
            return chain.matches(target);
        }
        current = candidate.source();
    }
    false
}
