//! Ordered "first success wins" evaluation.
//!
//! Both the camera-code cascade and the photo-listing column fallback are an
//! ordered list of attempts where the first one that produces a value wins.
//! Adding another variant (a new encoding, a renamed column) is one more entry
//! in the list.

use std::future::Future;

/// Run `attempt` over `candidates` in order and return the first `Some`.
///
/// Errors stop the iteration and propagate: a failed attempt means the
/// candidate could not be checked, not that it did not match.
pub async fn first_success<C, T, E, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> Result<Option<T>, E>
where
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<Option<T>, E>>,
{
    for candidate in candidates {
        if let Some(found) = attempt(candidate).await? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

/// Run `attempt` over `candidates` in order and return the first `Ok`.
///
/// Unlike [`first_success`] an error moves on to the next candidate. When every
/// candidate fails the last error is returned; an empty list yields `Ok(None)`.
pub async fn first_ok<C, T, E, F, Fut>(
    candidates: impl IntoIterator<Item = C>,
    mut attempt: F,
) -> Result<Option<T>, E>
where
    F: FnMut(C) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut last_error = None;
    for candidate in candidates {
        match attempt(candidate).await {
            Ok(value) => return Ok(Some(value)),
            Err(e) => last_error = Some(e),
        }
    }
    match last_error {
        Some(e) => Err(e),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_success_returns_first_some_in_order() {
        let mut seen = Vec::new();
        let found: Result<Option<u32>, ()> = first_success([1u32, 2, 3, 4], |n| {
            seen.push(n);
            async move { Ok((n % 2 == 0).then_some(n * 10)) }
        })
        .await;
        assert_eq!(found, Ok(Some(20)));
        assert_eq!(seen, vec![1, 2]);
    }

    #[tokio::test]
    async fn first_success_stops_on_error() {
        let mut seen = Vec::new();
        let found: Result<Option<u32>, &str> = first_success([1u32, 2, 3], |n| {
            seen.push(n);
            async move {
                if n == 2 {
                    Err("store down")
                } else {
                    Ok(None)
                }
            }
        })
        .await;
        assert_eq!(found, Err("store down"));
        assert_eq!(seen, vec![1, 2]);
    }

    #[tokio::test]
    async fn first_success_empty_is_none() {
        let found: Result<Option<u32>, ()> =
            first_success(Vec::<u32>::new(), |n| async move { Ok(Some(n)) }).await;
        assert_eq!(found, Ok(None));
    }

    #[tokio::test]
    async fn first_ok_skips_errors() {
        let found: Result<Option<u32>, String> = first_ok([1u32, 2, 3], |n| async move {
            if n < 3 {
                Err(format!("attempt {n} failed"))
            } else {
                Ok(n)
            }
        })
        .await;
        assert_eq!(found, Ok(Some(3)));
    }

    #[tokio::test]
    async fn first_ok_returns_last_error_when_all_fail() {
        let found: Result<Option<u32>, String> =
            first_ok([1u32, 2], |n| async move { Err(format!("attempt {n} failed")) }).await;
        assert_eq!(found, Err("attempt 2 failed".to_string()));
    }
}
