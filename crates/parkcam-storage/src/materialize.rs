//! Photo URL materializer.
//!
//! For every photo reference produce a display URL: a short-lived signed URL
//! when the backend grants one, otherwise the public URL. Signing is batched
//! per bucket and buckets are signed concurrently.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::join_all;
use parkcam_core::models::{DisplayUrl, PhotoReference};

use crate::traits::UrlSigner;

/// Validity of signed display URLs.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(1800);

/// Materialize display URLs with the standard 30 minute signing window.
pub async fn materialize(refs: &[PhotoReference], signer: &dyn UrlSigner) -> Vec<DisplayUrl> {
    materialize_with_ttl(refs, signer, SIGNED_URL_TTL).await
}

/// Materialize display URLs, one output per input in input order.
///
/// Never fails: a reference that gets neither a signed nor a public URL comes
/// back with `url: None`.
pub async fn materialize_with_ttl(
    refs: &[PhotoReference],
    signer: &dyn UrlSigner,
    ttl: Duration,
) -> Vec<DisplayUrl> {
    let by_bucket = paths_by_bucket(refs);

    let resolved = join_all(
        by_bucket
            .iter()
            .map(|(bucket, paths)| resolve_bucket(signer, bucket, paths, ttl)),
    )
    .await;

    let mut urls: HashMap<(&str, &str), String> = HashMap::new();
    for ((bucket, _), bucket_urls) in by_bucket.iter().zip(resolved) {
        for (path, url) in bucket_urls {
            urls.insert((*bucket, path), url);
        }
    }

    refs.iter()
        .map(|r| DisplayUrl {
            id: r.id,
            url: urls.get(&(r.bucket.as_str(), r.path.as_str())).cloned(),
        })
        .collect()
}

/// Distinct paths per bucket, both in first-seen order.
fn paths_by_bucket(refs: &[PhotoReference]) -> Vec<(&str, Vec<String>)> {
    let mut buckets: Vec<(&str, Vec<String>)> = Vec::new();
    for r in refs {
        let i = match buckets.iter().position(|(b, _)| *b == r.bucket) {
            Some(i) => i,
            None => {
                buckets.push((r.bucket.as_str(), Vec::new()));
                buckets.len() - 1
            }
        };
        let entry = &mut buckets[i].1;
        if !entry.contains(&r.path) {
            entry.push(r.path.clone());
        }
    }
    buckets
}

/// Signed URLs for one bucket, with public URLs filling the gaps.
async fn resolve_bucket<'p>(
    signer: &dyn UrlSigner,
    bucket: &str,
    paths: &'p [String],
    ttl: Duration,
) -> Vec<(&'p str, String)> {
    let mut signed = match signer.create_signed_urls(bucket, paths, ttl).await {
        Ok(signed) => signed,
        Err(e) => {
            tracing::warn!(
                error = %e,
                bucket = %bucket,
                paths = paths.len(),
                "Signing batch failed, falling back to public URLs"
            );
            HashMap::new()
        }
    };

    paths
        .iter()
        .filter_map(|path| {
            let url = signed
                .remove(path)
                .flatten()
                .filter(|u| !u.is_empty())
                .or_else(|| signer.public_url(bucket, path).filter(|u| !u.is_empty()))?;
            Some((path.as_str(), url))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{StorageError, StorageResult};
    use crate::StorageBackend;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Signer over a fixed set of signable keys, recording each batch call.
    #[derive(Default)]
    struct FakeSigner {
        signable: HashSet<(String, String)>,
        failing_buckets: HashSet<String>,
        public_buckets: HashSet<String>,
        calls: Mutex<Vec<(String, Vec<String>, Duration)>>,
    }

    #[async_trait]
    impl UrlSigner for FakeSigner {
        async fn create_signed_urls(
            &self,
            bucket: &str,
            keys: &[String],
            expires_in: Duration,
        ) -> StorageResult<HashMap<String, Option<String>>> {
            self.calls
                .lock()
                .unwrap()
                .push((bucket.to_string(), keys.to_vec(), expires_in));
            if self.failing_buckets.contains(bucket) {
                return Err(StorageError::BackendError("service unavailable".to_string()));
            }
            Ok(keys
                .iter()
                .map(|k| {
                    let url = self
                        .signable
                        .contains(&(bucket.to_string(), k.clone()))
                        .then(|| format!("signed://{bucket}/{k}"));
                    (k.clone(), url)
                })
                .collect())
        }

        fn public_url(&self, bucket: &str, key: &str) -> Option<String> {
            self.public_buckets
                .contains(bucket)
                .then(|| format!("public://{bucket}/{key}"))
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    fn photo(bucket: &str, path: &str) -> PhotoReference {
        PhotoReference {
            id: Uuid::new_v4(),
            bucket: bucket.to_string(),
            path: path.to_string(),
            captured_at: Utc::now(),
        }
    }

    fn set(items: &[(&str, &str)]) -> HashSet<(String, String)> {
        items
            .iter()
            .map(|(b, k)| (b.to_string(), k.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn signed_first_then_public_fallback() {
        let signer = FakeSigner {
            signable: set(&[("private", "a.jpg")]),
            public_buckets: ["private".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let refs = vec![photo("private", "a.jpg"), photo("private", "b.jpg")];

        let urls = materialize(&refs, &signer).await;

        assert_eq!(urls[0].url.as_deref(), Some("signed://private/a.jpg"));
        assert_eq!(urls[1].url.as_deref(), Some("public://private/b.jpg"));
    }

    #[tokio::test]
    async fn preserves_order_and_cardinality_with_duplicates() {
        let signer = FakeSigner {
            signable: set(&[("x", "1.jpg"), ("y", "2.jpg")]),
            ..Default::default()
        };
        let refs = vec![
            photo("y", "2.jpg"),
            photo("x", "1.jpg"),
            photo("x", "missing.jpg"),
            photo("y", "2.jpg"),
        ];

        let urls = materialize(&refs, &signer).await;

        assert_eq!(urls.len(), refs.len());
        for (r, u) in refs.iter().zip(&urls) {
            assert_eq!(r.id, u.id);
        }
        assert_eq!(urls[0].url.as_deref(), Some("signed://y/2.jpg"));
        assert_eq!(urls[1].url.as_deref(), Some("signed://x/1.jpg"));
        assert_eq!(urls[2].url, None);
        assert_eq!(urls[3].url.as_deref(), Some("signed://y/2.jpg"));
    }

    #[tokio::test]
    async fn one_batch_per_bucket_with_distinct_paths() {
        let signer = FakeSigner::default();
        let refs = vec![
            photo("x", "1.jpg"),
            photo("y", "1.jpg"),
            photo("x", "1.jpg"),
            photo("x", "2.jpg"),
        ];

        materialize(&refs, &signer).await;

        let mut calls = signer.calls.lock().unwrap().clone();
        calls.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "x");
        assert_eq!(calls[0].1, vec!["1.jpg".to_string(), "2.jpg".to_string()]);
        assert_eq!(calls[0].2, SIGNED_URL_TTL);
        assert_eq!(calls[1].0, "y");
        assert_eq!(calls[1].1, vec!["1.jpg".to_string()]);
    }

    #[tokio::test]
    async fn failed_batch_still_uses_public_urls() {
        let signer = FakeSigner {
            failing_buckets: ["pub".to_string()].into_iter().collect(),
            public_buckets: ["pub".to_string()].into_iter().collect(),
            ..Default::default()
        };
        let refs = vec![photo("pub", "a.jpg"), photo("gone", "b.jpg")];

        let urls = materialize(&refs, &signer).await;

        assert_eq!(urls[0].url.as_deref(), Some("public://pub/a.jpg"));
        assert_eq!(urls[1].url, None);
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls() {
        let signer = FakeSigner::default();
        assert!(materialize(&[], &signer).await.is_empty());
        assert!(signer.calls.lock().unwrap().is_empty());
    }
}
