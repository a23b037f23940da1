//! Startup database bootstrap.
//!
//! Containerized deployments routinely start the app before MySQL accepts
//! connections, so the whole prepare sequence runs inside a bounded
//! fixed-interval retry loop. The loop executes exactly once, before the
//! listener binds; exhausting it aborts startup — the process must not
//! serve traffic against an unreachable store.

use std::future::Future;
use std::time::Duration;

use crate::config::Config;
use crate::store::mysql::ItemStore;

/// Run `op` up to `max_attempts` times with a fixed sleep between
/// attempts. The last error is re-raised once attempts are exhausted.
pub async fn retry_fixed<T, F, Fut>(
    max_attempts: u32,
    interval: Duration,
    mut op: F,
) -> anyhow::Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut attempt = 1u32;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "attempt failed, retrying after {:?}",
                    interval
                );
                tokio::time::sleep(interval).await;
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(max_attempts, "giving up after {} attempts", max_attempts);
                return Err(e);
            }
        }
    }
}

/// Open the pool, make the schema available and optionally seed baseline
/// rows, retrying the whole sequence while the database comes up.
pub async fn prepare_store(cfg: &Config) -> anyhow::Result<ItemStore> {
    let url = cfg.database_url()?;
    let seed = cfg.seed_on_startup;

    retry_fixed(cfg.connect_attempts, cfg.connect_interval, |attempt| {
        let url = url.clone();
        async move {
            tracing::info!(attempt, "connecting to database");
            let store = ItemStore::connect(&url).await?;
            store.ensure_schema().await?;
            store.ping().await?;
            if seed {
                store.seed_defaults().await?;
            }
            tracing::info!("database ready");
            Ok(store)
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_attempt_n_after_n_minus_one_failures() {
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let result = retry_fixed(5, Duration::from_secs(5), |_attempt| {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                if n < 3 {
                    anyhow::bail!("not ready yet")
                }
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two failures means exactly two fixed sleeps.
        assert_eq!(started.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_exactly_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: anyhow::Result<()> =
            retry_fixed(4, Duration::from_secs(1), |_attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { anyhow::bail!("store is down") }
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "store is down");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_sleeps_zero_times() {
        let started = tokio::time::Instant::now();
        let result = retry_fixed(10, Duration::from_secs(60), |attempt| async move {
            Ok(attempt)
        })
        .await;
        assert_eq!(result.unwrap(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
