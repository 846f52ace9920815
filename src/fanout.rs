//! Component F: query fan-out (spec §4.F). Sends the same query to several
//! destinations with a staggered start, first success wins, and every other
//! in-flight sub-request is abandoned (dropped, never a spawned OS task —
//! spec §5 keeps this on one cooperative event loop).

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use tokio::time::Instant;

use crate::error::{Error, Result};

/// Outcome of [`name_queries`]: the winning result plus the index of the
/// address that produced it, so callers can correlate.
pub struct FanoutResult<T> {
    pub value: T,
    pub which_index: usize,
}

/// Send `query` (via `issue`) to each of `addrs` with sub-request `n`
/// started `n * wait_ms` after sub-request 0, each bounded by its own
/// `timeout_ms` deadline. The first sub-request to succeed wins; the rest
/// are dropped unpolled. A sub-request failure only fails the whole
/// operation once every sub-request has failed, in which case the last
/// observed error is returned.
pub async fn name_queries<T, F, Fut>(addrs: &[SocketAddr], wait_ms: u64, timeout_ms: u64, mut issue: F) -> Result<FanoutResult<T>>
where
    F: FnMut(usize, SocketAddr, Instant) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    if addrs.is_empty() {
        return Err(Error::NotFound);
    }

    let stagger = Duration::from_millis(wait_ms);
    let per_request_timeout = Duration::from_millis(timeout_ms);

    let mut pending = FuturesUnordered::new();
    let mut last_err = Error::NotFound;
    let mut started = 0usize;
    let mut next_start = Instant::now();

    loop {
        if started < addrs.len() {
            tokio::select! {
                _ = tokio::time::sleep_until(next_start) => {
                    let index = started;
                    let deadline = Instant::now() + per_request_timeout;
                    let fut = issue(index, addrs[index], deadline);
                    pending.push(async move { (index, fut.await) });
                    started += 1;
                    next_start = Instant::now() + stagger;
                }
                Some((index, outcome)) = pending.next(), if !pending.is_empty() => {
                    if let Some(done) = handle_outcome(index, outcome, &mut last_err, started == addrs.len() && pending.is_empty()) {
                        return done;
                    }
                }
            }
        } else {
            match pending.next().await {
                Some((index, outcome)) => {
                    if let Some(done) = handle_outcome(index, outcome, &mut last_err, pending.is_empty()) {
                        return done;
                    }
                }
                None => return Err(last_err),
            }
        }
    }
}

fn handle_outcome<T>(index: usize, outcome: Result<T>, last_err: &mut Error, all_done: bool) -> Option<Result<FanoutResult<T>>> {
    match outcome {
        Ok(value) => Some(Ok(FanoutResult { value, which_index: index })),
        Err(e) => {
            *last_err = e;
            if all_done {
                Some(Err(std::mem::replace(last_err, Error::NotFound)))
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), port)
    }

    #[tokio::test]
    async fn first_success_wins_and_reports_its_index() {
        let addrs = [addr(1), addr(2), addr(3)];
        let started = Arc::new(AtomicUsize::new(0));

        let result = name_queries(&addrs, 0, 1000, |index, _addr, _deadline| {
            started.fetch_add(1, Ordering::SeqCst);
            async move {
                if index == 1 {
                    Ok::<_, Error>(42)
                } else {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    Ok(0)
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result.value, 42);
        assert_eq!(result.which_index, 1);
    }

    #[tokio::test]
    async fn fails_only_once_every_subrequest_fails() {
        let addrs = [addr(1), addr(2)];

        let result: Result<FanoutResult<()>> = name_queries(&addrs, 0, 1000, |index, _addr, _deadline| async move {
            if index == 0 {
                Err(Error::Timeout)
            } else {
                Err(Error::NotFound)
            }
        })
        .await;

        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn empty_address_list_fails_fast() {
        let addrs: [SocketAddr; 0] = [];
        let result: Result<FanoutResult<()>> = name_queries(&addrs, 0, 1000, |_i, _a, _d| async move { Ok(()) }).await;
        assert!(matches!(result, Err(Error::NotFound)));
    }
}
