//! Remote matcher worker thread.
//!
//! Runs remote lookups off the owner's thread so `request_matches` never
//! blocks on the network. Requests arrive over a channel and are
//! processed serially on a current-thread tokio runtime; each call is
//! raced against its cancellation token, and cancelled lookups produce
//! no response at all.

use std::sync::mpsc::{Receiver, Sender};

use super::types::{RemoteMatcher, RemoteRequest, RemoteResponse};

/// Spawns the worker thread. The thread exits when the request channel
/// closes.
pub fn spawn_remote_worker<M>(
    matcher: M,
    request_rx: Receiver<RemoteRequest>,
    response_tx: Sender<RemoteResponse>,
) where
    M: RemoteMatcher + 'static,
{
    std::thread::spawn(move || {
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("failed to create remote worker runtime: {e}");
                return;
            }
        };
        rt.block_on(worker_loop(matcher, request_rx, response_tx));
        log::debug!("remote worker exiting");
    });
}

/// Processes requests until the channel is closed. Blocking `recv()` is
/// fine here since the thread does nothing else.
async fn worker_loop<M: RemoteMatcher>(
    matcher: M,
    request_rx: Receiver<RemoteRequest>,
    response_tx: Sender<RemoteResponse>,
) {
    while let Ok(request) = request_rx.recv() {
        if request.cancel.is_cancelled() {
            log::debug!(
                "skipping cancelled request generation={}",
                request.generation
            );
            continue;
        }

        let outcome = tokio::select! {
            biased;

            _ = request.cancel.cancelled() => {
                log::debug!(
                    "remote request cancelled generation={}",
                    request.generation
                );
                continue;
            }

            outcome = matcher.request_matches(&request.query) => outcome,
        };

        let response = RemoteResponse {
            generation: request.generation,
            outcome,
        };
        if response_tx.send(response).is_err() {
            // Owner dropped the receiver
            break;
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
