//! Debounced link rewrite queue.
//!
//! Links are collected through [`RewriteQueue::enqueue`]. Once no new link
//! has arrived for the debounce delay, the worker resolves every pending link
//! and emits one [`Rewrite`] per link that has a destination.

use super::expander::ExpanderClient;
use super::links::rewrite_text;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

const QUEUE_CAPACITY: usize = 1024;

/// A link found on a page together with its visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLink {
    pub href: String,
    pub text: String,
}

/// Outcome for one link: where it should point and what it should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub original: String,
    pub target: String,
    pub text: String,
}

/// Sending half of the rewrite queue.
#[derive(Debug, Clone)]
pub struct RewriteQueue {
    tx: mpsc::Sender<PendingLink>,
}

impl RewriteQueue {
    /// Starts the worker task.
    ///
    /// The worker stops after every queue handle is dropped and the
    /// remaining links are flushed.
    pub fn spawn(
        client: ExpanderClient,
        debounce: Duration,
    ) -> (Self, mpsc::Receiver<Rewrite>, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        let (out_tx, out_rx) = mpsc::channel(QUEUE_CAPACITY);
        let handle = tokio::spawn(run_rewrite_worker(rx, out_tx, client, debounce));
        (Self { tx }, out_rx, handle)
    }

    /// Adds a link. Returns `false` if the worker has stopped.
    pub async fn enqueue(&self, href: impl Into<String>, text: impl Into<String>) -> bool {
        let link = PendingLink {
            href: href.into(),
            text: text.into(),
        };
        self.tx.send(link).await.is_ok()
    }
}

async fn run_rewrite_worker(
    mut rx: mpsc::Receiver<PendingLink>,
    out: mpsc::Sender<Rewrite>,
    client: ExpanderClient,
    debounce: Duration,
) {
    let mut pending: Vec<PendingLink> = Vec::new();
    let mut deadline: Option<Instant> = None;

    loop {
        let timer = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            received = rx.recv() => match received {
                Some(link) => {
                    if !pending.contains(&link) {
                        pending.push(link);
                    }
                    deadline = Some(Instant::now() + debounce);
                }
                None => {
                    flush(&mut pending, &out, &client).await;
                    break;
                }
            },
            _ = timer => {
                deadline = None;
                if !flush(&mut pending, &out, &client).await {
                    break;
                }
            }
        }
    }

    tracing::debug!("Rewrite worker stopped");
}

/// Returns `false` once nobody listens for rewrites anymore.
async fn flush(
    pending: &mut Vec<PendingLink>,
    out: &mpsc::Sender<Rewrite>,
    client: &ExpanderClient,
) -> bool {
    for link in pending.drain(..) {
        let Some(target) = client.extract_target(&link.href).await else {
            continue;
        };
        tracing::debug!("{} -> {}", link.href, target);

        let rewrite = Rewrite {
            text: rewrite_text(&link.text, &target),
            original: link.href,
            target,
        };
        if out.send(rewrite).await.is_err() {
            return false;
        }
    }
    true
}
