use futures::channel::oneshot;
use futures::lock::Mutex;
use shared_types::AppError;

/// Coordinates token refresh across concurrent 401s: the first caller to
/// claim the gate becomes the leader and performs the refresh; everyone else
/// parks on a FIFO waiter queue and receives the leader's outcome. Exactly
/// one refresh call is issued per burst.
#[derive(Default)]
pub struct RefreshGate {
    state: Mutex<GateState>,
}

#[derive(Default)]
struct GateState {
    refreshing: bool,
    waiters: Vec<oneshot::Sender<Result<String, AppError>>>,
}

pub enum RefreshClaim {
    /// This caller must perform the refresh and then call [`RefreshGate::complete`].
    Leader,
    /// A refresh is already in flight; await the shared outcome.
    Follower(oneshot::Receiver<Result<String, AppError>>),
}

impl RefreshGate {
    pub async fn claim(&self) -> RefreshClaim {
        let mut state = self.state.lock().await;
        if state.refreshing {
            let (tx, rx) = oneshot::channel();
            state.waiters.push(tx);
            RefreshClaim::Follower(rx)
        } else {
            state.refreshing = true;
            RefreshClaim::Leader
        }
    }

    /// Publish the refresh outcome to every queued waiter and reopen the gate.
    pub async fn complete(&self, result: Result<String, AppError>) {
        let waiters = {
            let mut state = self.state.lock().await;
            state.refreshing = false;
            std::mem::take(&mut state.waiters)
        };
        tracing::debug!(waiters = waiters.len(), ok = result.is_ok(), "refresh settled");
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }
}
