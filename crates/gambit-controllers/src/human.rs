//! Human (externally fed) controller.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gambit_engine::Game;
use tokio::sync::oneshot;

use crate::Controller;

type ProposedMove = (String, String);

/// The request/response cell.
///
/// At most one request is pending at a time. A move supplied while no
/// request is pending parks in the single queue slot (last write wins)
/// and is consumed by the next `request_move`, which resolves the
/// supply-before-request race instead of dropping the move.
enum RequestState {
    Idle {
        queued: Option<ProposedMove>,
    },
    Awaiting {
        request_id: u64,
        reply: oneshot::Sender<Option<ProposedMove>>,
    },
}

struct Cell {
    next_request_id: u64,
    state: RequestState,
}

/// A controller fed by an external caller (a UI, a network frontend).
///
/// `request_move` suspends until [`submit_move`](HumanController::submit_move)
/// or [`cancel_request`](HumanController::cancel_request) resolves it;
/// there is no timeout. The handle is cheaply cloneable so the frontend
/// can keep one side while a [`Session`](crate::Session) owns another.
#[derive(Clone)]
pub struct HumanController {
    cell: Arc<Mutex<Cell>>,
}

impl HumanController {
    /// Creates an idle controller with nothing queued.
    pub fn new() -> Self {
        HumanController {
            cell: Arc::new(Mutex::new(Cell {
                next_request_id: 0,
                state: RequestState::Idle { queued: None },
            })),
        }
    }

    /// Returns true if a move request is currently pending.
    pub fn is_awaiting_move(&self) -> bool {
        matches!(self.lock().state, RequestState::Awaiting { .. })
    }

    /// Returns the id of the pending request, if any.
    pub fn pending_request_id(&self) -> Option<u64> {
        match self.lock().state {
            RequestState::Awaiting { request_id, .. } => Some(request_id),
            RequestState::Idle { .. } => None,
        }
    }

    /// Supplies the next move.
    ///
    /// Fulfils the pending request if there is one; otherwise the move
    /// is queued (overwriting any earlier queued move) for the next
    /// `request_move` call.
    pub fn submit_move(&self, from: impl Into<String>, to: impl Into<String>) {
        let mv = (from.into(), to.into());
        let mut cell = self.lock();
        match std::mem::replace(&mut cell.state, RequestState::Idle { queued: None }) {
            RequestState::Awaiting { request_id, reply } => {
                tracing::debug!(request_id, from = %mv.0, to = %mv.1, "move request fulfilled");
                let _ = reply.send(Some(mv));
            }
            RequestState::Idle { .. } => {
                tracing::debug!(from = %mv.0, to = %mv.1, "move queued while idle");
                cell.state = RequestState::Idle { queued: Some(mv) };
            }
        }
    }

    /// Supplies a move addressed to one specific request.
    ///
    /// A stale or mismatched `request_id` is an idempotent no-op: the
    /// move neither fulfils the pending request nor queues.
    pub fn submit_move_for(
        &self,
        from: impl Into<String>,
        to: impl Into<String>,
        request_id: u64,
    ) {
        let mut cell = self.lock();
        match &cell.state {
            RequestState::Awaiting {
                request_id: pending,
                ..
            } if *pending == request_id => {}
            _ => {
                tracing::debug!(request_id, "ignoring move for stale request");
                return;
            }
        }
        let state = std::mem::replace(&mut cell.state, RequestState::Idle { queued: None });
        if let RequestState::Awaiting { reply, .. } = state {
            let _ = reply.send(Some((from.into(), to.into())));
        }
    }

    /// Cancels the pending request, resolving it with "no move". The
    /// controller remains usable; cancelling with nothing pending is a
    /// no-op.
    pub fn cancel_request(&self) {
        let mut cell = self.lock();
        if let RequestState::Awaiting { request_id, reply } =
            std::mem::replace(&mut cell.state, RequestState::Idle { queued: None })
        {
            tracing::debug!(request_id, "move request cancelled");
            let _ = reply.send(None);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cell> {
        self.cell.lock().expect("controller cell poisoned")
    }
}

impl Default for HumanController {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Controller for HumanController {
    async fn request_move(&self, _game: &Game) -> Option<ProposedMove> {
        let receiver = {
            let mut cell = self.lock();

            // A move supplied before this request was armed is honored
            // immediately.
            if let RequestState::Idle { queued } = &mut cell.state {
                if let Some(mv) = queued.take() {
                    tracing::debug!(from = %mv.0, to = %mv.1, "consuming queued move");
                    return Some(mv);
                }
            }

            cell.next_request_id += 1;
            let request_id = cell.next_request_id;
            let (reply, receiver) = oneshot::channel();
            let previous = std::mem::replace(
                &mut cell.state,
                RequestState::Awaiting { request_id, reply },
            );
            if let RequestState::Awaiting {
                request_id: superseded,
                reply: old_reply,
            } = previous
            {
                // A fresh request supersedes the pending one; the old
                // waiter resolves with no move rather than hanging.
                tracing::debug!(superseded, request_id, "move request superseded");
                let _ = old_reply.send(None);
            }
            tracing::debug!(request_id, "move request armed");
            receiver
        };

        receiver.await.unwrap_or(None)
    }
}
