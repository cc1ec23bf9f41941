//! Cooperative shutdown-veto signal.
//!
//! An ordered list of zero-argument predicates. Polling the signal is a
//! fold-left logical AND over the subscribers' votes, short-circuiting on
//! the first `false`. This is a poll, not a stream: subscribers must not
//! rely on being invoked for side effects, since evaluation may stop early.

/// Opaque token returned by [`ShouldQuitSignal::subscribe`], used to remove
/// the subscription later. Tokens are never reused within one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

type Predicate = Box<dyn FnMut() -> bool>;

/// Multi-subscriber boolean-AND poll used to veto shutdown.
///
/// Each subscriber returns `true` ("ok to quit") or `false` ("veto").
/// With zero subscribers the poll is vacuously `true` — nothing objects.
#[derive(Default)]
pub struct ShouldQuitSignal {
    subscribers: Vec<(SubscriptionToken, Predicate)>,
    next_token: u64,
}

impl ShouldQuitSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber; it will be polled after all existing ones.
    pub fn subscribe<F>(&mut self, predicate: F) -> SubscriptionToken
    where
        F: FnMut() -> bool + 'static,
    {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.subscribers.push((token, Box::new(predicate)));
        token
    }

    /// Remove a subscription. Returns `false` if the token was already
    /// removed (or belongs to another signal).
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(t, _)| *t != token);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Poll all subscribers in subscription order and AND their votes,
    /// stopping at the first veto.
    ///
    /// Runs synchronously on the calling thread with no suspension point;
    /// a subscriber that blocks stalls shutdown for as long as it blocks.
    /// A panicking subscriber propagates: the poll runs on the caller's
    /// stack and a crash must not be mistaken for a veto.
    pub fn poll(&mut self) -> bool {
        for (token, predicate) in &mut self.subscribers {
            if !predicate() {
                log::debug!("shutdown vetoed by subscriber {token:?}");
                return false;
            }
        }
        true
    }
}

impl std::fmt::Debug for ShouldQuitSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShouldQuitSignal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn empty_signal_approves() {
        let mut signal = ShouldQuitSignal::new();
        assert!(signal.poll());
    }

    #[test]
    fn result_is_logical_and() {
        for votes in [
            vec![true],
            vec![false],
            vec![true, true, true],
            vec![true, false, true],
            vec![false, false],
        ] {
            let mut signal = ShouldQuitSignal::new();
            for vote in votes.clone() {
                signal.subscribe(move || vote);
            }
            assert_eq!(signal.poll(), votes.iter().all(|v| *v), "votes: {votes:?}");
        }
    }

    #[test]
    fn poll_short_circuits_after_veto() {
        let mut signal = ShouldQuitSignal::new();
        let polled = Rc::new(Cell::new(0u32));

        let p = Rc::clone(&polled);
        signal.subscribe(move || {
            p.set(p.get() + 1);
            false
        });
        let p = Rc::clone(&polled);
        signal.subscribe(move || {
            p.set(p.get() + 1);
            true
        });

        assert!(!signal.poll());
        // The subscriber after the veto was never invoked.
        assert_eq!(polled.get(), 1);
    }

    #[test]
    fn subscribers_polled_in_subscription_order() {
        let mut signal = ShouldQuitSignal::new();
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));

        for label in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            signal.subscribe(move || {
                order.borrow_mut().push(label);
                true
            });
        }

        assert!(signal.poll());
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_removes_vote() {
        let mut signal = ShouldQuitSignal::new();
        let token = signal.subscribe(|| false);
        signal.subscribe(|| true);

        assert!(!signal.poll());
        assert!(signal.unsubscribe(token));
        assert!(signal.poll());
        // Second removal of the same token is a no-op.
        assert!(!signal.unsubscribe(token));
        assert_eq!(signal.subscriber_count(), 1);
    }
}
