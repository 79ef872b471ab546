use tokio::sync::mpsc;

use crate::consts::MAX_PLAYERS;

/// A bounded pool of player IDs, backed by a pre-filled channel exactly like the reference
/// server's buffered `chan int8`. The channel's capacity doubles as the hard cap on concurrent
/// sessions: once it's drained, new connections are told the server is full.
pub struct IdPool {
    tx: mpsc::Sender<i8>,
    rx: mpsc::Receiver<i8>,
}

impl IdPool {
    #[must_use]
    pub fn new(player_count: u8) -> Self {
        let capacity = (player_count as usize).min(MAX_PLAYERS).max(1);
        let (tx, rx) = mpsc::channel(capacity);
        for id in 0..capacity as i8 {
            tx.try_send(id).expect("pool capacity matches fill count");
        }
        Self { tx, rx }
    }

    /// Non-blocking acquire: `None` means the server is at capacity.
    pub fn try_acquire(&mut self) -> Option<i8> {
        self.rx.try_recv().ok()
    }

    pub fn release(&self, id: i8) {
        // The channel can't be full here: we only ever hold as many IDs outstanding as were
        // originally issued, so this send always has room.
        let _ = self.tx.try_send(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquires_up_to_capacity_then_reports_full() {
        let mut pool = IdPool::new(2);
        let a = pool.try_acquire().unwrap();
        let b = pool.try_acquire().unwrap();
        assert_ne!(a, b);
        assert!(pool.try_acquire().is_none());
    }

    #[test]
    fn released_ids_can_be_reacquired() {
        let mut pool = IdPool::new(1);
        let id = pool.try_acquire().unwrap();
        pool.release(id);
        assert_eq!(pool.try_acquire(), Some(id));
    }
}
