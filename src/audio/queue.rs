use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};

use crate::audio::block::AudioBlock;

/// What happens to a block that arrives while the queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPolicy {
    /// Discard the incoming block; queued blocks are still rendered.
    DropNewest,
    /// Evict the oldest queued block to make room for the incoming one.
    DropOldest,
}

impl DropPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" | "drop-newest" => Some(DropPolicy::DropNewest),
            "oldest" | "drop-oldest" => Some(DropPolicy::DropOldest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    Enqueued,
    /// The incoming block was discarded.
    Dropped,
    /// The incoming block was queued after evicting the oldest one.
    Displaced,
}

/// Counts blocks lost to a full queue. Cheap to clone and read from the UI.
#[derive(Debug, Clone, Default)]
pub struct DropCounter {
    count: Arc<AtomicU64>,
}

impl DropCounter {
    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn bump(&self) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}

/// Sample buffers circulating between the capture callback and the render
/// loop, so steady-state capture does not allocate.
#[derive(Clone)]
pub struct BufferPool {
    tx: Sender<Vec<f32>>,
    rx: Receiver<Vec<f32>>,
    block_size: usize,
}

impl BufferPool {
    /// `count` buffers of `block_size` capacity, allocated up front.
    pub fn new(count: usize, block_size: usize) -> Self {
        let (tx, rx) = bounded(count.max(1));
        for _ in 0..count {
            let _ = tx.try_send(Vec::with_capacity(block_size));
        }
        Self { tx, rx, block_size }
    }

    /// An empty buffer; allocates only when every pooled buffer is in flight.
    pub fn take(&self) -> Vec<f32> {
        self.rx
            .try_recv()
            .unwrap_or_else(|_| Vec::with_capacity(self.block_size))
    }

    pub fn give_back(&self, mut buffer: Vec<f32>) {
        buffer.clear();
        let _ = self.tx.try_send(buffer);
    }
}

/// Producer half, owned by the capture callback. Never blocks.
pub struct BlockProducer {
    tx: Sender<AudioBlock>,
    // Only held for DropOldest, so the producer can evict from the front.
    evict: Option<Receiver<AudioBlock>>,
    dropped: DropCounter,
    pool: BufferPool,
}

/// Consumer half, owned by the render loop.
pub struct BlockConsumer {
    rx: Receiver<AudioBlock>,
    dropped: DropCounter,
    pool: BufferPool,
}

/// Build a bounded single-producer/single-consumer hand-off queue, with a
/// buffer pool big enough for a full queue plus the block being filled and
/// the block on screen.
pub fn handoff_queue(
    capacity: usize,
    policy: DropPolicy,
    block_size: usize,
) -> (BlockProducer, BlockConsumer) {
    let capacity = capacity.max(1);
    let (tx, rx) = bounded(capacity);
    let dropped = DropCounter::default();
    let pool = BufferPool::new(capacity + 2, block_size);
    let evict = match policy {
        DropPolicy::DropNewest => None,
        DropPolicy::DropOldest => Some(rx.clone()),
    };
    (
        BlockProducer {
            tx,
            evict,
            dropped: dropped.clone(),
            pool: pool.clone(),
        },
        BlockConsumer { rx, dropped, pool },
    )
}

impl BlockProducer {
    pub fn try_enqueue(&self, block: AudioBlock) -> Handoff {
        let block = match self.tx.try_send(block) {
            Ok(()) => return Handoff::Enqueued,
            Err(TrySendError::Disconnected(block)) => {
                self.dropped.bump();
                self.pool.give_back(block.into_samples());
                return Handoff::Dropped;
            }
            Err(TrySendError::Full(block)) => block,
        };

        self.dropped.bump();
        let Some(evict) = &self.evict else {
            self.pool.give_back(block.into_samples());
            return Handoff::Dropped;
        };
        if let Ok(evicted) = evict.try_recv() {
            self.pool.give_back(evicted.into_samples());
        }
        match self.tx.try_send(block) {
            Ok(()) => Handoff::Displaced,
            Err(e) => {
                self.pool.give_back(e.into_inner().into_samples());
                Handoff::Dropped
            }
        }
    }

    pub fn pool(&self) -> BufferPool {
        self.pool.clone()
    }
}

impl BlockConsumer {
    /// Wait up to `timeout` for the oldest queued block.
    pub fn dequeue(&self, timeout: Duration) -> Option<AudioBlock> {
        match self.rx.recv_timeout(timeout) {
            Ok(block) => Some(block),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Return a shown block's buffer for reuse by the capture side.
    pub fn recycle(&self, block: AudioBlock) {
        self.pool.give_back(block.into_samples());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn dropped(&self) -> DropCounter {
        self.dropped.clone()
    }
}
