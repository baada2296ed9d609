//! Fetch lifecycle state and the single-worker fetch queue.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Sender, unbounded};

use crate::generator::padded_size;
use crate::HeightMapChunk;

/// Lifecycle of a chunk's height data.
///
/// `Created → Pending → Fetched → Uploaded`, with `Failed` as the terminal
/// state of an unsuccessful fetch. The upload transition belongs to the
/// external renderer; the core only records it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FetchState {
    Created = 0,
    Pending = 1,
    Fetched = 2,
    Failed = 3,
    Uploaded = 4,
}

impl FetchState {
    fn from_u8(raw: u8) -> FetchState {
        match raw {
            0 => FetchState::Created,
            1 => FetchState::Pending,
            2 => FetchState::Fetched,
            3 => FetchState::Failed,
            _ => FetchState::Uploaded,
        }
    }
}

/// Height samples and their range, produced once by the fetch worker.
#[derive(Debug)]
pub struct FetchedData {
    /// Row-major padded sample grid, nominally in `[0, 1]`.
    pub samples: Vec<f32>,
    pub min_height: f32,
    pub max_height: f32,
}

/// Shared handoff cell between a quadtree node and the fetch worker.
///
/// The worker writes `data` and then flips `state` with `Release`; the
/// interactive thread observes the flip with `Acquire` before touching the
/// samples. Single writer, single reader, no further mutation after the
/// handoff.
pub struct FetchSlot {
    chunk: HeightMapChunk,
    mesh_size: u32,
    state: AtomicU8,
    data: Mutex<Option<FetchedData>>,
}

impl FetchSlot {
    #[must_use]
    pub fn new(chunk: HeightMapChunk, mesh_size: u32) -> Arc<FetchSlot> {
        Arc::new(FetchSlot {
            chunk,
            mesh_size,
            state: AtomicU8::new(FetchState::Created as u8),
            data: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn chunk(&self) -> &HeightMapChunk {
        &self.chunk
    }

    #[must_use]
    pub fn state(&self) -> FetchState {
        FetchState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Whether height data is available (fetched, possibly already uploaded).
    #[must_use]
    pub fn is_fetched(&self) -> bool {
        matches!(self.state(), FetchState::Fetched | FetchState::Uploaded)
    }

    #[must_use]
    pub fn is_uploaded(&self) -> bool {
        self.state() == FetchState::Uploaded
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.state() == FetchState::Failed
    }

    pub(crate) fn mark_pending(&self) {
        self.state
            .store(FetchState::Pending as u8, Ordering::Release);
    }

    /// Run the fetch synchronously on the calling thread.
    ///
    /// Used by the worker for queued slots and directly for root nodes,
    /// which must have data before the first frame.
    pub fn fetch_blocking(&self) {
        let padded = padded_size(self.mesh_size);
        let mut samples = vec![0.0f32; padded * padded];
        let result = self.chunk.fetch_data(self.mesh_size, &mut samples);

        match result {
            Ok(()) => {
                let mut min_height = f32::MAX;
                let mut max_height = f32::MIN;
                for &value in &samples {
                    min_height = min_height.min(value);
                    max_height = max_height.max(value);
                }
                *self.data.lock().unwrap() = Some(FetchedData {
                    samples,
                    min_height,
                    max_height,
                });
                self.state
                    .store(FetchState::Fetched as u8, Ordering::Release);
            }
            Err(err) => {
                tracing::warn!(
                    face = ?self.chunk.face(),
                    x = self.chunk.x(),
                    y = self.chunk.y(),
                    size = self.chunk.size(),
                    %err,
                    "height fetch failed"
                );
                self.state
                    .store(FetchState::Failed as u8, Ordering::Release);
            }
        }
    }

    /// Sampled height range, once fetched.
    #[must_use]
    pub fn height_range(&self) -> Option<(f32, f32)> {
        if !self.is_fetched() {
            return None;
        }
        self.data
            .lock()
            .unwrap()
            .as_ref()
            .map(|d| (d.min_height, d.max_height))
    }

    /// Take the sample buffer for GPU upload.
    ///
    /// Returns `None` until the fetch completes, and on every call after
    /// the first take.
    #[must_use]
    pub fn take_samples(&self) -> Option<Vec<f32>> {
        if !self.is_fetched() {
            return None;
        }
        let mut guard = self.data.lock().unwrap();
        let data = guard.as_mut()?;
        if data.samples.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut data.samples))
    }

    /// Record that the renderer has created GPU resources for this chunk.
    pub fn mark_uploaded(&self) {
        debug_assert!(self.is_fetched(), "upload before fetch completed");
        self.state
            .store(FetchState::Uploaded as u8, Ordering::Release);
    }
}

/// Single-worker asynchronous fetch queue, shared by all six face trees.
///
/// One dedicated thread drains a FIFO channel, so fetches are serialized
/// and strictly ordered by enqueue time. There is no priority and no
/// cancellation; a stale fetch for a node the camera has left simply
/// completes. Dropping the fetcher closes the queue and joins the worker,
/// which is what makes terrain regeneration stop-the-world.
pub struct DataFetcher {
    sender: Option<Sender<Arc<FetchSlot>>>,
    worker: Option<JoinHandle<()>>,
}

impl DataFetcher {
    #[must_use]
    pub fn new() -> DataFetcher {
        let (sender, receiver) = unbounded::<Arc<FetchSlot>>();
        let worker = std::thread::Builder::new()
            .name("terrain-fetch".into())
            .spawn(move || {
                while let Ok(slot) = receiver.recv() {
                    let start = std::time::Instant::now();
                    slot.fetch_blocking();
                    tracing::debug!(
                        face = ?slot.chunk().face(),
                        size = slot.chunk().size(),
                        elapsed_us = start.elapsed().as_micros() as u64,
                        "chunk fetched"
                    );
                }
            })
            .expect("Failed to spawn terrain fetch worker thread");

        DataFetcher {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Fire-and-forget enqueue; the slot becomes `Pending` immediately.
    pub fn fetch(&self, slot: Arc<FetchSlot>) {
        slot.mark_pending();
        if let Some(sender) = &self.sender {
            // A send error means the worker is gone; the slot then stays
            // pending forever, which selection tolerates.
            let _ = sender.send(slot);
        }
    }
}

impl Default for DataFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DataFetcher {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain the backlog and exit.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FetchError, Generator, HeightMap};
    use std::sync::atomic::AtomicUsize;
    use tellus_cubesphere::Face;

    /// Generator that records fetch order and tracks worker concurrency.
    struct RecordingGenerator {
        size: u32,
        order: Mutex<Vec<(u32, u32)>>,
        active: AtomicUsize,
        max_active: AtomicUsize,
        fail: bool,
    }

    impl RecordingGenerator {
        fn new(size: u32, fail: bool) -> RecordingGenerator {
            RecordingGenerator {
                size,
                order: Mutex::new(Vec::new()),
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
                fail,
            }
        }
    }

    impl Generator for RecordingGenerator {
        fn fetch_data(
            &self,
            dest_size: u32,
            _face: Face,
            x: u32,
            y: u32,
            _size: u32,
            out: &mut [f32],
        ) -> Result<(), FetchError> {
            let running = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(running, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(2));

            self.order.lock().unwrap().push((x, y));
            let padded = padded_size(dest_size);
            for v in out.iter_mut().take(padded * padded) {
                *v = 0.5;
            }
            self.active.fetch_sub(1, Ordering::SeqCst);
            if self.fail {
                Err(FetchError::OutOfBounds {
                    x,
                    y,
                    size: 0,
                    face_size: self.size,
                })
            } else {
                Ok(())
            }
        }

        fn size(&self) -> u32 {
            self.size
        }
    }

    fn slots_for(
        generator: &Arc<RecordingGenerator>,
        coords: &[(u32, u32)],
    ) -> Vec<Arc<FetchSlot>> {
        let map = Arc::new(HeightMap::new(generator.clone() as Arc<dyn Generator>));
        coords
            .iter()
            .map(|&(x, y)| FetchSlot::new(map.clone().chunk(Face::Top, x, y, 32), 33))
            .collect()
    }

    #[test]
    fn test_fetches_complete_in_fifo_order() {
        let generator = Arc::new(RecordingGenerator::new(256, false));
        let slots = slots_for(&generator, &[(0, 0), (32, 0), (64, 0)]);

        {
            let fetcher = DataFetcher::new();
            for slot in &slots {
                fetcher.fetch(slot.clone());
                assert_eq!(slot.state(), FetchState::Pending);
            }
            // Drop joins the worker after the backlog drains.
        }

        for slot in &slots {
            assert!(slot.is_fetched(), "slot not fetched after drain");
        }
        assert_eq!(
            *generator.order.lock().unwrap(),
            vec![(0, 0), (32, 0), (64, 0)],
            "fetches must run in enqueue order"
        );
    }

    #[test]
    fn test_single_worker_never_overlaps_fetches() {
        let generator = Arc::new(RecordingGenerator::new(256, false));
        let slots = slots_for(&generator, &[(0, 0), (32, 0), (64, 0), (96, 0)]);

        {
            let fetcher = DataFetcher::new();
            for slot in &slots {
                fetcher.fetch(slot.clone());
            }
        }

        assert_eq!(
            generator.max_active.load(Ordering::SeqCst),
            1,
            "at most one fetch may be in flight"
        );
    }

    #[test]
    fn test_failed_fetch_never_reports_fetched() {
        let generator = Arc::new(RecordingGenerator::new(256, true));
        let slots = slots_for(&generator, &[(0, 0)]);

        {
            let fetcher = DataFetcher::new();
            fetcher.fetch(slots[0].clone());
        }

        assert!(slots[0].is_failed());
        assert!(!slots[0].is_fetched());
        assert!(slots[0].height_range().is_none());
        assert!(slots[0].take_samples().is_none());
    }

    #[test]
    fn test_take_samples_hands_off_exactly_once() {
        let generator = Arc::new(RecordingGenerator::new(256, false));
        let slots = slots_for(&generator, &[(0, 0)]);
        slots[0].mark_pending();
        slots[0].fetch_blocking();

        let samples = slots[0].take_samples().expect("first take yields samples");
        assert_eq!(samples.len(), padded_size(33) * padded_size(33));
        assert!(slots[0].take_samples().is_none(), "second take must be empty");

        // The height range survives the take.
        assert_eq!(slots[0].height_range(), Some((0.5, 0.5)));
    }

    #[test]
    fn test_mark_uploaded_transitions_state() {
        let generator = Arc::new(RecordingGenerator::new(256, false));
        let slots = slots_for(&generator, &[(0, 0)]);
        slots[0].fetch_blocking();

        assert!(slots[0].is_fetched());
        assert!(!slots[0].is_uploaded());
        slots[0].mark_uploaded();
        assert!(slots[0].is_uploaded());
        assert!(slots[0].is_fetched(), "uploaded still counts as fetched");
    }
}
