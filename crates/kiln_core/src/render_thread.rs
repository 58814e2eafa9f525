//! Background render loop with a single-slot frame handoff.
//!
//! One packed B, G, R frame buffer shuttles between two bounded channels:
//! the worker renders into it and sends it on `ready`; the consumer copies
//! it out and hands it back on `recycle`. A frame is never rendered while
//! the previous one is still waiting to be consumed.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use thiserror::Error;

use crate::copy::{CopyError, CopyTarget};
use crate::frame::FrameSource;

/// Errors that can occur in the render thread.
#[derive(Error, Debug)]
pub enum RenderThreadError {
    #[error("Failed to spawn render thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Render thread panicked")]
    Panicked,

    #[error("Render thread has stopped")]
    Stopped,

    #[error("Copy failed: {0}")]
    Copy(#[from] CopyError),
}

pub type RenderThreadResult<T> = Result<T, RenderThreadError>;

/// Handle to a background thread that renders frames from a [`FrameSource`].
pub struct RenderThread {
    width: u32,
    height: u32,
    ready_rx: Receiver<Vec<u8>>,
    recycle_tx: Option<Sender<Vec<u8>>>,
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl RenderThread {
    /// Move `source` onto a new thread and start rendering.
    pub fn spawn<S>(source: S) -> RenderThreadResult<Self>
    where
        S: FrameSource + 'static,
    {
        let (width, height) = source.dimensions();
        let (ready_tx, ready_rx) = bounded::<Vec<u8>>(1);
        let (recycle_tx, recycle_rx) = bounded::<Vec<u8>>(1);

        // The only frame buffer; seeding the recycle slot lets the worker start.
        recycle_tx
            .send(vec![0u8; width as usize * height as usize * 3])
            .map_err(|_| RenderThreadError::Stopped)?;

        let stop = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));

        let worker_stop = Arc::clone(&stop);
        let worker_frames = Arc::clone(&frames);
        let handle = thread::Builder::new()
            .name("kiln-render".into())
            .spawn(move || {
                render_loop(source, recycle_rx, ready_tx, worker_stop, worker_frames)
            })?;

        log::info!("Render thread started ({}x{})", width, height);

        Ok(Self {
            width,
            height,
            ready_rx,
            recycle_tx: Some(recycle_tx),
            stop,
            frames,
            handle: Some(handle),
        })
    }

    /// Internal resolution of the frames this thread produces.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames.load(Ordering::Relaxed)
    }

    /// Copy a finished frame into `dst` if one is ready. Never blocks.
    ///
    /// Returns `Ok(false)` when no new frame is available.
    pub fn try_copy(&self, dst: &mut [u8], pitch: usize) -> RenderThreadResult<bool> {
        match self.ready_rx.try_recv() {
            Ok(frame) => {
                self.consume(frame, dst, pitch)?;
                Ok(true)
            }
            Err(TryRecvError::Empty) => Ok(false),
            Err(TryRecvError::Disconnected) => Err(RenderThreadError::Stopped),
        }
    }

    /// Wait up to `timeout` for a frame, then copy it into `dst`.
    pub fn wait_copy(&self, dst: &mut [u8], pitch: usize, timeout: Duration) -> RenderThreadResult<bool> {
        match self.ready_rx.recv_timeout(timeout) {
            Ok(frame) => {
                self.consume(frame, dst, pitch)?;
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => Err(RenderThreadError::Stopped),
        }
    }

    fn consume(&self, frame: Vec<u8>, dst: &mut [u8], pitch: usize) -> RenderThreadResult<()> {
        let target = CopyTarget::new(dst, self.width, self.height, pitch);
        let copied = target.validate().map(|()| {
            let row_len = self.width as usize * 3;
            for (row, src) in frame.chunks_exact(row_len).enumerate() {
                let start = row * pitch;
                target.bytes[start..start + row_len].copy_from_slice(src);
            }
        });

        // Hand the buffer back even when the destination was rejected.
        if let Some(recycle) = &self.recycle_tx {
            let _ = recycle.send(frame);
        }
        copied.map_err(RenderThreadError::from)
    }

    /// Stop the worker and wait for it to finish its current frame.
    pub fn shutdown(&mut self) -> RenderThreadResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        self.stop.store(true, Ordering::Release);
        // Dropping the recycle sender wakes a worker blocked waiting for the buffer.
        self.recycle_tx = None;

        handle.join().map_err(|_| RenderThreadError::Panicked)?;
        log::info!("Render thread stopped after {} frames", self.frames_rendered());
        Ok(())
    }
}

impl Drop for RenderThread {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            log::error!("{}", err);
        }
    }
}

fn render_loop<S: FrameSource>(
    mut source: S,
    recycle_rx: Receiver<Vec<u8>>,
    ready_tx: Sender<Vec<u8>>,
    stop: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
) {
    let (width, height) = source.dimensions();

    while !stop.load(Ordering::Acquire) {
        let Ok(mut buffer) = recycle_rx.recv() else {
            break;
        };
        if stop.load(Ordering::Acquire) {
            break;
        }

        source.render();

        let mut target = CopyTarget::packed(&mut buffer, width, height);
        if let Err(err) = source.copy_buffer(&mut target) {
            log::error!("Render thread copy failed: {}", err);
            break;
        }

        frames.fetch_add(1, Ordering::Relaxed);
        if ready_tx.send(buffer).is_err() {
            break;
        }
    }

    log::debug!("Render loop exiting");
}
