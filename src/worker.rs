//! Background execution with single-shot completion.
//!
//! Every multi-step operation (rotation batch, horizontal composition,
//! thumbnail generation, save) can be submitted as one unit of work to a
//! worker thread. The worker reports back exactly once through a channel;
//! there is no internal fan-out, no cancellation, and no timeout — once
//! submitted, an operation runs to completion or first error.

use std::sync::mpsc;
use std::thread;

use crate::error::{FilmstripError, Result};

/// Handle to one submitted unit of background work.
///
/// The result is delivered exactly once; consuming the handle with
/// [`Task::join`] or [`Task::wait`] blocks until it arrives.
#[derive(Debug)]
pub struct Task<T> {
    receiver: mpsc::Receiver<T>,
}

impl<T: Send + 'static> Task<T> {
    /// Run `work` on a dedicated worker thread.
    pub fn spawn<F>(work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let worker = thread::Builder::new().name("filmstrip-worker".into());
        // If the OS refuses the thread, the closure (and with it the sender)
        // is dropped, which surfaces as WorkerTerminated on join.
        let _ = worker.spawn(move || {
            let _ = sender.send(work());
        });
        Task { receiver }
    }
}

impl<T> Task<T> {
    /// Block until the worker reports its result.
    pub fn join(self) -> Result<T> {
        self.receiver
            .recv()
            .map_err(|_| FilmstripError::WorkerTerminated)
    }
}

impl<T> Task<Result<T>> {
    /// [`Task::join`], flattened for operations that already return a
    /// `Result`.
    pub fn wait(self) -> Result<T> {
        self.join()?
    }
}

/// Fail fast when running on the main thread.
///
/// Full-image decoding is barred from the latency-sensitive entry thread; the
/// runtime names that thread "main", and worker threads spawned here carry
/// their own name.
pub(crate) fn ensure_off_main_thread() -> Result<()> {
    if thread::current().name() == Some("main") {
        return Err(FilmstripError::CalledFromMainThread);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_delivers_result_exactly_once() {
        let task = Task::spawn(|| 7u32);
        assert_eq!(task.join().unwrap(), 7);
    }

    #[test]
    fn task_wait_flattens_results() {
        let ok: Task<Result<u32>> = Task::spawn(|| Ok(3));
        assert_eq!(ok.wait().unwrap(), 3);

        let err: Task<Result<u32>> = Task::spawn(|| Err(FilmstripError::InvalidHeight));
        assert!(matches!(err.wait(), Err(FilmstripError::InvalidHeight)));
    }

    #[test]
    fn panicking_worker_surfaces_as_terminated() {
        let task: Task<u32> = Task::spawn(|| panic!("worker died"));
        assert!(matches!(task.join(), Err(FilmstripError::WorkerTerminated)));
    }

    #[test]
    fn guard_rejects_a_thread_named_main() {
        let result = thread::Builder::new()
            .name("main".into())
            .spawn(ensure_off_main_thread)
            .unwrap()
            .join()
            .unwrap();
        assert!(matches!(result, Err(FilmstripError::CalledFromMainThread)));
    }

    #[test]
    fn guard_allows_worker_threads() {
        let task = Task::spawn(ensure_off_main_thread);
        assert!(task.join().unwrap().is_ok());
    }
}
