//! Delivery of completion callbacks onto a designated "main" context.
//!
//! Platform callbacks arrive on arbitrary threads. Callers usually want their
//! completion handlers serialized with the rest of their UI work, so the
//! gateway never runs a handler directly: it hands the handler to a
//! [`MainDispatcher`].

use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Mutex, PoisonError};

use async_channel::{Receiver, Sender, TryRecvError};
use log::debug;

/// A unit of work queued for the main context.
pub type Job = Box<dyn FnOnce() + Send>;

/// A serialized execution context for completion handlers.
///
/// Implementations run jobs one at a time, in the order they were dispatched.
pub trait MainDispatcher: Send + Sync + fmt::Debug {
    /// Queue `job` for execution on the main context.
    fn dispatch(&self, job: Job);
}

thread_local! {
    static MAIN_CONTEXT: Cell<bool> = const { Cell::new(false) };
    static INLINE_ACTIVE: Cell<bool> = const { Cell::new(false) };
}

/// Returns `true` while the current thread is marked as the main context.
///
/// Jobs run by [`MainLoop`] and [`InlineDispatcher`] are marked
/// automatically. Hosts with their own dispatcher mark their UI thread with
/// [`enter_main_context`].
#[must_use]
pub fn is_main_context() -> bool {
    MAIN_CONTEXT.with(Cell::get)
}

/// Mark the current thread as the main context until the guard is dropped.
///
/// A host that implements [`MainDispatcher`] over its own UI loop holds
/// this while running jobs, or for the whole lifetime of the UI thread, so
/// that blocking permission reads refuse to run there.
#[must_use = "the thread stops being the main context when the guard is dropped"]
pub fn enter_main_context() -> MainContextGuard {
    MainContextGuard {
        previous: MAIN_CONTEXT.with(|flag| flag.replace(true)),
        _not_send: PhantomData,
    }
}

/// Keeps the current thread marked as the main context.
///
/// Returned by [`enter_main_context`]. Nested guards restore the previous
/// state in drop order.
pub struct MainContextGuard {
    previous: bool,
    // The mark is thread-local; the guard must be dropped where it was made.
    _not_send: PhantomData<*const ()>,
}

impl fmt::Debug for MainContextGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainContextGuard")
            .field("previous", &self.previous)
            .finish()
    }
}

impl Drop for MainContextGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        MAIN_CONTEXT.with(|flag| flag.set(previous));
    }
}

fn run_job(job: Job) {
    let _guard = enter_main_context();
    job();
}

/// Dispatcher handle feeding a [`MainLoop`].
///
/// Cloning is cheap; the loop keeps running until every handle is dropped.
#[derive(Debug, Clone)]
pub struct MainQueue {
    sender: Sender<Job>,
}

impl MainQueue {
    /// Create a queue and the loop that drains it.
    #[must_use]
    pub fn new() -> (Self, MainLoop) {
        let (sender, receiver) = async_channel::unbounded();
        (Self { sender }, MainLoop { receiver })
    }
}

impl MainDispatcher for MainQueue {
    fn dispatch(&self, job: Job) {
        if self.sender.try_send(job).is_err() {
            debug!("main loop is gone; dropping completion job");
        }
    }
}

/// The draining side of a [`MainQueue`].
///
/// Own this on the thread that acts as the main context.
pub struct MainLoop {
    receiver: Receiver<Job>,
}

impl MainLoop {
    /// Run jobs until every [`MainQueue`] handle has been dropped.
    pub async fn run(self) {
        while let Ok(job) = self.receiver.recv().await {
            run_job(job);
        }
    }

    /// Blocking variant of [`run`](Self::run) for a dedicated thread.
    pub fn run_blocking(self) {
        while let Ok(job) = self.receiver.recv_blocking() {
            run_job(job);
        }
    }

    /// Run every job already queued, without waiting for more.
    ///
    /// Returns the number of jobs that ran. Suited to hosts that pump their
    /// own event loop and want to drain completions once per frame.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(job) => {
                    run_job(job);
                    ran += 1;
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        ran
    }

    /// Number of jobs waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl fmt::Debug for MainLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainLoop")
            .field("pending", &self.receiver.len())
            .finish()
    }
}

static INLINE_LOCK: Mutex<()> = Mutex::new(());

/// Runs jobs on the dispatching thread, one at a time.
///
/// For hosts without a UI thread (CLI tools, services, tests). Every
/// `InlineDispatcher` in the process shares one lock, so jobs dispatched
/// from different threads never overlap; a job that arrives while another
/// is running waits for it. Jobs dispatched from inside a running job run
/// immediately, nested in the outer one.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineDispatcher;

impl MainDispatcher for InlineDispatcher {
    fn dispatch(&self, job: Job) {
        if INLINE_ACTIVE.with(Cell::get) {
            run_job(job);
            return;
        }

        // A panicking job must not wedge later completions.
        let _lock = INLINE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        INLINE_ACTIVE.with(|active| active.set(true));
        let _active = InlineActiveReset;
        run_job(job);
    }
}

struct InlineActiveReset;

impl Drop for InlineActiveReset {
    fn drop(&mut self) {
        INLINE_ACTIVE.with(|active| active.set(false));
    }
}
