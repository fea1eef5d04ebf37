// A self-rescheduling frame task that can be cancelled. At most one frame
// request is ever outstanding; starting again cancels the old one first.

use crate::error::FieldError;

pub trait FrameScheduler {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    // Ask the host to run the frame callback once, on its next refresh
    fn request_frame(&mut self) -> Result<Self::Handle, FieldError>;

    // Must tolerate handles that already fired or were cancelled before
    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub struct FrameLoop<F: FrameScheduler> {
    scheduler: F,
    live: Option<F::Handle>,
}

impl<F: FrameScheduler> FrameLoop<F> {
    pub fn new(scheduler: F) -> Self {
        FrameLoop {
            scheduler,
            live: None,
        }
    }

    pub fn start(&mut self) -> Result<(), FieldError> {
        self.stop();
        self.live = Some(self.scheduler.request_frame()?);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.live.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    // Called from inside the frame callback. The request that woke us up is
    // spent, so only a new request is needed. Does nothing once stopped.
    pub fn reschedule(&mut self) -> Result<(), FieldError> {
        if self.live.take().is_none() {
            return Ok(());
        }
        self.live = Some(self.scheduler.request_frame()?);
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.live.is_some()
    }

    pub fn live_handle(&self) -> Option<F::Handle> {
        self.live
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<F: FrameScheduler> Drop for FrameLoop<F> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
pub mod manual {
    // Scheduler driven by hand from tests: frames only "fire" when asked

    use super::*;

    #[derive(Default)]
    pub struct ManualScheduler {
        next: u32,
        pub pending: Vec<u32>,
        pub cancelled: Vec<u32>,
        pub fail_next: bool,
    }

    impl FrameScheduler for ManualScheduler {
        type Handle = u32;

        fn request_frame(&mut self) -> Result<u32, FieldError> {
            if self.fail_next {
                self.fail_next = false;
                return Err(FieldError::Scheduler("refused".to_owned()));
            }
            self.next += 1;
            self.pending.push(self.next);
            Ok(self.next)
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.pending.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    impl ManualScheduler {
        // Pops the oldest pending request as if the host had run it
        pub fn fire(&mut self) -> Option<u32> {
            if self.pending.is_empty() {
                None
            } else {
                Some(self.pending.remove(0))
            }
        }
    }
}
