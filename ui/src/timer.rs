use std::time::Duration;

use gloo_timers::callback::Timeout;

use loginpage::timer::{Scheduler, Task, TimerHandle};

// browsers treat longer delays as negative and fire at once
const MAX_DELAY_MS: u32 = i32::MAX as u32;

fn delay_millis(delay: Duration) -> u32 {
	u32::try_from(delay.as_millis()).unwrap_or(MAX_DELAY_MS).min(MAX_DELAY_MS)
}

/// Fire-and-forget `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
		let handle = TimerHandle::default();
		Timeout::new(delay_millis(delay), handle.guard(task)).forget();
		handle
	}
}

#[cfg(test)]
pub mod test {
	use super::*;

	#[test]
	pub fn test_delay_is_clamped_to_set_timeout_range() {
		assert_eq!(delay_millis(Duration::from_millis(500)), 500);
		assert_eq!(delay_millis(Duration::from_millis(i32::MAX as u64 + 1)), i32::MAX as u32);
		assert_eq!(delay_millis(Duration::MAX), i32::MAX as u32);
	}
}
