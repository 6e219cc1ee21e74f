use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

pub type Task = Box<dyn FnOnce()>;

/// Returned by `Scheduler::schedule`. Holding it is optional; a timer that is
/// never cancelled simply fires.
#[derive(Clone, Debug, Default)]
pub struct TimerHandle {
	cancelled: Rc<Cell<bool>>,
}

impl TimerHandle {
	pub fn cancel(&self) {
		self.cancelled.set(true);
	}

	pub fn is_cancelled(&self) -> bool {
		self.cancelled.get()
	}

	/// Wrap `task` so it becomes a no-op once this handle is cancelled.
	pub fn guard(&self, task: Task) -> Task {
		let cancelled = self.cancelled.clone();
		Box::new(move || {
			if !cancelled.get() {
				task()
			}
		})
	}
}

pub trait Scheduler {
	fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;
}

struct Pending {
	due: Duration,
	seq: u64,
	task: Task,
}

/// Scheduler driven by a virtual clock. Nothing runs until `advance` is called.
#[derive(Default)]
pub struct ManualScheduler {
	now: Cell<Duration>,
	seq: Cell<u64>,
	queue: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn now(&self) -> Duration {
		self.now.get()
	}

	pub fn pending(&self) -> usize {
		self.queue.borrow().len()
	}

	/// Move the clock forward by `by`, running every task that falls due, in
	/// due-time order then registration order. Tasks may schedule more tasks.
	pub fn advance(&self, by: Duration) {
		let target = self.now.get().saturating_add(by);
		while let Some(pending) = self.pop_due(target) {
			self.now.set(pending.due);
			(pending.task)();
		}
		self.now.set(target);
	}

	/// Run everything currently scheduled, however far in the future.
	pub fn run_all(&self) {
		let last = self.queue.borrow().iter().map(|p| p.due).max();
		if let Some(last) = last {
			self.advance(last.saturating_sub(self.now.get()));
		}
	}

	fn pop_due(&self, target: Duration) -> Option<Pending> {
		let mut queue = self.queue.borrow_mut();
		let next = queue.iter()
			.enumerate()
			.filter(|(_, p)| p.due <= target)
			.min_by_key(|(_, p)| (p.due, p.seq))
			.map(|(i, _)| i)?;
		Some(queue.remove(next))
	}
}

impl Scheduler for ManualScheduler {
	fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
		let handle = TimerHandle::default();
		let seq = self.seq.get();
		self.seq.set(seq + 1);
		self.queue.borrow_mut().push(Pending {
			due: self.now.get().saturating_add(delay),
			seq,
			task: handle.guard(task),
		});
		handle
	}
}

#[cfg(test)]
pub mod test {
	use super::*;

	fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
		let log = Rc::new(RefCell::new(Vec::new()));
		let log_ = log.clone();
		(log, move |name: &'static str| {
			let log = log_.clone();
			Box::new(move || log.borrow_mut().push(name)) as Task
		})
	}

	#[test]
	pub fn test_runs_in_due_order() {
		let sched = ManualScheduler::new();
		let (log, task) = recorder();
		sched.schedule(Duration::from_millis(200), task("late"));
		sched.schedule(Duration::from_millis(0), task("first"));
		sched.schedule(Duration::from_millis(100), task("a"));
		sched.schedule(Duration::from_millis(100), task("b"));

		sched.advance(Duration::from_millis(150));
		assert_eq!(*log.borrow(), vec!["first", "a", "b"]);
		assert_eq!(sched.pending(), 1);
		assert_eq!(sched.now(), Duration::from_millis(150));

		sched.advance(Duration::from_millis(50));
		assert_eq!(*log.borrow(), vec!["first", "a", "b", "late"]);
	}

	#[test]
	pub fn test_cancelled_timer_does_not_fire() {
		let sched = ManualScheduler::new();
		let (log, task) = recorder();
		let handle = sched.schedule(Duration::from_millis(10), task("cancelled"));
		sched.schedule(Duration::from_millis(10), task("kept"));
		handle.cancel();
		sched.run_all();
		assert!(handle.is_cancelled());
		assert_eq!(*log.borrow(), vec!["kept"]);
	}

	#[test]
	pub fn test_far_future_saturates() {
		let sched = ManualScheduler::new();
		let (log, task) = recorder();
		sched.advance(Duration::from_millis(5));
		sched.schedule(Duration::MAX, task("never"));
		sched.schedule(Duration::from_millis(1), task("soon"));
		sched.advance(Duration::MAX);
		assert_eq!(sched.now(), Duration::MAX);
		assert_eq!(*log.borrow(), vec!["soon", "never"]);
	}

	#[test]
	pub fn test_nested_schedule_runs_within_same_advance() {
		let sched = Rc::new(ManualScheduler::new());
		let (log, task) = recorder();
		let inner = task("inner");
		let sched_ = sched.clone();
		sched.schedule(Duration::from_millis(10), Box::new(move || {
			sched_.schedule(Duration::from_millis(10), inner);
		}));
		sched.advance(Duration::from_millis(25));
		assert_eq!(*log.borrow(), vec!["inner"]);
	}
}
