use core::sync::atomic::{AtomicBool, Ordering};

use lock_api::RawMutex;

/// Test-and-test-and-set spinlock.
///
/// Not reentrant: a context that already holds the lock spins forever on a
/// second `lock`. Callers that may nest use `try_lock`.
pub struct RawSpinlock {
    lock: AtomicBool,
}

unsafe impl RawMutex for RawSpinlock {
    type GuardMarker = lock_api::GuardSend;

    #[allow(clippy::declare_interior_mutable_const)]
    const INIT: Self = Self {
        lock: AtomicBool::new(false),
    };

    fn lock(&self) {
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            while self.lock.load(Ordering::Relaxed) {
                core::hint::spin_loop();
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.lock
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.lock.store(false, Ordering::Release);
    }
}

pub type Mutex<T> = lock_api::Mutex<RawSpinlock, T>;
pub type MutexGuard<'a, T> = lock_api::MutexGuard<'a, RawSpinlock, T>;
