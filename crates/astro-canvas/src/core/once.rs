use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide "already initialized" guard for setup routines that must
/// run at most once (logger install, style injection).
///
/// Usable in a `static`:
///
/// ```
/// use astro_canvas::OnceFlag;
/// static STYLES: OnceFlag = OnceFlag::new();
/// assert!(STYLES.run_once(|| {}));
/// assert!(!STYLES.run_once(|| unreachable!()));
/// ```
#[derive(Debug)]
pub struct OnceFlag {
    done: AtomicBool,
}

impl OnceFlag {
    pub const fn new() -> Self {
        Self {
            done: AtomicBool::new(false),
        }
    }

    /// Run `f` if this flag has not fired yet. Returns true when `f` ran.
    pub fn run_once(&self, f: impl FnOnce()) -> bool {
        if self
            .done
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            f();
            true
        } else {
            false
        }
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}

impl Default for OnceFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_exactly_once() {
        let flag = OnceFlag::new();
        let mut count = 0;
        flag.run_once(|| count += 1);
        flag.run_once(|| count += 1);
        flag.run_once(|| count += 1);
        assert_eq!(count, 1);
        assert!(flag.is_done());
    }

    #[test]
    fn static_flag_is_shared() {
        static FLAG: OnceFlag = OnceFlag::new();
        let first = FLAG.run_once(|| {});
        let second = FLAG.run_once(|| {});
        assert!(first);
        assert!(!second);
    }
}
