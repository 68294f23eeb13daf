//! [`Debounce`]d values.

use std::{future, time::Duration};

use tokio::{sync::watch, task::JoinHandle, time};

/// Delay used by [`Debounce::with_default_delay()`].
pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

/// Value lagging behind a rapidly changing source.
///
/// The debounced value is updated to the source's current value only after
/// the source stays unchanged for the configured delay. Each [`set()`] call
/// restarts the waiting window, so superseded intermediate values are never
/// propagated.
///
/// Dropping a [`Debounce`] cancels any pending update.
///
/// [`set()`]: Debounce::set
#[derive(Debug)]
pub struct Debounce<T> {
    /// How the source value reaches the debounced one.
    mode: Mode<T>,

    /// Receiver of the debounced value.
    debounced: watch::Receiver<T>,

    /// Delay of this [`Debounce`].
    delay: Duration,
}

/// Propagation mode of a [`Debounce`].
#[derive(Debug)]
enum Mode<T> {
    /// Source value is propagated right away.
    Immediate(watch::Sender<T>),

    /// Source value is propagated by a timer task.
    Delayed {
        /// Sender of the source value.
        source: watch::Sender<T>,

        /// Task propagating the source value.
        task: JoinHandle<()>,
    },
}

impl<T> Debounce<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Creates a new [`Debounce`] starting with the `initial` value.
    ///
    /// Zero `delay` means immediate propagation.
    ///
    /// # Panics
    ///
    /// If called outside of a [`tokio`] runtime with a non-zero `delay`.
    #[must_use]
    pub fn new(initial: T, delay: Duration) -> Self {
        let (output, debounced) = watch::channel(initial.clone());

        let mode = if delay.is_zero() {
            Mode::Immediate(output)
        } else {
            let (source, changes) = watch::channel(initial);
            Mode::Delayed {
                source,
                task: tokio::spawn(propagate(changes, output, delay)),
            }
        };

        Self {
            mode,
            debounced,
            delay,
        }
    }

    /// Creates a new [`Debounce`] with the [`DEFAULT_DELAY`].
    ///
    /// # Panics
    ///
    /// If called outside of a [`tokio`] runtime.
    #[must_use]
    pub fn with_default_delay(initial: T) -> Self {
        Self::new(initial, DEFAULT_DELAY)
    }

    /// Creates a new [`Debounce`] with a delay in milliseconds.
    ///
    /// Zero or negative `millis` mean immediate propagation.
    ///
    /// # Panics
    ///
    /// If called outside of a [`tokio`] runtime with a positive delay.
    #[must_use]
    pub fn from_millis(initial: T, millis: i64) -> Self {
        let delay = u64::try_from(millis)
            .map(Duration::from_millis)
            .unwrap_or_default();
        Self::new(initial, delay)
    }
}

impl<T: Clone> Debounce<T> {
    /// Replaces the source value, restarting the waiting window.
    pub fn set(&self, value: T) {
        match &self.mode {
            Mode::Immediate(output) => {
                _ = output.send_replace(value);
            }
            Mode::Delayed { source, .. } => {
                _ = source.send_replace(value);
            }
        }
    }

    /// Returns the current debounced value.
    #[must_use]
    pub fn get(&self) -> T {
        self.debounced.borrow().clone()
    }

    /// Returns the current (not yet debounced) source value.
    #[must_use]
    pub fn source(&self) -> T {
        match &self.mode {
            Mode::Immediate(output) => output.borrow().clone(),
            Mode::Delayed { source, .. } => source.borrow().clone(),
        }
    }

    /// Returns the delay of this [`Debounce`].
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Subscribes to the debounced value updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.debounced.clone()
    }

    /// Waits for the next update of the debounced value and returns it.
    ///
    /// Cancel safe.
    pub async fn changed(&mut self) -> T {
        if self.debounced.changed().await.is_err() {
            // Propagation is over, so no update is coming anymore.
            future::pending::<()>().await;
        }
        self.debounced.borrow_and_update().clone()
    }
}

impl<T> Drop for Debounce<T> {
    fn drop(&mut self) {
        if let Mode::Delayed { task, .. } = &self.mode {
            task.abort();
        }
    }
}

/// Propagates `source` changes into `output` once they settle for `delay`.
async fn propagate<T: Clone>(
    mut source: watch::Receiver<T>,
    output: watch::Sender<T>,
    delay: Duration,
) {
    while source.changed().await.is_ok() {
        loop {
            tokio::select! {
                changed = source.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                () = time::sleep(delay) => break,
            }
        }
        let value = source.borrow_and_update().clone();
        _ = output.send_replace(value);
    }
}

#[cfg(test)]
mod spec {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use tokio::time::{self, Instant};

    use super::{Debounce, DEFAULT_DELAY};

    const DELAY: Duration = Duration::from_millis(300);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn propagates_after_quiet_period() {
        let debounce = Debounce::new(String::new(), DELAY);

        debounce.set("a".into());
        assert_eq!(debounce.source(), "a");

        time::sleep(ms(299)).await;
        assert_eq!(debounce.get(), "");

        time::sleep(ms(2)).await;
        assert_eq!(debounce.get(), "a");
    }

    #[tokio::test(start_paused = true)]
    async fn burst_produces_single_update_with_last_value() {
        let mut debounce = Debounce::new(String::new(), DELAY);
        let start = Instant::now();

        let updates = Arc::new(Mutex::new(Vec::new()));
        let mut rx = debounce.subscribe();
        let collector = tokio::spawn({
            let updates = Arc::clone(&updates);
            async move {
                while rx.changed().await.is_ok() {
                    let value = rx.borrow_and_update().clone();
                    updates.lock().unwrap().push((start.elapsed(), value));
                }
            }
        });

        debounce.set("w".into());
        time::sleep(ms(100)).await;
        debounce.set("wi".into());
        time::sleep(ms(100)).await;
        debounce.set("wire".into());

        assert_eq!(debounce.changed().await, "wire");
        assert_eq!(start.elapsed(), ms(500));

        time::sleep(ms(1_000)).await;
        assert_eq!(*updates.lock().unwrap(), [(ms(500), "wire".to_owned())]);

        collector.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn returning_to_original_value_still_restarts_window() {
        let debounce = Debounce::new("x", DELAY);
        let mut rx = debounce.subscribe();

        debounce.set("y");
        time::sleep(ms(200)).await;
        debounce.set("x");

        time::sleep(ms(200)).await;
        assert!(!rx.has_changed().unwrap());

        time::sleep(ms(101)).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), "x");
    }

    #[tokio::test(start_paused = true)]
    async fn zero_or_negative_delay_is_immediate() {
        let zero = Debounce::new(0, Duration::ZERO);
        zero.set(1);
        assert_eq!(zero.get(), 1);

        let negative = Debounce::from_millis(0, -10);
        negative.set(2);
        assert_eq!(negative.get(), 2);
        assert_eq!(negative.delay(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_pending_update() {
        let debounce = Debounce::new(String::new(), DELAY);
        let rx = debounce.subscribe();

        debounce.set("late".into());
        time::sleep(ms(100)).await;
        drop(debounce);

        time::sleep(ms(1_000)).await;
        assert_eq!(*rx.borrow(), "");
        assert!(!matches!(rx.has_changed(), Ok(true)));
    }

    #[tokio::test(start_paused = true)]
    async fn default_delay_is_half_a_second() {
        let debounce = Debounce::with_default_delay(0_u8);
        assert_eq!(debounce.delay(), DEFAULT_DELAY);
        assert_eq!(DEFAULT_DELAY, ms(500));

        debounce.set(1);
        time::sleep(ms(499)).await;
        assert_eq!(debounce.get(), 0);
        time::sleep(ms(2)).await;
        assert_eq!(debounce.get(), 1);
    }
}
