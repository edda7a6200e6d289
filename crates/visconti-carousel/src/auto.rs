//! Auto-advance driver.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::carousel::{Carousel, Navigation};
use crate::config::CarouselConfig;
use crate::swipe::Swipe;

type Shared<T> = Arc<Mutex<Carousel<T>>>;

fn lock<T>(carousel: &Mutex<Carousel<T>>) -> MutexGuard<'_, Carousel<T>> {
    carousel.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owns a carousel and a background task that advances it.
///
/// The task ticks every `auto_advance` and ends each transition after
/// `settle_delay`. Any manual move restarts the timer, so the next automatic
/// advance comes a full interval after the user's last action. Dropping the
/// player aborts the task.
///
/// Must be created inside a tokio runtime.
pub struct AutoPlayer<T> {
    carousel: Shared<T>,
    config: CarouselConfig,
    index_tx: watch::Sender<usize>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> AutoPlayer<T> {
    /// Take ownership of `carousel` and start advancing it if it can move.
    pub fn start(carousel: Carousel<T>, config: CarouselConfig) -> Self {
        let (index_tx, _) = watch::channel(carousel.current_index());
        let mut player = Self {
            carousel: Arc::new(Mutex::new(carousel)),
            config,
            index_tx,
            task: None,
        };
        player.restart();
        player
    }

    /// Observe the current index.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index_tx.subscribe()
    }

    pub fn current_index(&self) -> usize {
        lock(&self.carousel).current_index()
    }

    /// Read the carousel.
    pub fn with_carousel<R>(&self, f: impl FnOnce(&Carousel<T>) -> R) -> R {
        f(&lock(&self.carousel))
    }

    /// Whether a background task is pending.
    pub fn is_scheduled(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub fn next(&mut self) -> Navigation {
        self.manual(|c| c.next())
    }

    pub fn prev(&mut self) -> Navigation {
        self.manual(|c| c.prev())
    }

    pub fn go_to(&mut self, k: usize) -> Navigation {
        self.manual(|c| c.go_to(k))
    }

    pub fn swipe(&mut self, swipe: Swipe) -> Navigation {
        self.manual(|c| c.apply_swipe(swipe))
    }

    /// Replace the slides, reset to the first one and restart the timer.
    pub fn replace_items(&mut self, items: Vec<T>) {
        lock(&self.carousel).replace_items(items);
        self.index_tx.send_replace(0);
        self.restart();
    }

    /// Cancel the background task. Manual navigation restarts it.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("carousel auto-advance stopped");
        }
    }

    fn manual(&mut self, action: impl FnOnce(&mut Carousel<T>) -> Navigation) -> Navigation {
        let navigation = action(&mut lock(&self.carousel));
        if let Navigation::Moved { to, .. } = navigation {
            self.index_tx.send_replace(to);
            self.restart();
        }
        navigation
    }

    fn restart(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        let (advancing, pending) = {
            let carousel = lock(&self.carousel);
            (
                self.config.auto_advances() && carousel.can_navigate(),
                carousel.is_transitioning(),
            )
        };
        if !advancing && !pending {
            return;
        }

        let interval = advancing.then_some(self.config.auto_advance);
        self.task = Some(tokio::spawn(run(
            Arc::clone(&self.carousel),
            self.index_tx.clone(),
            interval,
            self.config.settle_delay,
        )));
    }
}

impl<T> Drop for AutoPlayer<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl<T> std::fmt::Debug for AutoPlayer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutoPlayer")
            .field("config", &self.config)
            .field("index", &*self.index_tx.borrow())
            .field("scheduled", &self.task.is_some())
            .finish()
    }
}

/// Settle any pending transition, then tick every `interval` if given.
async fn run<T>(
    carousel: Shared<T>,
    index_tx: watch::Sender<usize>,
    interval: Option<Duration>,
    settle_delay: Duration,
) {
    let started = Instant::now();
    settle_after(&carousel, started, settle_delay).await;

    let Some(interval) = interval else {
        return;
    };

    let mut next_tick = started + interval;
    loop {
        tokio::time::sleep_until(next_tick).await;
        let navigation = lock(&carousel).next();
        if let Navigation::Moved { to, .. } = navigation {
            tracing::trace!(to, "carousel auto-advanced");
            index_tx.send_replace(to);
        }
        let ticked = next_tick;
        next_tick += interval;
        settle_after(&carousel, ticked, settle_delay).await;
    }
}

async fn settle_after<T>(carousel: &Mutex<Carousel<T>>, moved_at: Instant, settle_delay: Duration) {
    if !lock(carousel).is_transitioning() {
        return;
    }
    tokio::time::sleep_until(moved_at + settle_delay).await;
    lock(carousel).settle();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CarouselConfig {
        CarouselConfig::default()
    }

    async fn advance(millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_advances_on_interval() {
        let player = AutoPlayer::start(Carousel::new(vec!['a', 'b', 'c'], Duration::from_millis(500)), config());
        assert!(player.is_scheduled());

        advance(3999).await;
        assert_eq!(player.current_index(), 0);

        advance(2).await;
        assert_eq!(player.current_index(), 1);
        assert!(player.with_carousel(|c| c.is_transitioning()));

        advance(500).await;
        assert!(!player.with_carousel(|c| c.is_transitioning()));

        advance(4000).await;
        assert_eq!(player.current_index(), 2);

        advance(4000).await;
        assert_eq!(player.current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_navigation_restarts_timer() {
        let mut player = AutoPlayer::start(Carousel::new(vec![1, 2, 3, 4], Duration::from_millis(500)), config());

        advance(3000).await;
        assert!(player.next().moved());
        assert_eq!(player.current_index(), 1);

        // The tick first scheduled for 4000 no longer fires.
        advance(1500).await;
        assert_eq!(player.current_index(), 1);

        // 7000: a full interval after the click.
        advance(2499).await;
        assert_eq!(player.current_index(), 1);
        advance(2).await;
        assert_eq!(player.current_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_transition_settles_without_autoplay() {
        let config = CarouselConfig {
            auto_play: false,
            ..config()
        };
        let mut player = AutoPlayer::start(Carousel::new(vec![1, 2, 3], Duration::from_millis(500)), config);
        assert!(!player.is_scheduled());

        player.next();
        assert!(player.with_carousel(|c| c.is_transitioning()));

        advance(501).await;
        assert!(!player.with_carousel(|c| c.is_transitioning()));

        advance(10_000).await;
        assert_eq!(player.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_item_never_schedules() {
        for items in [vec![], vec!["only"]] {
            let mut player = AutoPlayer::start(Carousel::new(items, Duration::from_millis(500)), config());
            assert!(!player.is_scheduled());
            assert!(!player.next().moved());
            assert!(!player.is_scheduled());

            advance(10_000).await;
            assert_eq!(player.current_index(), 0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_never_ticks() {
        let config = CarouselConfig {
            auto_advance: Duration::ZERO,
            ..config()
        };
        let mut player = AutoPlayer::start(Carousel::new(vec![1, 2, 3], Duration::from_millis(500)), config);
        assert!(!player.is_scheduled());

        // A manual move only schedules the settle.
        assert!(player.next().moved());
        advance(501).await;
        assert!(!player.is_scheduled());

        advance(10_000).await;
        assert_eq!(player.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_ticks() {
        let mut player = AutoPlayer::start(Carousel::new(vec![1, 2], Duration::ZERO), config());
        player.stop();
        assert!(!player.is_scheduled());

        advance(20_000).await;
        assert_eq!(player.current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let player = AutoPlayer::start(Carousel::new(vec![1, 2], Duration::ZERO), config());
        let mut rx = player.subscribe();
        drop(player);

        // The sender lives in the aborted task and in the player; both are gone.
        advance(10).await;
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replace_items_resets_and_publishes() {
        let mut player = AutoPlayer::start(Carousel::new(vec![1, 2, 3], Duration::ZERO), config());
        let mut rx = player.subscribe();

        advance(4001).await;
        assert_eq!(*rx.borrow_and_update(), 1);

        player.replace_items(vec![10, 20]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 0);

        advance(3999).await;
        assert_eq!(player.current_index(), 0);
        advance(2).await;
        assert_eq!(player.current_index(), 1);
        assert_eq!(player.with_carousel(|c| c.current().copied()), Some(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_publishes_auto_moves() {
        let player = AutoPlayer::start(Carousel::new(vec!['x', 'y'], Duration::ZERO), config());
        let mut rx = player.subscribe();

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
    }
}
