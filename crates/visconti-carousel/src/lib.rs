//! Carousel navigation for the Visconti storefront.
//!
//! Every slider on the site (menu highlights, chef photos, the printed menu
//! pages) shares the same behavior:
//!
//! - **Navigation**: `next`/`prev` wrap around, `go_to` jumps, and a short
//!   transition blocks re-entrant moves
//! - **Swipes**: horizontal gestures of at least 50px move one slide
//! - **Auto-advance**: a tokio task ticks every few seconds and restarts on
//!   every manual move
//!
//! # Example
//!
//! ```rust,ignore
//! use visconti_carousel::prelude::*;
//!
//! let config = CarouselConfig::default();
//! let mut player = AutoPlayer::start(Carousel::with_config(slides, &config), config);
//!
//! let mut index = player.subscribe();
//! while index.changed().await.is_ok() {
//!     println!("now showing slide {}", *index.borrow());
//! }
//! ```

mod auto;
mod carousel;
mod config;
mod swipe;

pub use auto::AutoPlayer;
pub use carousel::{Carousel, Direction, Ignored, Navigation};
pub use config::CarouselConfig;
pub use swipe::{Swipe, SwipeTracker};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AutoPlayer, Carousel, CarouselConfig, Direction, Navigation, Swipe, SwipeTracker};
}
