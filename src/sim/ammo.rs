//! Ammo and reload resource state machine
//!
//! Gates whether a trigger pull actually fires. Ready (loaded > 0, not
//! reloading) -> Empty -> Reloading -> Ready. The reload runs as elapsed
//! time advanced inside the frame tick, never as a blocking wait.

use serde::{Deserialize, Serialize};

use crate::consts::{MAG_SIZE, RELOAD_SECS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmmoState {
    pub loaded: u8,
    pub reserve: u32,
    pub reloading: bool,
    reload_elapsed: f32,
}

impl AmmoState {
    pub fn new(reserve: u32) -> Self {
        Self {
            loaded: MAG_SIZE,
            reserve,
            reloading: false,
            reload_elapsed: 0.0,
        }
    }

    /// True when a shot may be fired this frame
    pub fn ready(&self) -> bool {
        self.loaded > 0 && !self.reloading
    }

    /// Consume one round. Returns false (and changes nothing) unless
    /// ready. Emptying the magazine auto-requests a reload.
    pub fn consume(&mut self) -> bool {
        if !self.ready() {
            return false;
        }
        self.loaded -= 1;
        if self.loaded == 0 {
            self.request_reload();
        }
        true
    }

    /// Begin reloading. Returns true if the reload actually started;
    /// a request while already reloading or with an empty reserve is a
    /// no-op.
    pub fn request_reload(&mut self) -> bool {
        if self.reloading || self.reserve == 0 {
            return false;
        }
        self.reloading = true;
        self.reload_elapsed = 0.0;
        log::debug!(
            "reload started (loaded={}, reserve={})",
            self.loaded,
            self.reserve
        );
        true
    }

    /// Advance the reload timer; refills the magazine from the reserve
    /// once the fixed duration has elapsed. Returns true on the frame the
    /// reload finishes.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.reloading {
            return false;
        }
        self.reload_elapsed += dt;
        if self.reload_elapsed < RELOAD_SECS {
            return false;
        }
        let take = u32::from(MAG_SIZE - self.loaded).min(self.reserve) as u8;
        self.loaded += take;
        self.reserve -= u32::from(take);
        self.reloading = false;
        debug_assert!(self.loaded <= MAG_SIZE);
        log::debug!(
            "reload finished (loaded={}, reserve={})",
            self.loaded,
            self.reserve
        );
        true
    }
}
