//! Shared state store for Bevy → host communication.
//!
//! Bevy systems write a summary of the focus state here; the WASM entry
//! points read it without touching the ECS world.

use std::sync::Arc;

use bevy::prelude::Resource;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::transition::{FocusPhase, IntroPhase};

/// Focus and camera-transition summary for the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FocusSummary {
    pub focused: bool,
    pub position: Option<[f32; 3]>,
    pub intro_phase: String,
    pub focus_phase: String,
    pub scalar: f32,
    pub animating: bool,
}

impl FocusSummary {
    pub fn phase_names(intro: IntroPhase, focus: FocusPhase) -> (String, String) {
        (format!("{:?}", intro), format!("{:?}", focus))
    }
}

/// Store for the focus summary.
#[derive(Debug, Default)]
pub struct FocusStore {
    summary: RwLock<FocusSummary>,
    version: RwLock<u64>,
}

impl FocusStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_summary(&self) -> FocusSummary {
        self.summary.read().clone()
    }

    pub fn get_version(&self) -> u64 {
        *self.version.read()
    }

    /// Replaces the summary; the version only moves when something changed.
    pub fn update(&self, summary: FocusSummary) {
        let mut current = self.summary.write();
        if *current == summary {
            return;
        }
        *current = summary;
        *self.version.write() += 1;
    }
}

/// All state stores combined for easy sharing.
#[derive(Debug, Clone, Resource)]
pub struct StateStores {
    pub focus: Arc<FocusStore>,
}

impl StateStores {
    pub fn new() -> Self {
        Self {
            focus: Arc::new(FocusStore::new()),
        }
    }
}

impl Default for StateStores {
    fn default() -> Self {
        Self::new()
    }
}
