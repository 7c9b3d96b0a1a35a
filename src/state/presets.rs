//! Fixed catalog of rest durations

use std::num::NonZeroU32;

use serde::Serialize;

use super::timer_state::format_clock;

/// Durations offered when no catalog is configured
pub const DEFAULT_PRESETS: [u32; 6] = [30, 60, 90, 120, 180, 300];

/// One selectable rest duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub seconds: NonZeroU32,
}

impl Preset {
    /// Display label, e.g. `01:30`
    pub fn label(&self) -> String {
        format_clock(self.seconds.get())
    }
}

/// Ordered, immutable list of presets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    /// Build a catalog, keeping order and dropping zero durations
    pub fn new(seconds: impl IntoIterator<Item = u32>) -> Self {
        let presets = seconds
            .into_iter()
            .filter_map(NonZeroU32::new)
            .map(|seconds| Preset { seconds })
            .collect();
        Self { presets }
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_PRESETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_ordered() {
        let catalog = PresetCatalog::default();
        let seconds: Vec<u32> = catalog.presets().iter().map(|p| p.seconds.get()).collect();
        assert_eq!(seconds, vec![30, 60, 90, 120, 180, 300]);
    }

    #[test]
    fn labels_use_clock_format() {
        let catalog = PresetCatalog::default();
        let labels: Vec<String> = catalog.presets().iter().map(Preset::label).collect();
        assert_eq!(labels, vec!["00:30", "01:00", "01:30", "02:00", "03:00", "05:00"]);
    }

    #[test]
    fn zero_durations_are_dropped() {
        let catalog = PresetCatalog::new([0, 45, 0]);
        assert_eq!(catalog.presets().len(), 1);
        assert_eq!(catalog.presets()[0].seconds.get(), 45);
        assert!(PresetCatalog::new([0]).is_empty());
    }
}
