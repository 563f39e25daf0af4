//! Session configuration

use crate::{
    types::{PaneId, PANE_COUNT},
    Error, Result,
};
use serde::{Deserialize, Serialize};
use url::Url;

/// Default stream manifests, one per pane
pub const DEFAULT_SOURCES: [&str; PANE_COUNT] = [
    "https://dash.akamaized.net/digitalprimates/fraunhofer/480p_video/heaac_2_0_with_video/Sintel/sintel_480p_heaac2_0.mpd",
    "https://dash.akamaized.net/dash264/TestCases/2c/qualcomm/1/MultiResMPEG2.mpd",
    "https://bitmovin-a.akamaihd.net/content/MI201109210084_1/mpds/f08e80da-bf1d-4e3d-8899-f0f6155f6efa.mpd",
];

/// Message shown over a pane whose player failed
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Error loading video, \nplease check your internet connection!";

/// Configuration for one three-pane session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Manifest URI for each pane, left to right
    pub sources: [String; PANE_COUNT],
    /// Starting weight of each pane
    pub initial_weights: [f32; PANE_COUNT],
    /// Lower bound for any single weight
    pub min_weight: f32,
    /// Upper bound for any single weight
    pub max_weight: f32,
    /// Start playback as soon as a player is prepared
    pub auto_play: bool,
    /// Restart each stream when it ends
    pub looping: bool,
    /// Horizontal inset (px) on both sides of the middle pane
    pub pane_gap: u32,
    /// Horizontal travel (px) before a press turns into a drag
    pub drag_slop: f32,
    /// Spring stiffness for weight animation
    pub spring_stiffness: f32,
    /// Distance below which an animated weight snaps to its target
    pub visibility_threshold: f32,
    /// Text shown over a failed pane
    pub error_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sources: DEFAULT_SOURCES.map(String::from),
            initial_weights: [0.7, 0.2, 0.1],
            min_weight: 0.1,
            max_weight: 0.8,
            auto_play: true,
            looping: true,
            pane_gap: 6,
            drag_slop: 8.0,
            spring_stiffness: 1500.0,
            visibility_threshold: 0.01,
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}

impl SessionConfig {
    /// Replace the three stream sources
    pub fn with_sources(mut self, sources: [String; PANE_COUNT]) -> Self {
        self.sources = sources;
        self
    }

    /// Check bounds, initial weights and sources
    pub fn validate(&self) -> Result<()> {
        if !(self.min_weight.is_finite() && self.max_weight.is_finite()) {
            return Err(Error::InvalidConfig("weight bounds must be finite".into()));
        }
        if self.min_weight <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_weight must be positive, got {}",
                self.min_weight
            )));
        }
        if self.min_weight > self.max_weight {
            return Err(Error::InvalidConfig(format!(
                "min_weight {} exceeds max_weight {}",
                self.min_weight, self.max_weight
            )));
        }
        for (pane, weight) in PaneId::ALL.iter().zip(self.initial_weights) {
            if !(self.min_weight..=self.max_weight).contains(&weight) {
                return Err(Error::InvalidConfig(format!(
                    "initial weight {} of pane {} is outside [{}, {}]",
                    weight, pane, self.min_weight, self.max_weight
                )));
            }
        }
        if !(self.spring_stiffness.is_finite() && self.spring_stiffness > 0.0) {
            return Err(Error::InvalidConfig(
                "spring_stiffness must be positive".into(),
            ));
        }
        if !(self.visibility_threshold.is_finite() && self.visibility_threshold > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "visibility_threshold must be positive, got {}",
                self.visibility_threshold
            )));
        }
        if !(self.drag_slop.is_finite() && self.drag_slop >= 0.0) {
            return Err(Error::InvalidConfig("drag_slop must not be negative".into()));
        }
        self.source_urls()?;
        Ok(())
    }

    /// Parse every source as a URL
    pub fn source_urls(&self) -> Result<[Url; PANE_COUNT]> {
        let [a, b, c] = &self.sources;
        Ok([parse_source(a)?, parse_source(b)?, parse_source(c)?])
    }
}

fn parse_source(uri: &str) -> Result<Url> {
    Url::parse(uri).map_err(|e| Error::InvalidSource {
        uri: uri.to_string(),
        reason: e.to_string(),
    })
}
