use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Geometry tunables, in menu units. Fixed for the lifetime of a navigator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Distance from the centre at which a root item is entered.
    pub initial_radius: f64,
    /// How fast a child boundary diverges from a frame's axis.
    pub sector_edge_slope: f64,
    pub branch_near_edge_offset: f64,
    pub branch_far_edge_offset: f64,
    /// Forward travel into a branch before its child boundaries arm.
    pub branch_far_edge_dead_zone: f64,
    pub branch_label_length_offset: f64,
    pub branch_label_height_offset: f64,
    pub leaf_base_offset: f64,
    pub leaf_height: f64,
    /// Start root frames with both edges armed.
    pub root_edges_armed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_radius: 200.0,
            sector_edge_slope: 0.3,
            branch_near_edge_offset: 100.0,
            branch_far_edge_offset: 100.0,
            branch_far_edge_dead_zone: 150.0,
            branch_label_length_offset: 300.0,
            branch_label_height_offset: 50.0,
            leaf_base_offset: 150.0,
            leaf_height: 400.0,
            root_edges_armed: false,
        }
    }
}

/// How the input collaborator maps screen pixels onto menu units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Screen pixels per menu unit.
    pub display_scale: f64,
    /// Minimum distance in pixels between the gesture centre and the window edge.
    pub min_window_margin: f64,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            display_scale: 0.2,
            min_window_margin: 200.0,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} must lie strictly between -1 and 1, got {value}")]
    SlopeOutOfRange { name: &'static str, value: f64 },
}

fn finite(name: &'static str, value: f64) -> Result<f64, SettingsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SettingsError::NonFinite { name, value })
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if finite(name, value)? > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if finite(name, value)? >= 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Negative { name, value })
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("initial_radius", self.initial_radius)?;
        if finite("sector_edge_slope", self.sector_edge_slope)?.abs() >= 1.0 {
            return Err(SettingsError::SlopeOutOfRange {
                name: "sector_edge_slope",
                value: self.sector_edge_slope,
            });
        }
        positive("branch_near_edge_offset", self.branch_near_edge_offset)?;
        positive("branch_far_edge_offset", self.branch_far_edge_offset)?;
        non_negative("branch_far_edge_dead_zone", self.branch_far_edge_dead_zone)?;
        finite("branch_label_length_offset", self.branch_label_length_offset)?;
        finite("branch_label_height_offset", self.branch_label_height_offset)?;
        positive("leaf_base_offset", self.leaf_base_offset)?;
        positive("leaf_height", self.leaf_height)?;
        Ok(())
    }
}

impl InputSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("display_scale", self.display_scale)?;
        non_negative("min_window_margin", self.min_window_margin)
    }
}
