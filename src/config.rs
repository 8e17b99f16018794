use std::{
    env,
    str::FromStr,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU32, Ordering},
    },
};

use crate::error::ConfigError;

pub const MIN_SENSITIVITY: f32 = 1.0;
pub const MAX_SENSITIVITY: f32 = 5.0;

const ENV_PREFIX: &str = "HAND_POINTER_";

/// Tunable thresholds of the gesture engine.
///
/// The defaults are empirical values for a laptop webcam at arm's length. They are not
/// resolution independent, so hosts with a different field of view should tune them.
#[derive(Clone, Debug)]
pub struct TrackingConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Initial amplification of hand motion around the frame centre, `[1, 5]`.
    pub sensitivity: f32,
    /// EMA blend factor applied per frame to the clamped cursor target.
    pub smoothing: f32,
    /// Max thumb/index tip distance (normalized units) that counts as a pinch.
    pub pinch_threshold: f32,
    /// Cursor-to-centre distance (px) under which a target captures the cursor.
    pub snap_in_px: f32,
    /// Distance (px) the cursor must exceed to escape a captured target.
    pub snap_out_px: f32,
    /// Send one of every `outbound_stride` display frames to the network sink.
    pub outbound_stride: u32,
    /// Flip x for selfie-style cameras.
    pub mirror_x: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            screen_width: 1920.0,
            screen_height: 1080.0,
            sensitivity: 1.0,
            smoothing: 0.2,
            pinch_threshold: 0.05,
            snap_in_px: 50.0,
            snap_out_px: 80.0,
            outbound_stride: 5,
            mirror_x: false,
        }
    }
}

impl TrackingConfig {
    /// Defaults overridden by `HAND_POINTER_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        override_from_env("SCREEN_WIDTH", &mut config.screen_width)?;
        override_from_env("SCREEN_HEIGHT", &mut config.screen_height)?;
        override_from_env("SENSITIVITY", &mut config.sensitivity)?;
        override_from_env("SMOOTHING", &mut config.smoothing)?;
        override_from_env("PINCH_THRESHOLD", &mut config.pinch_threshold)?;
        override_from_env("SNAP_IN_PX", &mut config.snap_in_px)?;
        override_from_env("SNAP_OUT_PX", &mut config.snap_out_px)?;
        override_from_env("OUTBOUND_STRIDE", &mut config.outbound_stride)?;
        override_from_env("MIRROR_X", &mut config.mirror_x)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("screen_width", self.screen_width, 1.0, f32::MAX)?;
        check_range("screen_height", self.screen_height, 1.0, f32::MAX)?;
        check_range(
            "sensitivity",
            self.sensitivity,
            MIN_SENSITIVITY,
            MAX_SENSITIVITY,
        )?;
        check_range("smoothing", self.smoothing, f32::EPSILON, 1.0)?;
        check_range("pinch_threshold", self.pinch_threshold, 0.0, 1.0)?;
        check_range("snap_in_px", self.snap_in_px, 0.0, f32::MAX)?;
        if self.snap_out_px <= self.snap_in_px {
            return Err(ConfigError::SnapHysteresis {
                snap_in: self.snap_in_px,
                snap_out: self.snap_out_px,
            });
        }
        if self.outbound_stride == 0 {
            return Err(ConfigError::ZeroStride);
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn override_from_env<T: FromStr>(name: &str, slot: &mut T) -> Result<(), ConfigError> {
    let key = format!("{ENV_PREFIX}{name}");
    let Ok(value) = env::var(&key) else {
        return Ok(());
    };
    match value.trim().parse() {
        Ok(parsed) => {
            *slot = parsed;
            Ok(())
        }
        Err(_) => Err(ConfigError::Env { key, value }),
    }
}

/// Clamps a requested sensitivity into the supported range.
pub fn clamp_sensitivity(value: f32) -> f32 {
    if value.is_nan() {
        return MIN_SENSITIVITY;
    }
    value.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY)
}

/// Runtime switch and sensitivity, shared between the UI thread and the frame loop.
#[derive(Clone, Debug)]
pub struct TrackingControls {
    enabled: Arc<AtomicBool>,
    sensitivity_bits: Arc<AtomicU32>,
}

impl TrackingControls {
    pub fn new(sensitivity: f32) -> Self {
        Self {
            enabled: Arc::new(AtomicBool::new(false)),
            sensitivity_bits: Arc::new(AtomicU32::new(clamp_sensitivity(sensitivity).to_bits())),
        }
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_sensitivity(&self, value: f32) {
        let clamped = clamp_sensitivity(value);
        if clamped != value {
            log::warn!("sensitivity {value} outside supported range, using {clamped}");
        }
        self.sensitivity_bits
            .store(clamped.to_bits(), Ordering::Relaxed);
    }

    pub fn sensitivity(&self) -> f32 {
        f32::from_bits(self.sensitivity_bits.load(Ordering::Relaxed))
    }
}

impl Default for TrackingControls {
    fn default() -> Self {
        Self::new(TrackingConfig::default().sensitivity)
    }
}
