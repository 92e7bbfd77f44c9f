//! Workshop configuration parameters
//!
//! All tunable parameters for the classroom activities. Every section and
//! field is `#[serde(default)]`, so a JSON file only needs to mention the
//! values a workshop leader wants to change. Times are integer milliseconds.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::ports::{CaptureSettings, ConfigError};
use crate::display::Rotation;

/// Core workshop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkshopConfig {
    pub display: DisplayConfig,
    pub hello: HelloConfig,
    pub environment: EnvironmentConfig,
    pub spirit_level: SpiritLevelConfig,
    pub camera: CameraConfig,
    pub alarm: AlarmConfig,
    pub joystick: JoystickConfig,
    pub dice: DiceConfig,
    pub reaction: ReactionConfig,
    pub boot_ip: BootIpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rotation in degrees (0, 90, 180, 270) for a HAT mounted in a case.
    pub rotation_deg: u16,
    /// Delay between scroll frames for countdown digits and banners.
    pub scroll_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rotation_deg: 0,
            scroll_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelloConfig {
    pub message: String,
    pub colour: (u8, u8, u8),
    pub background: (u8, u8, u8),
    pub scroll_ms: u64,
}

impl Default for HelloConfig {
    fn default() -> Self {
        Self {
            message: "Hello Pi Workshop!".into(),
            colour: (0, 255, 0),
            background: (0, 0, 0),
            scroll_ms: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub interval_ms: u64,
    /// Strictly above this is "hot".
    pub hot_above_c: f32,
    /// Strictly below this is "cold".
    pub cold_below_c: f32,
    /// Subtracted from every reading; the HAT sits above the warm CPU.
    pub temperature_offset_c: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            hot_above_c: 25.0,
            cold_below_c: 20.0,
            temperature_offset_c: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiritLevelConfig {
    pub interval_ms: u64,
    pub threshold_deg: f32,
}

impl Default for SpiritLevelConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            threshold_deg: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelapseConfig {
    pub enabled: bool,
    pub photos: u32,
    pub interval_ms: u64,
    pub countdown_pause_ms: u64,
}

impl Default for TimelapseConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            photos: 6,
            interval_ms: 10_000,
            countdown_pause_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Defaults to `~/Workshop_Photos`.
    pub photos_dir: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub hflip: bool,
    pub vflip: bool,
    /// Auto-exposure settle time after the camera starts.
    pub warmup_ms: u64,
    pub countdown_pause_ms: u64,
    /// Still-capture program used by the Linux adapter.
    pub capture_command: String,
    pub timelapse: TimelapseConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            photos_dir: None,
            width: 1920,
            height: 1080,
            hflip: false,
            vflip: true,
            warmup_ms: 3000,
            countdown_pause_ms: 500,
            capture_command: "rpicam-still".into(),
            timelapse: TimelapseConfig::default(),
        }
    }
}

impl CameraConfig {
    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            width: self.width,
            height: self.height,
            hflip: self.hflip,
            vflip: self.vflip,
        }
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.photos_dir
            .clone()
            .unwrap_or_else(|| home_dir().join("Workshop_Photos"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlarmConfig {
    /// Defaults to `~/Intruder_Alarm_Photos`.
    pub photos_dir: Option<PathBuf>,
    /// Temperature rise (°C) that trips the alarm. Strict comparison.
    pub temp_threshold_c: f32,
    /// Deviation from 1 g that trips the alarm. Strict comparison.
    pub movement_threshold_g: f32,
    pub cooldown_ms: u64,
    pub poll_ms: u64,
    pub settle_ms: u64,
    pub arm_countdown: u32,
    pub flash_count: u32,
    pub flash_ms: u64,
    /// Exposure settle time before the evidence photo.
    pub exposure_ms: u64,
    /// Print live deltas every poll.
    pub debug: bool,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            photos_dir: None,
            temp_threshold_c: 1.5,
            movement_threshold_g: 0.3,
            cooldown_ms: 30_000,
            poll_ms: 500,
            settle_ms: 2000,
            arm_countdown: 5,
            flash_count: 6,
            flash_ms: 300,
            exposure_ms: 2000,
            debug: true,
        }
    }
}

impl AlarmConfig {
    pub fn photos_dir(&self) -> PathBuf {
        self.photos_dir
            .clone()
            .unwrap_or_else(|| home_dir().join("Intruder_Alarm_Photos"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoystickConfig {
    /// How long the direction colour stays lit after a press.
    pub flash_ms: u64,
    pub poll_ms: u64,
}

impl Default for JoystickConfig {
    fn default() -> Self {
        Self {
            flash_ms: 300,
            poll_ms: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Acceleration magnitude (g) strictly above which a shake is detected.
    pub shake_threshold_g: f32,
    pub poll_ms: u64,
    pub animation_frames: u32,
    pub animation_ms: u64,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            shake_threshold_g: 1.5,
            poll_ms: 100,
            animation_frames: 10,
            animation_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionConfig {
    pub rounds: u32,
    pub min_wait_ms: u64,
    pub max_wait_ms: u64,
    pub poll_ms: u64,
    pub result_ms: u64,
    pub gap_ms: u64,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            min_wait_ms: 1000,
            max_wait_ms: 4000,
            poll_ms: 50,
            result_ms: 1000,
            gap_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootIpConfig {
    pub rotation_deg: u16,
    /// Grace period for the network to come up after boot.
    pub boot_delay_ms: u64,
    pub max_attempts: u32,
    pub retry_ms: u64,
    /// How many times the address is scrolled once found.
    pub repeats: u32,
    pub repeat_pause_ms: u64,
}

impl Default for BootIpConfig {
    fn default() -> Self {
        Self {
            rotation_deg: 180,
            boot_delay_ms: 15_000,
            max_attempts: 10,
            retry_ms: 5000,
            repeats: 10,
            repeat_pause_ms: 1000,
        }
    }
}

impl WorkshopConfig {
    /// Reject values that would make an activity misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        use ConfigError::ValidationFailed as Invalid;

        if Rotation::from_degrees(self.display.rotation_deg).is_none()
            || Rotation::from_degrees(self.boot_ip.rotation_deg).is_none()
        {
            return Err(Invalid("rotation must be 0, 90, 180 or 270"));
        }
        if self.display.scroll_ms == 0 || self.hello.scroll_ms == 0 {
            return Err(Invalid("scroll_ms must be positive"));
        }
        let env = &self.environment;
        if env.cold_below_c >= env.hot_above_c {
            return Err(Invalid("environment.cold_below_c must be below hot_above_c"));
        }
        if env.interval_ms == 0 || self.spirit_level.interval_ms == 0 {
            return Err(Invalid("poll interval must be positive"));
        }
        if !(self.spirit_level.threshold_deg > 0.0 && self.spirit_level.threshold_deg < 180.0) {
            return Err(Invalid("spirit_level.threshold_deg must be in (0, 180)"));
        }
        let cam = &self.camera;
        if cam.width == 0 || cam.height == 0 {
            return Err(Invalid("camera resolution must be non-zero"));
        }
        if cam.capture_command.trim().is_empty() {
            return Err(Invalid("camera.capture_command must not be empty"));
        }
        if cam.timelapse.enabled && cam.timelapse.photos == 0 {
            return Err(Invalid("camera.timelapse.photos must be at least 1"));
        }
        let alarm = &self.alarm;
        if alarm.temp_threshold_c <= 0.0 || alarm.movement_threshold_g <= 0.0 {
            return Err(Invalid("alarm thresholds must be positive"));
        }
        if alarm.poll_ms == 0 {
            return Err(Invalid("alarm.poll_ms must be positive"));
        }
        if self.joystick.poll_ms == 0 || self.dice.poll_ms == 0 || self.reaction.poll_ms == 0 {
            return Err(Invalid("poll interval must be positive"));
        }
        if self.dice.shake_threshold_g <= 1.0 {
            return Err(Invalid("dice.shake_threshold_g must exceed 1 g"));
        }
        let r = &self.reaction;
        if r.rounds == 0 {
            return Err(Invalid("reaction.rounds must be at least 1"));
        }
        if r.min_wait_ms > r.max_wait_ms {
            return Err(Invalid("reaction.min_wait_ms must not exceed max_wait_ms"));
        }
        if self.boot_ip.max_attempts == 0 {
            return Err(Invalid("boot_ip.max_attempts must be at least 1"));
        }
        Ok(())
    }

    pub fn rotation(&self) -> Rotation {
        Rotation::from_degrees(self.display.rotation_deg).unwrap_or_default()
    }
}

/// `~/.config/pi-workshop/config.json`.
pub fn default_path() -> PathBuf {
    home_dir().join(".config").join("pi-workshop").join("config.json")
}

/// `$HOME`, or the current directory when it is unset.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(".").to_path_buf())
}
