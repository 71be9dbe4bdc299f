use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Reserved button link meaning "show the events grid" instead of
/// embedding an external page.
pub const EVENTS_LINK: &str = "#events";

const DEFAULT_SPIN_DURATION_MS: u64 = 2000;
const DEFAULT_NUMBER_MIN: u32 = 1;
const DEFAULT_NUMBER_MAX: u32 = 100;

/// Wire format of the content endpoint response.
///
/// All three sections are optional; a sparse document still produces a
/// usable kiosk with default text and an empty events grid.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentDocument {
    #[serde(default)]
    pub settings: HashMap<String, String>,
    #[serde(default)]
    pub buttons: Vec<RawButton>,
    #[serde(default)]
    pub events: Vec<EventConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawButton {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
}

/// An actionable choice on the number screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonConfig {
    pub name: String,
    pub link: String,
}

/// Where a button press leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonTarget {
    /// The reserved sentinel link: show the events grid.
    Events,
    /// Any other link: embed the external page.
    Link(String),
}

impl ButtonConfig {
    pub fn target(&self) -> ButtonTarget {
        if self.link == EVENTS_LINK {
            ButtonTarget::Events
        } else {
            ButtonTarget::Link(self.link.clone())
        }
    }
}

/// A promotable event shown on the browsing screen.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: String,
}

/// Display and timing settings, parsed from the string-keyed `settings`
/// section of the remote document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSettings {
    pub start_title: String,
    pub start_reminder: String,
    pub reveal_title: String,
    pub instructions: String,
    pub background_image: String,
    pub spin_duration_ms: u64,
    pub number_min: u32,
    pub number_max: u32,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            start_title: "Tap for Wisdom".to_string(),
            start_reminder: "Your next reminder might be just one tap away.".to_string(),
            reveal_title: "Your number is...".to_string(),
            instructions: "Pick up **Kindling Hope** and flip to that page.\n\
                           Let the wisdom speak to you."
                .to_string(),
            background_image: String::new(),
            spin_duration_ms: DEFAULT_SPIN_DURATION_MS,
            number_min: DEFAULT_NUMBER_MIN,
            number_max: DEFAULT_NUMBER_MAX,
        }
    }
}

/// Everything the content endpoint provides, in parsed form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteContent {
    pub settings: ContentSettings,
    pub buttons: Vec<ButtonConfig>,
    pub events: Vec<EventConfig>,
}

impl RemoteContent {
    /// Converts the wire document into validated content.
    ///
    /// - Numeric settings that fail to parse fall back to their defaults.
    /// - A range with `max < min` is replaced by the default 1–100 range.
    /// - Buttons with empty names are dropped.
    pub fn from_document(doc: ContentDocument) -> Self {
        let mut settings = ContentSettings::default();

        take_string(&doc.settings, "StartTitle", &mut settings.start_title);
        take_string(&doc.settings, "StartReminder", &mut settings.start_reminder);
        take_string(&doc.settings, "RevealTitle", &mut settings.reveal_title);
        take_string(&doc.settings, "Instructions", &mut settings.instructions);
        take_string(&doc.settings, "BackgroundImage", &mut settings.background_image);

        settings.spin_duration_ms =
            parse_or(&doc.settings, "SpinDuration", DEFAULT_SPIN_DURATION_MS);
        settings.number_min = parse_or(&doc.settings, "NumberMin", DEFAULT_NUMBER_MIN);
        settings.number_max = parse_or(&doc.settings, "NumberMax", DEFAULT_NUMBER_MAX);

        if settings.number_max < settings.number_min {
            tracing::warn!(
                min = settings.number_min,
                max = settings.number_max,
                "Content range is inverted, using default 1-100"
            );
            settings.number_min = DEFAULT_NUMBER_MIN;
            settings.number_max = DEFAULT_NUMBER_MAX;
        }

        let buttons = doc
            .buttons
            .into_iter()
            .filter_map(|raw| {
                if raw.name.trim().is_empty() {
                    tracing::warn!("Dropping button with empty name");
                    return None;
                }
                Some(ButtonConfig {
                    name: raw.name,
                    link: raw.link,
                })
            })
            .collect();

        Self {
            settings,
            buttons,
            events: doc.events,
        }
    }
}

fn take_string(map: &HashMap<String, String>, key: &str, slot: &mut String) {
    if let Some(value) = map.get(key) {
        if !value.is_empty() {
            *slot = value.clone();
        }
    }
}

fn parse_or<T: FromStr + Copy>(map: &HashMap<String, String>, key: &str, default: T) -> T {
    let Some(raw) = map.get(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, raw = raw.as_str(), "Unparsable content setting, using default");
            default
        }
    }
}
