use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ServiceError, ValidationErrors};
use super::cosmetics;

/// A signed note on the card, as stored and as sent over the wire.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub text: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub videos: Vec<String>,
    pub color: String,
    pub rotation: f64,
    pub timestamp: DateTime<Utc>,
}

/// Fields a visitor submits; the store assigns everything else.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageDraft {
    pub name: String,
    pub text: String,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub color: Option<String>,
    pub rotation: Option<f64>,
}

/// Partial replacement of the mutable fields. `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessagePatch {
    pub name: Option<String>,
    pub text: Option<String>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub color: Option<String>,
    pub rotation: Option<f64>,
}

fn null_as_empty<'de, D>(de: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(de)?.unwrap_or_default())
}

fn check_required(errs: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errs.push(field, "must not be empty");
    }
}

fn check_rotation(errs: &mut ValidationErrors, rotation: Option<f64>) {
    if matches!(rotation, Some(r) if !r.is_finite()) {
        errs.push("rotation", "must be a finite number");
    }
}

impl MessageDraft {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into(), ..Default::default() }
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_videos(mut self, videos: Vec<String>) -> Self {
        self.videos = Some(videos);
        self
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errs = ValidationErrors::default();
        check_required(&mut errs, "name", &self.name);
        check_required(&mut errs, "text", &self.text);
        check_rotation(&mut errs, self.rotation);
        errs.into_result()
    }

    /// Build the stored record. Missing or blank cosmetic fields are drawn from `rng`.
    pub fn into_message<R: Rng + ?Sized>(self, id: Uuid, timestamp: DateTime<Utc>, rng: &mut R) -> Message {
        let color = match self.color {
            Some(c) if !c.trim().is_empty() => c,
            _ => cosmetics::random_color(rng),
        };
        let rotation = self.rotation.unwrap_or_else(|| cosmetics::random_rotation(rng));
        Message {
            id,
            name: self.name,
            text: self.text,
            images: self.images.unwrap_or_default(),
            videos: self.videos.unwrap_or_default(),
            color,
            rotation,
            timestamp,
        }
    }
}

impl MessagePatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.text.is_none()
            && self.images.is_none()
            && self.videos.is_none()
            && self.color.is_none()
            && self.rotation.is_none()
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut errs = ValidationErrors::default();
        if let Some(name) = &self.name {
            check_required(&mut errs, "name", name);
        }
        if let Some(text) = &self.text {
            check_required(&mut errs, "text", text);
        }
        check_rotation(&mut errs, self.rotation);
        errs.into_result()
    }

    /// Merge onto `msg`. `id` and `timestamp` are not patchable.
    pub fn apply(self, msg: &mut Message) {
        if let Some(v) = self.name { msg.name = v; }
        if let Some(v) = self.text { msg.text = v; }
        if let Some(v) = self.images { msg.images = v; }
        if let Some(v) = self.videos { msg.videos = v; }
        if let Some(v) = self.color { msg.color = v; }
        if let Some(v) = self.rotation { msg.rotation = v; }
    }
}

/// Creation time for a new record: the current time at microsecond precision,
/// bumped past `latest` so timestamps strictly follow insertion order.
pub fn next_timestamp(latest: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now().trunc_subsecs(6);
    match latest {
        Some(last) if now <= last => last.trunc_subsecs(6) + Duration::microseconds(1),
        _ => now,
    }
}

impl From<models::message::Model> for Message {
    fn from(m: models::message::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            text: m.text,
            images: m.images.0,
            videos: m.videos.0,
            color: m.color,
            rotation: m.rotation,
            timestamp: m.timestamp.with_timezone(&Utc),
        }
    }
}

impl From<Message> for models::message::Model {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            name: m.name,
            text: m.text,
            images: m.images.into(),
            videos: m.videos.into(),
            color: m.color,
            rotation: m.rotation,
            timestamp: m.timestamp.into(),
        }
    }
}
