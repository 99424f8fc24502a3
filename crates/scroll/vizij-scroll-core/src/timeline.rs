//! Timeline table and dispatcher.
//!
//! A timeline is an ordered list of `[start, end)` scroll ranges, each paired
//! with an effect that writes into [`SceneState`]. Dispatch walks the table in
//! order and applies every entry whose range contains the current percentage,
//! so on overlap the later entry's writes win.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::TimelineError;
use crate::interp::{lerp, scale_percent};
use crate::scene::SceneState;

/// Scalar scene property an op can write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "position.x")]
    PositionX,
    #[serde(rename = "position.y")]
    PositionY,
    #[serde(rename = "position.z")]
    PositionZ,
    #[serde(rename = "rotation.x")]
    RotationX,
    #[serde(rename = "rotation.y")]
    RotationY,
    #[serde(rename = "rotation.z")]
    RotationZ,
    /// Grey level written to all three emissive components.
    #[serde(rename = "emissive")]
    Emissive,
    #[serde(rename = "spotlight")]
    Spotlight,
}

impl Channel {
    pub fn write(self, scene: &mut SceneState, value: f32) {
        match self {
            Channel::PositionX => scene.position[0] = value,
            Channel::PositionY => scene.position[1] = value,
            Channel::PositionZ => scene.position[2] = value,
            Channel::RotationX => scene.rotation[0] = value,
            Channel::RotationY => scene.rotation[1] = value,
            Channel::RotationZ => scene.rotation[2] = value,
            Channel::Emissive => scene.set_emissive_grey(value),
            Channel::Spotlight => scene.spotlight_intensity = value,
        }
    }
}

/// Boolean scene property an op can toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Orbit controls enabled.
    Controls,
}

impl Flag {
    pub fn write(self, scene: &mut SceneState, value: bool) {
        match self {
            Flag::Controls => scene.controls.enabled = value,
        }
    }
}

/// One declarative write performed by an effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EffectOp {
    Set { channel: Channel, value: f32 },
    /// Interpolate `from -> to` over the owning entry's range.
    Lerp { channel: Channel, from: f32, to: f32 },
    Flag { flag: Flag, value: bool },
}

impl EffectOp {
    pub fn apply(&self, scene: &mut SceneState, segment: &Segment) {
        match *self {
            EffectOp::Set { channel, value } => channel.write(scene, value),
            EffectOp::Lerp { channel, from, to } => {
                channel.write(scene, lerp(from, to, segment.progress()))
            }
            EffectOp::Flag { flag, value } => flag.write(scene, value),
        }
    }
}

/// The entry range being applied together with the current scroll percentage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: f32,
    pub end: f32,
    pub percent: f32,
}

impl Segment {
    /// Local progress through the segment (0 at `start`, 1 at `end`).
    #[inline]
    pub fn progress(&self) -> f32 {
        scale_percent(self.percent, self.start, self.end)
    }
}

pub type EffectFn = Arc<dyn Fn(&mut SceneState, &Segment) + Send + Sync>;

/// What an entry does while its range is active.
#[derive(Clone)]
pub enum Effect {
    /// Declarative op list. An empty list holds the scene as the previous
    /// segment left it.
    Ops(Vec<EffectOp>),
    Func(EffectFn),
}

impl Effect {
    pub fn hold() -> Self {
        Effect::Ops(Vec::new())
    }

    pub fn func<F>(f: F) -> Self
    where
        F: Fn(&mut SceneState, &Segment) + Send + Sync + 'static,
    {
        Effect::Func(Arc::new(f))
    }

    pub fn is_hold(&self) -> bool {
        matches!(self, Effect::Ops(ops) if ops.is_empty())
    }

    pub fn apply(&self, scene: &mut SceneState, segment: &Segment) {
        match self {
            Effect::Ops(ops) => {
                for op in ops {
                    op.apply(scene, segment);
                }
            }
            Effect::Func(f) => f(scene, segment),
        }
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Ops(ops) => f.debug_tuple("Ops").field(ops).finish(),
            Effect::Func(_) => f.write_str("Func(..)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TimelineEntry {
    pub start: f32,
    pub end: f32,
    pub label: Option<String>,
    pub effect: Effect,
}

impl TimelineEntry {
    pub fn new(start: f32, end: f32, effect: Effect) -> Self {
        Self {
            start,
            end,
            label: None,
            effect,
        }
    }

    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Half-open containment test. NaN is never contained.
    #[inline]
    pub fn contains(&self, percent: f32) -> bool {
        self.start <= percent && percent < self.end
    }

    fn validate(&self) -> Result<(), TimelineError> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(TimelineError::NonFiniteBounds {
                start: self.start,
                end: self.end,
            });
        }
        if self.start >= self.end {
            return Err(TimelineError::EmptyRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

/// Indices of the entries applied by one dispatch, in table order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub fired: Vec<usize>,
}

impl Dispatch {
    pub fn is_empty(&self) -> bool {
        self.fired.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Overlapping ranges are allowed; empty or non-finite
    /// ranges are rejected.
    pub fn push(&mut self, entry: TimelineEntry) -> Result<(), TimelineError> {
        entry.validate()?;
        self.entries.push(entry);
        Ok(())
    }

    pub fn with_entry(mut self, entry: TimelineEntry) -> Result<Self, TimelineError> {
        self.push(entry)?;
        Ok(self)
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose range contains `percent`, in table order.
    pub fn matching(&self, percent: f32) -> impl Iterator<Item = (usize, &TimelineEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.contains(percent))
    }

    /// Apply every matching entry to `scene`.
    pub fn dispatch(&self, percent: f32, scene: &mut SceneState) -> Dispatch {
        let mut out = Dispatch::default();
        for (idx, entry) in self.matching(percent) {
            let segment = Segment {
                start: entry.start,
                end: entry.end,
                percent,
            };
            entry.effect.apply(scene, &segment);
            out.fired.push(idx);
        }
        out
    }

    /// Build from the serializable form, validating every entry.
    pub fn from_spec(spec: &TimelineSpec) -> Result<Self, TimelineError> {
        let mut timeline = Timeline::new();
        for e in &spec.entries {
            timeline.push(TimelineEntry {
                start: e.start,
                end: e.end,
                label: e.label.clone(),
                effect: Effect::Ops(e.ops.clone()),
            })?;
        }
        Ok(timeline)
    }

    /// Serializable form. `None` when any entry uses a Rust function effect.
    pub fn to_spec(&self, name: &str) -> Option<TimelineSpec> {
        let mut entries = Vec::with_capacity(self.entries.len());
        for e in &self.entries {
            let ops = match &e.effect {
                Effect::Ops(ops) => ops.clone(),
                Effect::Func(_) => return None,
            };
            entries.push(EntrySpec {
                start: e.start,
                end: e.end,
                label: e.label.clone(),
                ops,
            });
        }
        Some(TimelineSpec {
            name: name.to_string(),
            entries,
        })
    }
}

/// JSON representation of a declarative timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineSpec {
    #[serde(default)]
    pub name: String,
    pub entries: Vec<EntrySpec>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntrySpec {
    pub start: f32,
    pub end: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub ops: Vec<EffectOp>,
}
