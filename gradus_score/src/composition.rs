// The composition aggregate.
//
// A composition owns its voices plus the timing context rules need: a
// default key signature and meter, and sparse per-bar overrides for each.
// The effective key or meter at a bar is the most recent override at or
// before that bar, falling back to the default. Overrides live in
// BTreeMaps so the at-or-before lookup is a range query.
//
// Duration arithmetic lives here rather than on Position because walking
// past a barline needs the effective meter of every bar crossed.

use std::path::Path;

use gradus_theory::key::KeySignature;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::rhythm::{Meter, Position, RhythmicValue};
use crate::voice::{Placement, Voice, VoiceId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Composition {
    title: String,
    key_signature: KeySignature,
    meter: Meter,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    key_changes: BTreeMap<u32, KeySignature>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    meter_changes: BTreeMap<u32, Meter>,
    voices: Vec<Voice>,
}

impl Composition {
    pub fn new(title: impl Into<String>, key_signature: KeySignature, meter: Meter) -> Self {
        Composition {
            title: title.into(),
            key_signature,
            meter,
            key_changes: BTreeMap::new(),
            meter_changes: BTreeMap::new(),
            voices: Vec::new(),
        }
    }

    /// Load a composition from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let composition: Composition = serde_json::from_str(&data)?;
        Ok(composition)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn key_signature(&self) -> KeySignature {
        self.key_signature
    }

    pub fn meter(&self) -> Meter {
        self.meter
    }

    /// Change the key signature from the given bar onward.
    pub fn change_key(&mut self, bar: u32, key: KeySignature) {
        self.key_changes.insert(bar, key);
    }

    /// Change the meter from the given bar onward.
    pub fn change_meter(&mut self, bar: u32, meter: Meter) {
        self.meter_changes.insert(bar, meter);
    }

    /// The key signature in effect at a bar: the most recent change at or
    /// before it, or the default.
    pub fn key_signature_at(&self, bar: u32) -> KeySignature {
        self.key_changes
            .range(..=bar)
            .next_back()
            .map(|(_, key)| *key)
            .unwrap_or(self.key_signature)
    }

    /// The meter in effect at a bar.
    pub fn meter_at(&self, bar: u32) -> Meter {
        self.meter_changes
            .range(..=bar)
            .next_back()
            .map(|(_, meter)| *meter)
            .unwrap_or(self.meter)
    }

    pub fn add_voice(&mut self, voice: Voice) -> VoiceId {
        self.voices.push(voice);
        VoiceId(self.voices.len() - 1)
    }

    pub fn voice(&self, id: VoiceId) -> Option<&Voice> {
        self.voices.get(id.0)
    }

    pub fn voice_mut(&mut self, id: VoiceId) -> Option<&mut Voice> {
        self.voices.get_mut(id.0)
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// The position reached by starting at `position` and lasting for
    /// `value`, crossing barlines under whatever meter each bar carries.
    pub fn position_after(&self, position: Position, value: RhythmicValue) -> Position {
        let mut bar = position.bar;
        let mut offset = position.ticks_into_bar(self.meter_at(bar)) + value.ticks();
        loop {
            let meter = self.meter_at(bar);
            let bar_ticks = meter.ticks_per_bar();
            if offset < bar_ticks {
                return Position::from_bar_offset(bar, offset, meter);
            }
            offset -= bar_ticks;
            bar += 1;
        }
    }

    /// Where a placement stops sounding.
    pub fn placement_end(&self, placement: &Placement) -> Position {
        self.position_after(placement.position, placement.duration)
    }
}
