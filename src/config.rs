//! Machine description documents.
//!
//! A [`MachineSpec`] lists everything a machine variant can be assembled
//! from: its alphabet, the rotors and reflectors in the box, the entry wheel,
//! and the slot, pawl and cable counts. Wiring strings are written in
//! alphabet symbols. Specs load from and save to JSON.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::alphabet::{Alphabet, LATIN};
use crate::entry_wheel::{EntryWheel, EntrySequence};
use crate::error::{EnigmaError, Result};
use crate::reflector::Reflector;
use crate::rotor::RotorModel;

/// Rotor in the box of a machine variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotorSpec {
    pub name: String,
    /// Contact `i` is wired to the `i`-th symbol of this string.
    pub wiring: String,
    /// Window symbols at which the rotor carries its neighbour. Empty for
    /// rotors without a notch.
    #[serde(default)]
    pub turnover: String,
}

/// Reflector available to a machine variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectorSpec {
    pub name: String,
    pub wiring: String,
    #[serde(default)]
    pub rotatable: bool,
    #[serde(default)]
    pub rewirable: bool,
}

/// Entry wheel wiring: a preset or an explicit key-to-contact table.
///
/// Serialized as `"identity"`, `"keyboard"` or
/// `{"custom": {"keys": "...", "contacts": "..."}}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryWheelSpec {
    #[default]
    Identity,
    Keyboard,
    Custom { keys: String, contacts: String },
}

impl EntryWheelSpec {
    /// Builds the entry wheel over `alphabet`.
    ///
    /// # Errors
    /// Fails like [`EntryWheel::keyboard`] or [`EntryWheel::custom`].
    pub fn build(&self, alphabet: &Alphabet) -> Result<EntryWheel> {
        match self {
            EntryWheelSpec::Identity => EntryWheel::from_sequence(alphabet, EntrySequence::Identity),
            EntryWheelSpec::Keyboard => EntryWheel::from_sequence(alphabet, EntrySequence::Keyboard),
            EntryWheelSpec::Custom { keys, contacts } => {
                EntryWheel::custom(alphabet, keys, contacts)
            }
        }
    }
}

fn latin() -> String {
    LATIN.to_string()
}

/// Description of a machine variant.
///
/// # Examples
///
/// ```
/// use enigmacrypt::MachineSpec;
///
/// let json = r#"{
///     "name": "toy",
///     "alphabet": "ABCD",
///     "rotors": [{"name": "r", "wiring": "BCDA", "turnover": "D"}],
///     "reflectors": [{"name": "x", "wiring": "BADC"}],
///     "rotor_slots": 1
/// }"#;
/// let spec = MachineSpec::from_json(json).unwrap();
/// assert_eq!(spec.pawl_count(), 1);
/// assert_eq!(spec.plugboard_capacity().unwrap(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSpec {
    pub name: String,
    #[serde(default = "latin")]
    pub alphabet: String,
    pub rotors: Vec<RotorSpec>,
    pub reflectors: Vec<ReflectorSpec>,
    #[serde(default)]
    pub entry_wheel: EntryWheelSpec,
    pub rotor_slots: usize,
    /// Rotors driven by a pawl, counted from the right. Defaults to
    /// `rotor_slots`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pawls: Option<usize>,
    /// Defaults to half the alphabet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_plugboard_connections: Option<usize>,
}

impl MachineSpec {
    /// Parses and validates a JSON machine description.
    ///
    /// # Errors
    /// - [`EnigmaError::InvalidConfig`] if the document is not valid JSON for
    ///   this schema.
    /// - Any error of [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: MachineSpec = serde_json::from_str(json)?;
        spec.validate()?;
        debug!(spec = %spec.name, rotors = spec.rotors.len(), "machine description loaded");
        Ok(spec)
    }

    /// Serializes the description as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that every part in the description can actually be built.
    ///
    /// # Errors
    /// - Alphabet errors ([`EnigmaError::DuplicateSymbol`],
    ///   [`EnigmaError::AlphabetTooSmall`]).
    /// - [`EnigmaError::InvalidRotorWiring`] / [`EnigmaError::InvalidReflectorWiring`]
    ///   for the first malformed part.
    /// - [`EnigmaError::Configuration`] for inconsistent counts, repeated part
    ///   names, or a box with fewer rotors than slots or no reflector.
    pub fn validate(&self) -> Result<()> {
        let alphabet = self.alphabet()?;
        let config = |msg: String| Err(EnigmaError::Configuration(msg));

        if self.rotor_slots == 0 {
            return config(format!("'{}' has no rotor slots", self.name));
        }
        if self.rotors.len() < self.rotor_slots {
            return config(format!(
                "'{}' has {} slots but only {} rotors",
                self.name,
                self.rotor_slots,
                self.rotors.len()
            ));
        }
        let pawls = self.pawl_count();
        if pawls == 0 || pawls > self.rotor_slots {
            return config(format!(
                "'{}' has {} pawls for {} slots",
                self.name, pawls, self.rotor_slots
            ));
        }
        if let Some(max) = self.max_plugboard_connections {
            if max > alphabet.len() / 2 {
                return config(format!(
                    "'{}' allows {} plugboard cables over {} symbols",
                    self.name,
                    max,
                    alphabet.len()
                ));
            }
        }
        if self.reflectors.is_empty() {
            return config(format!("'{}' has no reflector", self.name));
        }

        let mut names = HashSet::new();
        for rotor in &self.rotors {
            if !names.insert(rotor.name.as_str()) {
                return config(format!("rotor '{}' is listed twice", rotor.name));
            }
            Self::build_rotor(&alphabet, rotor)?;
        }
        let mut names = HashSet::new();
        for reflector in &self.reflectors {
            if !names.insert(reflector.name.as_str()) {
                return config(format!("reflector '{}' is listed twice", reflector.name));
            }
            Self::build_reflector(&alphabet, reflector)?;
        }
        self.entry_wheel.build(&alphabet)?;
        Ok(())
    }

    /// Builds the alphabet of the description.
    pub fn alphabet(&self) -> Result<Alphabet> {
        Alphabet::new(&self.alphabet)
    }

    /// Number of rotors driven by a pawl.
    pub fn pawl_count(&self) -> usize {
        self.pawls.unwrap_or(self.rotor_slots)
    }

    /// Maximum number of plugboard cables.
    pub fn plugboard_capacity(&self) -> Result<usize> {
        let half = self.alphabet()?.len() / 2;
        Ok(self.max_plugboard_connections.unwrap_or(half))
    }

    /// Names of the rotors in the box, in listing order.
    pub fn rotor_names(&self) -> impl Iterator<Item = &str> {
        self.rotors.iter().map(|r| r.name.as_str())
    }

    /// Names of the available reflectors, in listing order.
    pub fn reflector_names(&self) -> impl Iterator<Item = &str> {
        self.reflectors.iter().map(|r| r.name.as_str())
    }

    /// Builds the named rotor model.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownComponent`] if no rotor has that name, or
    /// the wiring errors of [`RotorModel::from_symbols`].
    pub fn rotor_model(&self, alphabet: &Alphabet, name: &str) -> Result<RotorModel> {
        let rotor = self
            .rotors
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| EnigmaError::UnknownComponent {
                kind: "rotor",
                name: name.to_string(),
            })?;
        Self::build_rotor(alphabet, rotor)
    }

    /// Builds the named reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::UnknownComponent`] if no reflector has that name,
    /// or the wiring errors of [`Reflector::from_symbols`].
    pub fn reflector(&self, alphabet: &Alphabet, name: &str) -> Result<Reflector> {
        let reflector = self
            .reflectors
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| EnigmaError::UnknownComponent {
                kind: "reflector",
                name: name.to_string(),
            })?;
        Self::build_reflector(alphabet, reflector)
    }

    fn build_rotor(alphabet: &Alphabet, rotor: &RotorSpec) -> Result<RotorModel> {
        RotorModel::from_symbols(alphabet, &rotor.name, &rotor.wiring, &rotor.turnover)
    }

    fn build_reflector(alphabet: &Alphabet, reflector: &ReflectorSpec) -> Result<Reflector> {
        Ok(
            Reflector::from_symbols(alphabet, &reflector.name, &reflector.wiring)?
                .with_capabilities(reflector.rotatable, reflector.rewirable),
        )
    }
}
