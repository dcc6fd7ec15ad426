//! Assembles a [`Machine`] from the named parts of a [`MachineSpec`].

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::alphabet::Alphabet;
use crate::config::MachineSpec;
use crate::entry_wheel::EntryWheel;
use crate::error::{EnigmaError, Result};
use crate::machine::Machine;
use crate::plugboard::Plugboard;
use crate::rotor::Rotor;
use crate::stepping::SteppingMode;
use crate::utils::converter::parse_pairs;

/// Collects the daily key for one machine variant and validates it as a
/// whole in [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use enigmacrypt::{MachineBuilder, Variant};
///
/// let mut machine = MachineBuilder::new(Variant::EnigmaI.spec())
///     .rotors(&["II", "IV", "V"])
///     .ring_settings(&[1, 20, 11])
///     .ground_positions("BLA")
///     .reflector("B")
///     .plugs("AV BS CG DL FU HZ IN KM OW RX")
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.encode_text("EDPUD").unwrap(), "AUFKL");
/// ```
#[derive(Debug, Clone)]
pub struct MachineBuilder {
    spec: MachineSpec,
    rotors: Vec<String>,
    ring_settings: Option<Vec<usize>>,
    ground_positions: Option<String>,
    reflector: Option<String>,
    plugs: String,
    entry_wheel: Option<EntryWheel>,
    stepping: SteppingMode,
}

impl MachineBuilder {
    /// Starts a machine of the given variant with no parts chosen.
    pub fn new(spec: MachineSpec) -> Self {
        MachineBuilder {
            spec,
            rotors: Vec::new(),
            ring_settings: None,
            ground_positions: None,
            reflector: None,
            plugs: String::new(),
            entry_wheel: None,
            stepping: SteppingMode::default(),
        }
    }

    /// Rotor names, leftmost first. An empty name leaves its slot empty.
    pub fn rotors<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.rotors = names.iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    /// Ring settings, leftmost first, as 0-based offsets (`0 == 'A'`).
    /// All rings stay at 0 when this is never called.
    pub fn ring_settings(mut self, rings: &[usize]) -> Self {
        self.ring_settings = Some(rings.to_vec());
        self
    }

    /// Window letters, leftmost first. All windows show the first symbol
    /// when this is never called.
    pub fn ground_positions(mut self, positions: &str) -> Self {
        self.ground_positions = Some(positions.to_string());
        self
    }

    pub fn reflector(mut self, name: &str) -> Self {
        self.reflector = Some(name.to_string());
        self
    }

    /// Plugboard cables as whitespace-separated pairs, e.g. `"AB CD"`.
    pub fn plugs(mut self, pairs: &str) -> Self {
        self.plugs = pairs.to_string();
        self
    }

    /// Replaces the entry wheel of the variant.
    pub fn entry_wheel(mut self, entry_wheel: EntryWheel) -> Self {
        self.entry_wheel = Some(entry_wheel);
        self
    }

    pub fn stepping(mut self, mode: SteppingMode) -> Self {
        self.stepping = mode;
        self
    }

    /// Validates the key and assembles the machine.
    ///
    /// # Errors
    /// - [`EnigmaError::Configuration`] if a slot is empty, a rotor is used
    ///   twice, the number of rotors, rings or windows differs from the slot
    ///   count, no reflector was chosen, or a plugboard cable collides with
    ///   another or exceeds the cable limit.
    /// - [`EnigmaError::UnknownComponent`] for a name not in the spec.
    /// - [`EnigmaError::InvalidSymbol`] for a window or plug symbol outside
    ///   the alphabet.
    /// - Any error of [`MachineSpec::validate`].
    pub fn build(&self) -> Result<Machine> {
        self.spec.validate()?;
        let alphabet = Arc::new(self.spec.alphabet()?);
        let slots = self.spec.rotor_slots;

        let rotors = self.build_rotors(&alphabet, slots)?;
        let reflector_name = self
            .reflector
            .as_deref()
            .ok_or_else(|| EnigmaError::Configuration("no reflector chosen".to_string()))?;
        let reflector = self.spec.reflector(&alphabet, reflector_name)?;
        let plugboard = self.build_plugboard(&alphabet)?;
        let entry_wheel = match &self.entry_wheel {
            Some(wheel) => wheel.clone(),
            None => self.spec.entry_wheel.build(&alphabet)?,
        };

        let machine = Machine::build(entry_wheel, plugboard, rotors, reflector)?
            .with_stepping(self.stepping, self.spec.pawl_count())?;
        debug!(
            spec = %self.spec.name,
            rotors = %self.rotors.join(" "),
            window = %machine.window(),
            cables = machine.plugboard().connection_count(),
            "machine built"
        );
        Ok(machine)
    }

    fn build_rotors(&self, alphabet: &Arc<Alphabet>, slots: usize) -> Result<Vec<Rotor>> {
        let config = EnigmaError::Configuration;
        if self.rotors.len() != slots {
            return Err(config(format!(
                "{} takes {} rotors, {} given",
                self.spec.name,
                slots,
                self.rotors.len()
            )));
        }
        let rings = match &self.ring_settings {
            Some(rings) if rings.len() != slots => {
                return Err(config(format!(
                    "{} ring settings given for {} rotors",
                    rings.len(),
                    slots
                )))
            }
            Some(rings) => rings.clone(),
            None => vec![0; slots],
        };
        let windows: Vec<char> = match &self.ground_positions {
            Some(p) if p.chars().count() != slots => {
                return Err(config(format!(
                    "ground position '{}' does not name {} rotors",
                    p, slots
                )))
            }
            Some(p) => p.chars().collect(),
            None => vec![alphabet.symbols()[0]; slots],
        };

        let mut used = HashSet::new();
        let mut rotors = Vec::with_capacity(slots);
        for (slot, name) in self.rotors.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(config(format!("rotor slot {} is empty", slot + 1)));
            }
            if !used.insert(name.as_str()) {
                return Err(config(format!("rotor '{}' is used twice", name)));
            }
            let model = self.spec.rotor_model(alphabet, name)?;
            let mut rotor = Rotor::new(model, Arc::clone(alphabet))?;
            rotor.set_ring_setting((rings[slot] % alphabet.len()) as i64);
            rotor.set_window_position(windows[slot])?;
            rotors.push(rotor);
        }
        Ok(rotors)
    }

    fn build_plugboard(&self, alphabet: &Arc<Alphabet>) -> Result<Plugboard> {
        let capacity = self.spec.plugboard_capacity()?;
        let mut plugboard = Plugboard::with_max_connections(Arc::clone(alphabet), capacity)?;
        for (a, b) in parse_pairs(&self.plugs)? {
            if plugboard.connect(a, b)? {
                continue;
            }
            let reason = if plugboard.connection_count() >= capacity {
                format!("{} takes at most {} cables", self.spec.name, capacity)
            } else {
                format!("cable {}{} collides with another cable", a, b)
            };
            return Err(EnigmaError::Configuration(reason));
        }
        Ok(plugboard)
    }
}
