//! Enigma rotor cipher machine engine.
//!
//! Reproduces the signal path of the Enigma family of rotor machines: each
//! keystroke steps the rotor stack and then passes through a chain of
//! reversible substitutions and back out through a reflector. The engine
//! works over any ordered, duplicate-free alphabet, not only `A..=Z`.
//!
//! # Architecture
//!
//! ```text
//! Alphabet        (symbol ↔ contact index)
//!     ↓ shared by
//! Wiring          (forward / backward on contact indices)
//!     implemented by EntryWheel, Plugboard, Rotor, Reflector
//!     ↓ composed by
//! Machine         (SteppingController + signal path)
//!     ↑ assembled by
//! MachineBuilder  (named parts of a MachineSpec / historical Variant)
//! ```
//!
//! # Examples
//!
//! Encrypt with an Enigma I and decrypt with a second machine on the same key:
//!
//! ```
//! use enigmacrypt::{MachineBuilder, Variant};
//!
//! let key = MachineBuilder::new(Variant::EnigmaI.spec())
//!     .rotors(&["I", "II", "III"])
//!     .reflector("B")
//!     .ground_positions("AAA");
//!
//! let mut encoder = key.build().unwrap();
//! let cipher = encoder.encode_text("HELLO WORLD").unwrap();
//! assert_eq!(cipher, "ILBDAAMTAZ");
//!
//! let mut decoder = key.build().unwrap();
//! assert_eq!(decoder.encode_text(&cipher).unwrap(), "HELLOWORLD");
//! ```
//!
//! Load a machine description from JSON:
//!
//! ```
//! use enigmacrypt::{MachineBuilder, MachineSpec, Variant};
//!
//! let json = Variant::M3.spec().to_json().unwrap();
//! let spec = MachineSpec::from_json(&json).unwrap();
//! let mut machine = MachineBuilder::new(spec)
//!     .rotors(&["VI", "VII", "VIII"])
//!     .reflector("C")
//!     .build()
//!     .unwrap();
//! assert_eq!(machine.encode_text("A").unwrap().len(), 1);
//! ```

#![deny(clippy::all)]

pub mod error;

mod alphabet;
mod builder;
mod catalog;
mod config;
mod entry_wheel;
mod machine;
mod plugboard;
mod reflector;
mod rotor;
mod stepping;
pub mod utils;
mod wiring;

pub use alphabet::{Alphabet, LATIN};
pub use builder::MachineBuilder;
pub use catalog::Variant;
pub use config::{EntryWheelSpec, MachineSpec, ReflectorSpec, RotorSpec};
pub use entry_wheel::{EntrySequence, EntryWheel, KEYBOARD_ORDER};
pub use error::{EnigmaError, Result};
pub use machine::Machine;
pub use plugboard::Plugboard;
pub use reflector::Reflector;
pub use rotor::{Rotor, RotorModel};
pub use stepping::{SteppingController, SteppingMode};
pub use wiring::{Permutation, PermutationError, Wiring};
