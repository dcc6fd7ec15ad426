//! Historical machine catalogue.
//!
//! Wiring tables of the rotors and reflectors issued with the Enigma I, the
//! naval M3 and M4, and the commercial Enigma D.

use std::fmt;
use std::str::FromStr;

use crate::alphabet::LATIN;
use crate::config::{EntryWheelSpec, MachineSpec, ReflectorSpec, RotorSpec};
use crate::error::EnigmaError;

/// (name, wiring, turnover letters)
type RotorEntry = (&'static str, &'static str, &'static str);
/// (name, wiring)
type ReflectorEntry = (&'static str, &'static str);

const ROTORS_I_V: [RotorEntry; 5] = [
    ("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q"),
    ("II", "AJDKSIRUXBLHWTMCQGZNPYFVOE", "E"),
    ("III", "BDFHJLCPRTXVZNYEIWGAKMUSQO", "V"),
    ("IV", "ESOVPZJAYQUIRHXLNFTGKDCMWB", "J"),
    ("V", "VZBRGITYUPSDNHLXAWMJQOFECK", "Z"),
];

const ROTORS_VI_VIII: [RotorEntry; 3] = [
    ("VI", "JPGVOUMFYQBENHZRDKASXLICTW", "ZM"),
    ("VII", "NZJHGRCXMYSWBOUFAIVLPEKQDT", "ZM"),
    ("VIII", "FKQHTLXOCBJSPDZRAMEWNIUYGV", "ZM"),
];

const GREEK_WHEELS: [RotorEntry; 2] = [
    ("Beta", "LEYJVCNIXWPBQMDRTAKZGFUHOS", ""),
    ("Gamma", "FSOKANUERHMBTIYCWLQPZXVGJD", ""),
];

const UKW_A: ReflectorEntry = ("A", "EJMZALYXVBWFCRQUONTSPIKHGD");
const UKW_B: ReflectorEntry = ("B", "YRUHQSLDPXNGOKMIEBFZCWVJAT");
const UKW_C: ReflectorEntry = ("C", "FVPJIAOYEDRZXWGCTKUQSBNMHL");
const UKW_B_THIN: ReflectorEntry = ("B-thin", "ENKQAUYWJICOPBLMDXZVFTHRGS");
const UKW_C_THIN: ReflectorEntry = ("C-thin", "RDOBJNTKVEHMLFCWZAXGYIPSUQ");

const COMMERCIAL_ROTORS: [RotorEntry; 3] = [
    ("I", "LPGSZMHAEOQKVXRFYBUTNICJDW", "Y"),
    ("II", "SLVGBTFXJQOHEWIRZYAMKPCNDU", "E"),
    ("III", "CJGDPSHKTURAWZXFMYNQOBVLIE", "N"),
];
const COMMERCIAL_UKW: ReflectorEntry = ("UKW", "IMETCGFRAYSQBZXWLHKDVUPOJN");

/// A historical machine in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Army and air force Enigma I: rotors I–V, reflectors A–C.
    EnigmaI,
    /// Naval three-rotor M3: rotors I–VIII, reflectors B and C.
    M3,
    /// Naval four-rotor M4 with a fixed Greek wheel and thin reflectors.
    M4,
    /// Commercial Enigma D: keyboard-order entry wheel, no plugboard.
    EnigmaD,
}

impl Variant {
    /// Every catalogued variant.
    pub const ALL: [Variant; 4] = [Variant::EnigmaI, Variant::M3, Variant::M4, Variant::EnigmaD];

    /// Machine description of the variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigmacrypt::Variant;
    ///
    /// let spec = Variant::M4.spec();
    /// assert_eq!(spec.rotor_slots, 4);
    /// assert_eq!(spec.pawl_count(), 3);
    /// ```
    pub fn spec(self) -> MachineSpec {
        match self {
            Variant::EnigmaI => assemble(
                "Enigma I",
                &[&ROTORS_I_V],
                &[UKW_A, UKW_B, UKW_C],
                EntryWheelSpec::Identity,
                3,
                3,
                13,
            ),
            Variant::M3 => assemble(
                "Enigma M3",
                &[&ROTORS_I_V, &ROTORS_VI_VIII],
                &[UKW_B, UKW_C],
                EntryWheelSpec::Identity,
                3,
                3,
                13,
            ),
            Variant::M4 => assemble(
                "Enigma M4",
                &[&ROTORS_I_V, &ROTORS_VI_VIII, &GREEK_WHEELS],
                &[UKW_B_THIN, UKW_C_THIN],
                EntryWheelSpec::Identity,
                4,
                3,
                13,
            ),
            Variant::EnigmaD => assemble(
                "Enigma D",
                &[&COMMERCIAL_ROTORS],
                &[COMMERCIAL_UKW],
                EntryWheelSpec::Keyboard,
                3,
                3,
                0,
            ),
        }
    }

    /// Rotor order used when none is given, leftmost first.
    pub fn default_rotors(self) -> &'static [&'static str] {
        match self {
            Variant::M4 => &["Beta", "I", "II", "III"],
            _ => &["I", "II", "III"],
        }
    }

    /// Reflector used when none is given.
    pub fn default_reflector(self) -> &'static str {
        match self {
            Variant::EnigmaI | Variant::M3 => "B",
            Variant::M4 => "B-thin",
            Variant::EnigmaD => "UKW",
        }
    }
}

fn assemble(
    name: &str,
    rotors: &[&[RotorEntry]],
    reflectors: &[ReflectorEntry],
    entry_wheel: EntryWheelSpec,
    rotor_slots: usize,
    pawls: usize,
    max_plugboard_connections: usize,
) -> MachineSpec {
    MachineSpec {
        name: name.to_string(),
        alphabet: LATIN.to_string(),
        rotors: rotors
            .iter()
            .flat_map(|set| set.iter())
            .map(|&(name, wiring, turnover)| RotorSpec {
                name: name.to_string(),
                wiring: wiring.to_string(),
                turnover: turnover.to_string(),
            })
            .collect(),
        reflectors: reflectors
            .iter()
            .map(|&(name, wiring)| ReflectorSpec {
                name: name.to_string(),
                wiring: wiring.to_string(),
                // Only the commercial reflector could be set by hand.
                rotatable: name == COMMERCIAL_UKW.0,
                rewirable: false,
            })
            .collect(),
        entry_wheel,
        rotor_slots,
        pawls: Some(pawls),
        max_plugboard_connections: Some(max_plugboard_connections),
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Variant::EnigmaI => "enigma-i",
            Variant::M3 => "m3",
            Variant::M4 => "m4",
            Variant::EnigmaD => "enigma-d",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Variant {
    type Err = EnigmaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "enigma-i" | "enigma-1" | "i" => Ok(Variant::EnigmaI),
            "m3" | "enigma-m3" => Ok(Variant::M3),
            "m4" | "enigma-m4" => Ok(Variant::M4),
            "enigma-d" | "d" | "commercial" => Ok(Variant::EnigmaD),
            _ => Err(EnigmaError::UnknownComponent {
                kind: "machine model",
                name: s.to_string(),
            }),
        }
    }
}

impl MachineSpec {
    /// Machine description of a catalogued variant.
    pub fn historical(variant: Variant) -> Self {
        variant.spec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_validates() {
        for variant in Variant::ALL {
            let spec = variant.spec();
            spec.validate()
                .unwrap_or_else(|e| panic!("{} does not validate: {}", variant, e));
            let names: Vec<&str> = spec.rotor_names().collect();
            for rotor in variant.default_rotors() {
                assert!(names.contains(rotor), "{} lacks rotor {}", variant, rotor);
            }
            assert_eq!(variant.default_rotors().len(), spec.rotor_slots);
            assert!(spec.reflector_names().any(|r| r == variant.default_reflector()));
        }
    }

    #[test]
    fn test_box_contents() {
        assert_eq!(Variant::EnigmaI.spec().rotors.len(), 5);
        assert_eq!(Variant::M3.spec().rotors.len(), 8);
        assert_eq!(Variant::M4.spec().rotors.len(), 10);
        assert_eq!(Variant::EnigmaD.spec().plugboard_capacity().unwrap(), 0);
        assert_eq!(
            Variant::EnigmaD.spec().entry_wheel,
            EntryWheelSpec::Keyboard
        );
    }

    #[test]
    fn test_double_notch_rotors() {
        let spec = Variant::M3.spec();
        let alphabet = spec.alphabet().unwrap();
        let vi = spec.rotor_model(&alphabet, "VI").unwrap();
        assert_eq!(vi.turnovers(), &[25, 12]);
    }

    #[test]
    fn test_commercial_reflector_rotatable() {
        let spec = Variant::EnigmaD.spec();
        let alphabet = spec.alphabet().unwrap();
        assert!(spec.reflector(&alphabet, "UKW").unwrap().is_rotatable());
        let spec = Variant::EnigmaI.spec();
        assert!(!spec.reflector(&alphabet, "B").unwrap().is_rotatable());
    }

    #[test]
    fn test_variant_names() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse::<Variant>().unwrap(), variant);
        }
        assert_eq!("Enigma_I".parse::<Variant>().unwrap(), Variant::EnigmaI);
        assert!(matches!(
            "typex".parse::<Variant>(),
            Err(EnigmaError::UnknownComponent { .. })
        ));
    }

    #[test]
    fn test_historical_matches_spec() {
        assert_eq!(MachineSpec::historical(Variant::M4), Variant::M4.spec());
    }
}
