//! End-to-end vectors for the catalogued machines.
//!
//! Every expected value below is frozen: a change in output means the signal
//! path, the stepping rule or a catalogue wiring changed.
//!
//! Coverage:
//! - Enigma I with rotors I II III, reflector B, rings and windows at A
//! - rotor stack `[III, II, I]` first keystrokes and turnover continuation
//! - middle-rotor double step (pawl) versus plain carry (odometer)
//! - ring settings
//! - 1941 Operation Barbarossa message (plugboard, rings, ground position)
//! - M4 with Beta and B-thin against the three-rotor machine with UKW-B
//! - M4 with Gamma, double-notched rotors and a full plugboard
//! - commercial Enigma D with the keyboard-order entry wheel

use enigmacrypt::{EnigmaError, Machine, MachineBuilder, SteppingMode, Variant};

fn enigma_i(rotors: &[&str], rings: &[usize], positions: &str) -> Machine {
    MachineBuilder::new(Variant::EnigmaI.spec())
        .rotors(rotors)
        .ring_settings(rings)
        .ground_positions(positions)
        .reflector("B")
        .build()
        .unwrap()
}

// ═══════════════════════════════════════════════════════════════════════
// Enigma I, rotors I II III, UKW-B, AAA / AAA
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn five_a_keystrokes() {
    let mut machine = enigma_i(&["I", "II", "III"], &[0, 0, 0], "AAA");
    assert_eq!(machine.encode_text("AAAAA").unwrap(), "BDZGO");
    assert_eq!(machine.window(), "AAF");
}

#[test]
fn hello_world() {
    let mut machine = enigma_i(&["I", "II", "III"], &[0, 0, 0], "AAA");
    assert_eq!(machine.encode_text("HELLOWORLD").unwrap(), "ILBDAAMTAZ");
    assert_eq!(machine.window(), "AAK");
}

#[test]
fn thirty_a_keystrokes_cross_middle_turnover() {
    let mut machine = enigma_i(&["I", "II", "III"], &[0, 0, 0], "AAA");
    assert_eq!(
        machine.encode_text(&"A".repeat(30)).unwrap(),
        "BDZGOWCXLTKSBTMCDLPBMUQOFXYHCX"
    );
    assert_eq!(machine.window(), "ABE", "rotor III passed V once");
}

#[test]
fn decryption_restores_plaintext() {
    let mut encoder = enigma_i(&["I", "II", "III"], &[0, 0, 0], "AAA");
    let mut decoder = enigma_i(&["I", "II", "III"], &[0, 0, 0], "AAA");
    assert_eq!(decoder.encode_text("ILBDAAMTAZ").unwrap(), "HELLOWORLD");
    let cipher = encoder.encode_text("ATTACK AT DAWN").unwrap();
    let mut again = enigma_i(&["I", "II", "III"], &[0, 0, 0], "AAA");
    assert_eq!(again.encode_text(&cipher).unwrap(), "ATTACKATDAWN");
}

// ═══════════════════════════════════════════════════════════════════════
// Rotor stack [III, II, I]
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn stack_three_two_one_first_keystrokes() {
    let mut machine = enigma_i(&["III", "II", "I"], &[0, 0, 0], "AAA");
    assert_eq!(machine.encode('A').unwrap(), 'F');
    assert_eq!(machine.encode('B').unwrap(), 'U');
    assert_eq!(machine.window(), "AAC");
}

#[test]
fn stack_three_two_one_turnover_continuation() {
    let mut machine = enigma_i(&["III", "II", "I"], &[0, 0, 0], "AAA");
    let mut output = machine.encode_text("AB").unwrap();
    machine.rotors_mut()[2].set_window_position('O').unwrap();
    output.push_str(&machine.encode_text("AA").unwrap());
    assert_eq!(machine.window(), "AAQ");
    output.push(machine.encode('B').unwrap());
    assert_eq!(output, "FUNJN");
    let windows: Vec<usize> = machine.rotors().iter().map(|r| r.window()).collect();
    assert_eq!(windows, vec![0, 1, 17]);
}

// ═══════════════════════════════════════════════════════════════════════
// Stepping rules
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn double_step_from_adu() {
    let mut machine = enigma_i(&["I", "II", "III"], &[0, 0, 0], "ADU");
    assert_eq!(machine.encode_text("AAA").unwrap(), "EQI");
    assert_eq!(machine.window(), "BFX");
}

#[test]
fn odometer_from_adu() {
    let mut machine = MachineBuilder::new(Variant::EnigmaI.spec())
        .rotors(&["I", "II", "III"])
        .ground_positions("ADU")
        .reflector("B")
        .stepping(SteppingMode::Odometer)
        .build()
        .unwrap();
    assert_eq!(machine.encode_text("AAA").unwrap(), "EQE");
    assert_eq!(machine.window(), "AEX");
}

// ═══════════════════════════════════════════════════════════════════════
// Ring settings and a historical message
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn ring_settings_bbb() {
    let mut machine = enigma_i(&["I", "II", "III"], &[1, 1, 1], "AAA");
    assert_eq!(machine.encode_text("AAAAA").unwrap(), "EWTYX");
}

const BARBAROSSA_CIPHER: &str = "EDPUDNRGYSZRCXNUYTPOMRMBOFKTBZREZKMLXLVEFGUEYSIOZVEQMIKUBPMMYLKLTTDEISMDICAGYKUACTCDOMOHWXMUUIAUBSTSLRNBZSZWNRFXWFYSSXJZVIJHIDISHPRKLKAYUPADTXQSPINQMATLPIFSVKDASCTACDPBOPVHJK";
const BARBAROSSA_PLAIN: &str = "AUFKLXABTEILUNGXVONXKURTINOWAXKURTINOWAXNORDWESTLXSEBEZXSEBEZXUAFFLIEGERSTRASZERIQTUNGXDUBROWKIXDUBROWKIXOPOTSCHKAXOPOTSCHKAXUMXEINSAQTDREINULLXUHRANGETRETENXANGRIFFXINFXRGTX";

#[test]
fn barbarossa_1941() {
    let mut machine = MachineBuilder::new(Variant::EnigmaI.spec())
        .rotors(&["II", "IV", "V"])
        .ring_settings(&[1, 20, 11])
        .ground_positions("BLA")
        .reflector("B")
        .plugs("AV BS CG DL FU HZ IN KM OW RX")
        .build()
        .unwrap();
    assert_eq!(machine.encode_text(BARBAROSSA_CIPHER).unwrap(), BARBAROSSA_PLAIN);
    assert_eq!(machine.window(), "BRS");

    machine.reset();
    assert_eq!(machine.window(), "BLA");
    assert_eq!(machine.encode_text(BARBAROSSA_PLAIN).unwrap(), BARBAROSSA_CIPHER);
}

// ═══════════════════════════════════════════════════════════════════════
// Naval machines
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn m4_beta_b_thin_matches_three_rotor_ukw_b() {
    let mut m4 = MachineBuilder::new(Variant::M4.spec())
        .rotors(&["Beta", "I", "II", "III"])
        .reflector("B-thin")
        .build()
        .unwrap();
    let mut m3 = MachineBuilder::new(Variant::M3.spec())
        .rotors(&["I", "II", "III"])
        .reflector("B")
        .build()
        .unwrap();
    assert_eq!(m4.encode_text("AAAAA").unwrap(), "BDZGO");
    assert_eq!(m4.window(), "AAAF");

    let text = "VORMVORXUNTERSEEBOOTEXSTANDORTQUADRATXAJ";
    m4.reset();
    assert_eq!(m4.encode_text(text).unwrap(), m3.encode_text(text).unwrap());
}

#[test]
fn m4_gamma_double_notch_plugged() {
    let mut machine = MachineBuilder::new(Variant::M4.spec())
        .rotors(&["Gamma", "VI", "VII", "VIII"])
        .ring_settings(&[0, 25, 2, 12])
        .ground_positions("QEVZ")
        .reflector("C-thin")
        .plugs("AT BL DF GJ HM NW OP QY RZ VX")
        .build()
        .unwrap();
    assert_eq!(
        machine.encode_text("THEQUICKBROWNFOX").unwrap(),
        "NLRHHHMEQTSOMGJH"
    );
    assert_eq!(machine.window(), "QEXP");
}

// ═══════════════════════════════════════════════════════════════════════
// Commercial machine
// ═══════════════════════════════════════════════════════════════════════

fn enigma_d() -> Machine {
    MachineBuilder::new(Variant::EnigmaD.spec())
        .rotors(&["I", "II", "III"])
        .reflector("UKW")
        .build()
        .unwrap()
}

#[test]
fn enigma_d_keyboard_entry_wheel() {
    let mut machine = enigma_d();
    assert_eq!(machine.encode_text("AAAAA").unwrap(), "HWQIO");
    let mut machine = enigma_d();
    assert_eq!(machine.encode_text("HELLOWORLD").unwrap(), "APJJAUPYIC");
}

#[test]
fn enigma_d_has_no_plugboard() {
    let mut machine = enigma_d();
    assert_eq!(machine.plugboard().max_connections(), 0);
    assert!(!machine.plugboard_mut().connect('A', 'B').unwrap());
}

// ═══════════════════════════════════════════════════════════════════════
// Invalid input
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn invalid_key_leaves_state_untouched() {
    let mut machine = enigma_i(&["I", "II", "III"], &[0, 0, 0], "AAA");
    assert_eq!(machine.encode('#'), Err(EnigmaError::InvalidKey('#')));
    assert_eq!(machine.window(), "AAA");
    assert_eq!(machine.encode_text("A#A A-A.A").unwrap(), "BDZGO");
}
