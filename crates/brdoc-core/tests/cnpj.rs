use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use brdoc_core::Cnpj;

#[test]
fn accepts_numeric_cnpjs_in_both_forms() {
    assert!(Cnpj::is_valid("33.000.167/1002-46"));
    assert!(Cnpj::is_valid("33000167100246"));
    assert!(Cnpj::is_valid("00.000.000/0001-91"));
    assert!(Cnpj::is_valid("00000000000191"));
    assert!(Cnpj::is_valid("34.588.324/0001-04"));
    assert!(Cnpj::is_valid("72.285.712/0001-05"));
}

#[test]
fn accepts_alphanumeric_payloads_case_insensitively() {
    assert!(Cnpj::is_valid("AA.AAA.AAA/AAAA-45"));
    assert!(Cnpj::is_valid("AAAAAAAAAAAA45"));
    assert!(Cnpj::is_valid("aa.aaa.aaa/aaaa-45"));
    assert!(Cnpj::is_valid("aaaaaaaaaaaa45"));
    assert!(Cnpj::is_valid("AB.CDE.FGI/HIJK-56"));
    assert!(Cnpj::is_valid("12ABC34501DE35"));
    assert!(Cnpj::is_valid("12.ABC.345/01DE-35"));
}

#[test]
fn rejects_mutated_check_digits() {
    assert!(!Cnpj::is_valid("33.000.167/1002-56"));
    assert!(!Cnpj::is_valid("33000167100256"));
    assert!(!Cnpj::is_valid("33.000.167/1002-45"));
    assert!(!Cnpj::is_valid("33000167100245"));
}

#[test]
fn check_digit_positions_must_be_decimal() {
    // Letters only ever contribute to the 12 payload slots.
    assert!(!Cnpj::is_valid("AAAAAAAAAAAAAA"));
    assert!(!Cnpj::is_valid("12ABC34501DE3A"));
}

#[test]
fn rejects_misplaced_separators() {
    assert!(!Cnpj::is_valid("33.000.167/1002.46"));
    assert!(!Cnpj::is_valid("33-000-167/1002-46"));
    assert!(!Cnpj::is_valid("33.000.167.1002-46"));
}

#[test]
fn rejects_structural_garbage() {
    assert!(!Cnpj::is_valid(""));
    assert!(!Cnpj::is_valid("3300016710024"));
    assert!(!Cnpj::is_valid("330001671002467"));
    assert!(!Cnpj::is_valid("33000167%00246"));
}

#[test]
fn lowercase_input_formats_to_uppercase() {
    let cnpj = Cnpj::parse("aa.aaa.aaa/aaaa-45").unwrap();
    assert_eq!(cnpj.to_string(), "AA.AAA.AAA/AAAA-45");
    let compact = Cnpj::parse("aaaaaaaaaaaa45").unwrap();
    assert_eq!(compact.to_string(), "AA.AAA.AAA/AAAA-45");
    assert_eq!(cnpj, compact);
}

#[test]
fn both_forms_format_to_the_same_canonical_string() {
    let formatted = Cnpj::parse("33.000.167/1002-46").map(|cnpj| cnpj.to_string());
    let compact = Cnpj::parse("33000167100246").map(|cnpj| cnpj.to_string());
    assert_eq!(formatted.as_deref(), Ok("33.000.167/1002-46"));
    assert_eq!(compact.as_deref(), Ok("33.000.167/1002-46"));
}

#[test]
fn format_is_idempotent() {
    let cnpj = Cnpj::parse("12ABC34501DE35").unwrap();
    let reparsed = Cnpj::parse(&cnpj.formatted()).unwrap();
    assert_eq!(cnpj, reparsed);
    assert_eq!(cnpj.formatted(), reparsed.formatted());
}

#[test]
fn generated_cnpjs_always_validate() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    for _ in 0..1_000_000 {
        let cnpj = Cnpj::generate(&mut rng);
        assert!(Cnpj::is_valid(cnpj.as_compact()), "generated: {cnpj}");
        assert!(Cnpj::is_valid(&cnpj.formatted()), "generated: {cnpj}");
    }
}

#[test]
fn serde_round_trips_through_the_canonical_form() {
    let cnpj = Cnpj::parse("aaaaaaaaaaaa45").unwrap();
    let encoded = serde_json::to_string(&cnpj).unwrap();
    assert_eq!(encoded, "\"AA.AAA.AAA/AAAA-45\"");
    let decoded: Cnpj = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, cnpj);
}
