use brdoc_address::Uf;

#[test]
fn parses_abbreviations_case_insensitively() {
    assert_eq!("sp".parse::<Uf>().ok(), Some(Uf::Sp));
    assert_eq!("SP".parse::<Uf>().ok(), Some(Uf::Sp));
    assert_eq!("rj".parse::<Uf>().ok(), Some(Uf::Rj));
    assert_eq!("df".parse::<Uf>().ok(), Some(Uf::Df));
}

#[test]
fn parses_full_names_with_and_without_accents() {
    assert_eq!("São Paulo".parse::<Uf>().ok(), Some(Uf::Sp));
    assert_eq!("sao paulo".parse::<Uf>().ok(), Some(Uf::Sp));
    assert_eq!("saopaulo".parse::<Uf>().ok(), Some(Uf::Sp));
    assert_eq!("Rondônia".parse::<Uf>().ok(), Some(Uf::Ro));
    assert_eq!("rondonia".parse::<Uf>().ok(), Some(Uf::Ro));
    assert_eq!("rio grande do norte".parse::<Uf>().ok(), Some(Uf::Rn));
    assert_eq!("riograndedosul".parse::<Uf>().ok(), Some(Uf::Rs));
    assert_eq!("Espírito Santo".parse::<Uf>().ok(), Some(Uf::Es));
}

#[test]
fn rejects_unknown_names() {
    assert!("".parse::<Uf>().is_err());
    assert!("zz".parse::<Uf>().is_err());
    assert!("buenos aires".parse::<Uf>().is_err());
}

#[test]
fn codes_round_trip() {
    for uf in Uf::ALL {
        assert_eq!(Uf::from_code(uf.code()).ok(), Some(uf));
    }
    assert!(Uf::from_code(10).is_err());
    assert!(Uf::from_code(34).is_err());
    assert!(Uf::from_code(54).is_err());
}

#[test]
fn displays_the_abbreviation() {
    assert_eq!(Uf::Sp.to_string(), "SP");
    assert_eq!(Uf::Ro.name(), "Rondônia");
    assert_eq!(Uf::Ro.code(), 11);
}

#[test]
fn serde_accepts_strings_and_numeric_codes() {
    assert_eq!(serde_json::to_string(&Uf::Rj).ok().as_deref(), Some("\"RJ\""));

    let from_abbrev: Uf = serde_json::from_str("\"RJ\"").unwrap();
    assert_eq!(from_abbrev, Uf::Rj);
    let from_name: Uf = serde_json::from_str("\"rio de janeiro\"").unwrap();
    assert_eq!(from_name, Uf::Rj);
    let from_code: Uf = serde_json::from_str("33").unwrap();
    assert_eq!(from_code, Uf::Rj);

    assert!(serde_json::from_str::<Uf>("\"xx\"").is_err());
    assert!(serde_json::from_str::<Uf>("99").is_err());
}
