use super::*;

#[test]
fn complement_known_values() {
    assert_eq!(complement_hex("#FF0000").unwrap(), "#00FFFF");
    assert_eq!(complement_hex("#000000").unwrap(), "#FFFFFF");
    assert_eq!(complement_hex("#FFFFFF").unwrap(), "#000000");
}

#[test]
fn complement_pads_zero_channels() {
    assert_eq!(complement_hex("#FFF0FF").unwrap(), "#000F00");
}

#[test]
fn complement_is_an_involution() {
    for hex in ["#123456", "#A0B1C2", "#00FF7F", "#010203"] {
        let twice = complement_hex(&complement_hex(hex).unwrap()).unwrap();
        assert_eq!(twice, hex);
    }
    assert_eq!(
        complement_hex(&complement_hex("#abcdef").unwrap()).unwrap(),
        "#ABCDEF"
    );
}

#[test]
fn parse_rejects_malformed() {
    for bad in ["", "#12345", "#1234567", "#GG0000", "#+F0000"] {
        assert!(HexColor::parse(bad).is_err(), "{bad:?} should be rejected");
    }
    assert_eq!(HexColor::parse("ff8000").unwrap(), HexColor::rgb(255, 128, 0));
}

#[test]
fn serde_as_hex_string() {
    let c = HexColor::rgb(1, 2, 255);
    let s = serde_json::to_string(&c).unwrap();
    assert_eq!(s, "\"#0102FF\"");
    let back: HexColor = serde_json::from_str(&s).unwrap();
    assert_eq!(back, c);
    assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
}
