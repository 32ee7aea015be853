use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        AnaviewError::construction("x")
            .to_string()
            .contains("construction error:")
    );
    assert!(
        AnaviewError::resolution("x")
            .to_string()
            .contains("resolution error:")
    );
    assert!(
        AnaviewError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        AnaviewError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = AnaviewError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: AnaviewError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, AnaviewError::Serde(_)));
}
