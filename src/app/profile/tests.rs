use tempfile::{NamedTempFile, tempdir};

use super::*;

fn write_json(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp profile file");
    fs::write(file.path(), content).expect("write profile fixture");
    file
}

#[test]
fn built_in_profile_is_valid_and_has_five_links() {
    let profile = Profile::default();
    assert!(profile.validate().is_ok());
    let titles: Vec<&str> = profile.links.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(
        titles,
        ["GitHub", "LinkedIn", "Telegram", "Instagram", "X"]
    );
}

#[test]
fn initials_come_from_the_name_unless_overridden() {
    let mut profile = Profile::default();
    assert_eq!(profile.initials(), "DT");
    profile.initials = Some("  ").map(str::to_string);
    assert_eq!(profile.initials(), "DT");
    profile.initials = Some("★".to_string());
    assert_eq!(profile.initials(), "★");
}

#[test]
fn validation_rejects_blank_and_non_web_links() {
    let mut profile = Profile::default();
    profile.links.push(LinkSpec::new(" ", "https://example.com"));
    assert_eq!(
        profile.validate(),
        Err(ProfileError::EmptyLinkTitle { index: 5 })
    );

    let mut profile = Profile::default();
    profile.links[0].url = "ftp://example.com".to_string();
    assert!(matches!(
        profile.validate(),
        Err(ProfileError::UnsupportedScheme { .. })
    ));

    let profile = Profile {
        name: String::new(),
        ..Profile::default()
    };
    assert_eq!(profile.validate(), Err(ProfileError::EmptyName));
}

#[test]
fn explicit_profile_path_is_read_and_validated() {
    let file = write_json(
        r#"{"name":"Ada L.","links":[{"title":"Blog","url":"https://ada.example"}]}"#,
    );
    let profile = load_profile_from(Some(file.path()), None).expect("valid profile");
    assert_eq!(profile.name, "Ada L.");
    assert!(profile.location.is_empty());
    assert_eq!(profile.links.len(), 1);
}

#[test]
fn explicit_profile_errors_are_reported() {
    let file = write_json(r#"{"name":"Ada","links":[{"title":"Blog","url":"mailto:a@b"}]}"#);
    let err = load_profile_from(Some(file.path()), None).expect_err("invalid scheme");
    assert!(format!("{err:#}").contains("http://"));

    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("nope.json");
    assert!(load_profile_from(Some(&missing), None).is_err());
}

#[test]
fn missing_default_profile_falls_back_to_built_in() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("profile.json");
    let profile = load_profile_from(None, Some(&path)).expect("fallback");
    assert_eq!(profile, Profile::default());
    assert_eq!(load_profile_from(None, None).expect("fallback"), Profile::default());
}

#[test]
fn broken_default_profile_is_ignored() {
    let file = write_json("{ not json");
    let profile = load_profile_from(None, Some(file.path())).expect("fallback");
    assert_eq!(profile, Profile::default());
}

#[test]
fn saved_profile_reloads_unchanged() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("profile.json");
    let mut profile = Profile::default();
    profile.initials = Some("D".to_string());
    save_profile(&path, &profile).expect("save profile");
    let restored = read_profile(&path).expect("reload");
    assert_eq!(restored, profile);
}
