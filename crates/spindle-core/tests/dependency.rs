use spindle_core::dependency::{DependencyScope, MavenCoordinate};

#[test]
fn maven_coordinate_parse_valid() {
    let coord = MavenCoordinate::parse("net.fabricmc:fabric-loader:0.16.9").unwrap();
    assert_eq!(coord.group_id, "net.fabricmc");
    assert_eq!(coord.artifact_id, "fabric-loader");
    assert_eq!(coord.version, "0.16.9");
}

#[test]
fn maven_coordinate_parse_two_parts_returns_none() {
    assert!(MavenCoordinate::parse("group:artifact").is_none());
}

#[test]
fn maven_coordinate_parse_four_parts_returns_none() {
    assert!(MavenCoordinate::parse("group:artifact:version:extra").is_none());
}

#[test]
fn maven_coordinate_parse_empty_string() {
    assert!(MavenCoordinate::parse("").is_none());
}

#[test]
fn maven_coordinate_display_roundtrip() {
    let s = "net.fabricmc.fabric-api:fabric-api:0.110.0+1.21.4";
    let coord = MavenCoordinate::parse(s).unwrap();
    assert_eq!(coord.to_string(), s);
}

#[test]
fn parse_strict_accepts_plus_build_metadata() {
    let coord = MavenCoordinate::parse_strict("net.fabricmc.fabric-api:fabric-api:0.110.0+1.21.4")
        .unwrap();
    assert_eq!(coord.version, "0.110.0+1.21.4");
}

#[test]
fn parse_strict_rejects_missing_segment() {
    let err = MavenCoordinate::parse_strict("net.fabricmc:fabric-loader").unwrap_err();
    assert!(err.contains("group:artifact:version"), "got: {err}");
}

#[test]
fn parse_strict_rejects_empty_group() {
    let err = MavenCoordinate::parse_strict(":artifact:1.0").unwrap_err();
    assert!(err.contains("group segment is empty"), "got: {err}");
}

#[test]
fn parse_strict_rejects_empty_version() {
    let err = MavenCoordinate::parse_strict("com.example:thing:").unwrap_err();
    assert!(err.contains("empty version"), "got: {err}");
}

#[test]
fn validate_rejects_invalid_group_character() {
    let coord = MavenCoordinate {
        group_id: "com.exa mple".to_string(),
        artifact_id: "thing".to_string(),
        version: "1.0".to_string(),
    };
    let err = coord.validate().unwrap_err();
    assert!(err.contains("invalid character"), "got: {err}");
}

#[test]
fn validate_rejects_unresolved_property_in_version() {
    let coord = MavenCoordinate {
        group_id: "com.example".to_string(),
        artifact_id: "thing".to_string(),
        version: "${fabric-api-version}".to_string(),
    };
    let err = coord.validate().unwrap_err();
    assert!(err.contains("unresolved property"), "got: {err}");
}

#[test]
fn is_game_matches_minecraft_only() {
    let game = MavenCoordinate::parse("com.mojang:minecraft:1.21.4").unwrap();
    assert!(game.is_game());
    let loader = MavenCoordinate::parse("net.fabricmc:fabric-loader:0.16.9").unwrap();
    assert!(!loader.is_game());
}

#[test]
fn dependency_scope_default_is_mod() {
    assert_eq!(DependencyScope::default(), DependencyScope::Mod);
}

#[test]
fn dependency_scope_from_str() {
    assert_eq!("mod".parse::<DependencyScope>().unwrap(), DependencyScope::Mod);
    assert_eq!(
        "provided".parse::<DependencyScope>().unwrap(),
        DependencyScope::Provided
    );
    let err = "test".parse::<DependencyScope>().unwrap_err();
    assert!(err.contains("unknown scope 'test'"), "got: {err}");
}

#[test]
fn dependency_scope_maven_mapping() {
    assert_eq!(DependencyScope::Mod.maven_scope(), "compile");
    assert_eq!(DependencyScope::Compile.maven_scope(), "compile");
    assert_eq!(DependencyScope::Provided.maven_scope(), "provided");
    assert_eq!(DependencyScope::Runtime.maven_scope(), "runtime");
}

#[test]
fn dependency_scope_display_matches_as_str() {
    assert_eq!(DependencyScope::Runtime.to_string(), "runtime");
}
