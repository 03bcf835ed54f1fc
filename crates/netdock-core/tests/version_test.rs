use netdock_core::{BaseImage, Error, RuntimeVersion, VersionTable};
use proptest::prelude::*;

fn v(s: &str) -> RuntimeVersion {
    s.parse().unwrap()
}

// ── Resolution scenarios ──

#[test]
fn resolves_newer_patch_in_same_major() {
    let table = VersionTable::parse(["1.0.3=imgA", "1.0.5=imgB"]).unwrap();
    let image = table.get_base_image(&v("1.0.4")).unwrap();
    assert_eq!(image.image(), "imgB");
}

#[test]
fn never_crosses_major_lines() {
    let table = VersionTable::parse(["1.0.5=imgB"]).unwrap();
    assert!(table.get_base_image(&v("2.0.0")).is_none());
}

#[test]
fn minor_bump_is_a_different_major_line() {
    let table = VersionTable::parse(["2.2.0=img22"]).unwrap();
    assert!(table.get_base_image(&v("2.1.0")).is_none());
}

#[test]
fn older_image_cannot_run_newer_request() {
    let table = VersionTable::parse(["2.1.3=img"]).unwrap();
    assert!(table.get_base_image(&v("2.1.4")).is_none());
}

#[test]
fn moniker_version_matches_patched_image() {
    // A project targeting netcoreapp2.1 requests plain "2.1".
    let table = VersionTable::parse(["2.1.5=aspnetcore:2.1.5", "2.0.9=aspnetcore:2.0.9"]).unwrap();
    let image = table.get_base_image(&v("2.1")).unwrap();
    assert_eq!(image.image(), "aspnetcore:2.1.5");
}

#[test]
fn picks_newest_compatible_entry() {
    let table =
        VersionTable::parse(["2.1.1=a", "2.1.10=c", "2.1.9=b", "2.0.3=z"]).unwrap();
    let image = table.get_base_image(&v("2.1.2")).unwrap();
    assert_eq!(image.image(), "c");
}

// ── Table construction ──

#[test]
fn table_is_sorted_descending_numerically() {
    let table = VersionTable::parse(["1.0.9=a", "1.0.10=b", "2.0.0=c", "1.1.0=d"]).unwrap();
    let versions: Vec<&str> = table.entries().iter().map(|e| e.version().as_str()).collect();
    assert_eq!(versions, ["2.0.0", "1.1.0", "1.0.10", "1.0.9"]);
}

#[test]
fn malformed_entry_names_offender() {
    let err = VersionTable::parse(["1.0.3=imgA", "no-separator"]).unwrap_err();
    assert!(matches!(err, Error::InvalidVersionMapEntry { .. }));
    assert!(err.to_string().contains("no-separator"));
}

#[test]
fn non_numeric_version_is_rejected() {
    let err = VersionTable::parse(["latest=img"]).unwrap_err();
    assert!(matches!(err, Error::InvalidVersion { .. }));
}

#[test]
fn empty_map_is_rejected() {
    let err = VersionTable::parse(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, Error::EmptyVersionMap));
}

#[test]
fn base_image_derives_major_version() {
    let image = BaseImage::new(v("2.1.5"), "img");
    assert_eq!(image.major_version(), "2.1");
    assert_eq!(image.image(), "img");
}

// ── Properties ──

fn version_parts() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..5, 0u64..5, 0u64..20)
}

fn render((a, b, c): (u64, u64, u64)) -> String {
    format!("{a}.{b}.{c}")
}

proptest! {
    #[test]
    fn same_major_supports_iff_not_older(
        major in (0u64..5, 0u64..5),
        pa in 0u64..20,
        pb in 0u64..20,
    ) {
        let a = v(&render((major.0, major.1, pa)));
        let b = v(&render((major.0, major.1, pb)));
        let image = BaseImage::new(a.clone(), "img");
        prop_assert_eq!(image.supports(&b), a >= b);
    }

    #[test]
    fn different_major_never_supported(a in version_parts(), b in version_parts()) {
        prop_assume!((a.0, a.1) != (b.0, b.1));
        let image = BaseImage::new(v(&render(a)), "img");
        prop_assert!(!image.supports(&v(&render(b))));
    }

    #[test]
    fn parsed_table_is_sorted_descending(parts in proptest::collection::vec(version_parts(), 1..8)) {
        let entries: Vec<String> = parts
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}=img{i}", render(*p)))
            .collect();
        let table = VersionTable::parse(&entries).unwrap();
        prop_assert_eq!(table.len(), entries.len());
        for pair in table.entries().windows(2) {
            prop_assert!(pair[0].version() >= pair[1].version());
        }
    }

    #[test]
    fn resolution_is_first_supporting_entry(
        parts in proptest::collection::vec(version_parts(), 1..8),
        requested in version_parts(),
    ) {
        let entries: Vec<String> = parts
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{}=img{i}", render(*p)))
            .collect();
        let table = VersionTable::parse(&entries).unwrap();
        let requested = v(&render(requested));

        let expected = table.entries().iter().find(|e| e.supports(&requested));
        let resolved = table.get_base_image(&requested);
        prop_assert_eq!(resolved, expected);
        prop_assert_eq!(
            resolved.is_none(),
            table.entries().iter().all(|e| !e.supports(&requested))
        );
    }
}
