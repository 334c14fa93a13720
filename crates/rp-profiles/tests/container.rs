use proptest::prelude::*;
use rp_profiles::{NO_NAME, Profiles, ProfilesError};

fn sample_set() -> Profiles {
    let mut p = Profiles::new(Some("CASE"));
    p.set_vector("TIME", vec![0.0, 31.0, 59.0], None, None, Some("DAYS"))
        .unwrap();
    p.set_vector("WOPR", vec![100.0, 90.0, 80.0], Some("OP1"), Some(1), Some("SM3/D"))
        .unwrap();
    p.set_vector("WOPR", vec![50.0, 45.0, 40.0], Some("OP2"), Some(2), Some("SM3/D"))
        .unwrap();
    p.set_vector("GOPR", vec![150.0, 135.0, 120.0], Some("FIELDG"), None, Some("SM3/D"))
        .unwrap();
    p.set_vector("FOPR", vec![150.0, 135.0, 120.0], None, None, Some("SM3/D"))
        .unwrap();
    p
}

#[test]
fn lookup_by_keyword_name_and_num() {
    let p = sample_set();
    assert_eq!(p.get_vector("WOPR", None, None).unwrap().name(), "OP1");
    assert_eq!(p.get_vector("WOPR", Some("OP2"), None).unwrap().num(), 2);
    assert_eq!(p.get_vector(" WOPR ", None, Some(2)).unwrap().name(), "OP2");
    assert!(p.get_vector("WOPR", Some("OP1"), Some(2)).is_none());
    assert!(p.get_vector("WWPR", None, None).is_none());
    assert_eq!(p.vector(2).unwrap().name(), "OP2");
    assert_eq!(
        p.vector(9).unwrap_err(),
        ProfilesError::IndexOutOfRange { index: 9, len: 5 }
    );
}

#[test]
fn upsert_replaces_and_keeps_unit() {
    let mut p = sample_set();
    let before = p.vector_count();
    let idx = p
        .set_vector("WOPR", vec![1.0, 2.0, 3.0], Some("OP2"), Some(2), Some("STB/D"))
        .unwrap();
    assert_eq!(idx, 2);
    assert_eq!(p.vector_count(), before);
    let v = p.get_vector("WOPR", Some("OP2"), None).unwrap();
    assert_eq!(v.data(), &[1.0, 2.0, 3.0]);
    assert_eq!(v.unit(), "SM3/D");
}

#[test]
fn length_mismatch_is_rejected() {
    let mut p = sample_set();
    assert_eq!(
        p.set_vector("WWPR", vec![1.0], Some("OP1"), None, None)
            .unwrap_err(),
        ProfilesError::InconsistentLength {
            expected: 3,
            found: 1
        }
    );
    assert_eq!(
        p.append_tstep(&[1.0, 2.0]).unwrap_err(),
        ProfilesError::InconsistentLength {
            expected: 5,
            found: 2
        }
    );
    assert_eq!(p.step_count(), 3);
}

#[test]
fn append_and_cross_section() {
    let mut p = sample_set();
    assert_eq!(p.append_tstep(&[90.0, 70.0, 35.0, 105.0, 105.0]).unwrap(), 4);
    assert_eq!(p.get_step(3).unwrap(), vec![90.0, 70.0, 35.0, 105.0, 105.0]);
    assert_eq!(p.get_step(0).unwrap()[0], 0.0);
    assert!(matches!(
        p.get_step(4),
        Err(ProfilesError::IndexOutOfRange { index: 4, len: 4 })
    ));
}

#[test]
fn owner_name_sets() {
    let p = sample_set();
    assert_eq!(p.well_names(), vec!["OP1".to_string(), "OP2".to_string()]);
    assert_eq!(p.group_names(), vec!["FIELDG".to_string()]);
    assert_eq!(p.get_vector("FOPR", None, None).unwrap().name(), NO_NAME);
}

#[test]
fn metadata_lists_follow_vector_order() {
    let p = sample_set();
    assert_eq!(p.keywords(), vec!["TIME", "WOPR", "WOPR", "GOPR", "FOPR"]);
    assert_eq!(p.nums(), vec![0, 1, 2, 0, 0]);
    assert_eq!(p.units()[0], "DAYS");
    assert_eq!(p.names()[4], NO_NAME);
    assert_eq!(p.get_time().unwrap(), &[0.0, 31.0, 59.0]);
}

#[test]
fn serializes_to_json() {
    let p = sample_set();
    let json = serde_json::to_string(&p).unwrap();
    let back: Profiles = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}

proptest! {
    #[test]
    fn repeated_upsert_is_idempotent(
        data in prop::collection::vec(-1e6_f64..1e6, 1..30),
        repeats in 1_usize..5,
    ) {
        let mut p = Profiles::default();
        let mut first = None;
        for _ in 0..repeats {
            let idx = p.set_vector("WBHP", data.clone(), Some("P1"), Some(1), Some("BARS")).unwrap();
            first.get_or_insert(idx);
            prop_assert_eq!(Some(idx), first);
        }
        prop_assert_eq!(p.vector_count(), 1);
        prop_assert_eq!(p.step_count(), data.len());
        prop_assert_eq!(p.get_vector("WBHP", Some("P1"), Some(1)).unwrap().data(), &data[..]);
    }
}
