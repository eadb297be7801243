use ontograph_core::{Polarity, RelationError, RelationSet, RelationType};

#[test]
fn test_by_code_accepts_code_description_formal_name_and_alias() {
    assert_eq!(RelationType::by_code("I").unwrap(), RelationType::IsA);
    assert_eq!(RelationType::by_code("Part of").unwrap(), RelationType::PartOf);
    assert_eq!(RelationType::by_code("occurs_in").unwrap(), RelationType::OccursIn);
    assert_eq!(RelationType::by_code("PR").unwrap(), RelationType::PositivelyRegulates);
    assert_eq!(RelationType::by_code("NR").unwrap(), RelationType::NegativelyRegulates);
    assert_eq!(RelationType::by_code("replaced_by").unwrap(), RelationType::ReplacedBy);
    assert_eq!(RelationType::by_code("?").unwrap(), RelationType::Undefined);
}

#[test]
fn test_by_code_rejects_unknown_token() {
    assert_eq!(
        RelationType::by_code("X"),
        Err(RelationError::UnknownRelation("X".to_string()))
    );
    // codes are case-sensitive
    assert!(RelationType::by_code("i").is_err());
}

#[test]
fn test_every_kind_round_trips_through_its_code() {
    for rt in RelationType::ALL {
        assert_eq!(RelationType::by_code(rt.code()).unwrap(), rt);
        assert_eq!(rt.code().chars().count(), 1);
    }
}

#[test]
fn test_polarity() {
    assert_eq!(RelationType::HasPart.polarity(), Polarity::Negative);
    assert_eq!(RelationType::IsA.polarity(), Polarity::Positive);
    assert_eq!(RelationType::CapableOf.polarity(), Polarity::Positive);
}

#[test]
fn test_parse_filter_string() {
    let set = RelationSet::parse("I=PO").unwrap();
    assert_eq!(set.len(), 4);
    assert!(set.contains(RelationType::IsA));
    assert!(set.contains(RelationType::Identity));
    assert!(set.contains(RelationType::PartOf));
    assert!(set.contains(RelationType::OccursIn));
    assert!(!set.contains(RelationType::Regulates));
}

#[test]
fn test_parse_fails_on_any_unknown_character() {
    assert!(RelationSet::parse("I=PX").is_err());
    assert!("I P".parse::<RelationSet>().is_err());
    assert!(RelationSet::parse("").unwrap().is_empty());
}

#[test]
fn test_serializer_emits_fixed_order() {
    let set = RelationSet::parse("-+RUOP=I").unwrap();
    assert_eq!(set.to_codes(), "I=POR+-U");
}

#[test]
fn test_serializer_omits_kinds_outside_allow_list() {
    let set: RelationSet = [RelationType::IsA, RelationType::HasPart].into_iter().collect();
    assert_eq!(set.to_codes(), "I");

    let dropped = RelationSet::parse("H>~C<?").unwrap();
    assert_eq!(dropped.len(), 6);
    assert_eq!(dropped.to_codes(), "");
}

#[test]
fn test_of_type() {
    assert!(RelationType::PartOf.of_type(RelationType::Undefined));
    assert!(RelationType::Identity.of_type(RelationType::IsA));
    assert!(RelationType::PositivelyRegulates.of_type(RelationType::Regulates));
    assert!(RelationType::NegativelyRegulates.of_type(RelationType::Regulates));
    assert!(!RelationType::Regulates.of_type(RelationType::PositivelyRegulates));
    assert!(!RelationType::PartOf.of_type(RelationType::IsA));

    let slim = RelationSet::slim_default();
    assert!(RelationType::OccursIn.of_any_type(&slim));
    assert!(!RelationType::HasPart.of_any_type(&slim));
    assert!(!RelationType::IsA.of_any_type(&RelationSet::empty()));
}

#[test]
fn test_identity_is_neutral_in_composition() {
    for rt in RelationType::ALL.into_iter().filter(|rt| rt.is_ancestry()) {
        assert_eq!(RelationType::Identity.combine(rt), Some(rt));
        assert_eq!(rt.combine(RelationType::Identity), Some(rt));
    }
}

#[test]
fn test_transitive_compositions() {
    use RelationType::*;

    assert_eq!(IsA.combine(IsA), Some(IsA));
    assert_eq!(IsA.combine(PartOf), Some(PartOf));
    assert_eq!(PartOf.combine(IsA), Some(PartOf));
    assert_eq!(PartOf.combine(PartOf), Some(PartOf));
    assert_eq!(OccursIn.combine(PartOf), Some(OccursIn));
    assert_eq!(Regulates.combine(PartOf), Some(Regulates));
    assert_eq!(PositivelyRegulates.combine(PartOf), Some(Regulates));
    assert_eq!(PartOf.combine(Regulates), None);
    assert_eq!(PartOf.combine(OccursIn), None);
}

#[test]
fn test_signed_regulation_compositions() {
    use RelationType::*;

    assert_eq!(PositivelyRegulates.combine(PositivelyRegulates), Some(PositivelyRegulates));
    assert_eq!(NegativelyRegulates.combine(NegativelyRegulates), Some(PositivelyRegulates));
    assert_eq!(PositivelyRegulates.combine(NegativelyRegulates), Some(NegativelyRegulates));
    assert_eq!(NegativelyRegulates.combine(PositivelyRegulates), Some(NegativelyRegulates));
    assert_eq!(Regulates.combine(NegativelyRegulates), Some(Regulates));
    assert_eq!(PositivelyRegulates.combine(Regulates), Some(Regulates));
}

#[test]
fn test_non_propagating_compositions() {
    use RelationType::*;

    assert_eq!(HasPart.combine(IsA), None);
    assert_eq!(IsA.combine(HasPart), None);
    assert_eq!(HasPart.combine(HasPart), None);
    assert_eq!(ReplacedBy.combine(Identity), None);
    assert_eq!(Identity.combine(Consider), None);
    assert_eq!(Undefined.combine(IsA), None);
    assert_eq!(UsedIn.combine(PartOf), None);
    assert_eq!(CapableOf.combine(PositivelyRegulates), None);
    assert_eq!(NegativelyRegulates.combine(CapableOfPartOf), None);
}

#[test]
fn test_is_a_specializes_other_ancestry_kinds() {
    use RelationType::*;

    for rt in [UsedIn, CapableOf, CapableOfPartOf, OccursIn] {
        assert_eq!(IsA.combine(rt), Some(rt));
        assert_eq!(rt.combine(IsA), Some(rt));
    }
}

#[test]
fn test_display_and_serde_use_formal_name() {
    assert_eq!(RelationType::PartOf.to_string(), "part_of");
    assert_eq!(
        serde_json::to_string(&RelationType::NegativelyRegulates).unwrap(),
        "\"negatively_regulates\""
    );
    assert_eq!(
        serde_json::from_str::<RelationType>("\"equals\"").unwrap(),
        RelationType::Identity
    );
}
