use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_resolve_external_creates_nothing() {
    let resolution = resolve(
        Some(&json!("arn:aws:sns:us-east-1:123:dlq")),
        "ErrorNotify",
        || panic!("an external resource must not be synthesized"),
        |arn| Ok(Reference::External(arn.clone())),
        |name| Reference::Ref(name.to_string()),
    )
    .unwrap();

    assert!(!resolution.is_managed());
    assert_eq!(
        Reference::external("arn:aws:sns:us-east-1:123:dlq"),
        resolution.value
    );

    let mut resources = IndexMap::new();
    resolution.place(&mut resources);
    assert!(resources.is_empty());
}

#[test]
fn test_resolve_managed_places_definition() {
    let resolution = topic(None, "ErrorNotify").unwrap();

    assert!(resolution.is_managed());
    assert_eq!(Reference::Ref(String::from("ErrorNotify")), resolution.value);

    let mut resources = IndexMap::new();
    let value = resolution.place(&mut resources);
    assert_eq!(Reference::Ref(String::from("ErrorNotify")), value);
    assert_eq!(
        Some(&json!({ "Type": "AWS::SNS::Topic" })),
        resources.get("ErrorNotify")
    );
}

#[test]
fn test_stream_external_derives_name() {
    let arn = "arn:aws:kinesis:ap-northeast-1:123456789012:stream/slips-fast";
    let resolution = stream(Some(arn), "EventFastStream").unwrap();

    assert_eq!(None, resolution.definition);
    assert_eq!(Reference::external(arn), resolution.value.arn);
    assert_eq!(
        Reference::external("slips-fast"),
        resolution.value.name
    );
}

#[test]
fn test_stream_managed_references() {
    let resolution = stream(None, "EventSlowStream").unwrap();

    assert_eq!(Some(storage::kinesis_stream()), resolution.definition);
    assert_eq!(
        json!({ "Fn::GetAtt": "EventSlowStream.Arn" }),
        serde_json::to_value(&resolution.value.arn).unwrap()
    );
    assert_eq!(
        json!({ "Fn::Sub": "${EventSlowStream}" }),
        serde_json::to_value(&resolution.value.name).unwrap()
    );
}

#[test]
fn test_stream_malformed_arn() {
    assert!(matches!(
        stream(Some("not-an-arn"), "EventFastStream"),
        Err(crate::errors::Error::InvalidArn(_))
    ));
}

#[test]
fn test_table_external_and_managed() {
    let external = table(Some("arn:aws:dynamodb:us-east-1:123:table/MyTable"), "ErrorTable").unwrap();
    assert_eq!(Reference::external("MyTable"), external.value.name);
    assert!(!external.is_managed());

    let managed = table(None, "ErrorTable").unwrap();
    assert_eq!(Some(storage::error_table()), managed.definition);
    assert_eq!(Reference::name_of("ErrorTable"), managed.value.name);
    assert_eq!(Reference::arn_of("ErrorTable"), managed.value.arn);
}

#[test]
fn test_role_uses_given_synthesis() {
    let managed = role(None, "DrainRole", || json!({ "Type": "AWS::IAM::Role" })).unwrap();
    assert_eq!(Some(json!({ "Type": "AWS::IAM::Role" })), managed.definition);
    assert_eq!(
        json!({ "Fn::GetAtt": "DrainRole.Arn" }),
        serde_json::to_value(&managed.value).unwrap()
    );

    let arn = json!("arn:aws:iam::123:role/drain");
    let external = role(Some(&arn), "DrainRole", || {
        panic!("an external role must not be synthesized")
    })
    .unwrap();
    assert_eq!(
        json!("arn:aws:iam::123:role/drain"),
        serde_json::to_value(&external.value).unwrap()
    );
}

#[test]
fn test_topic_and_role_pass_intrinsics_through() {
    let import = json!({ "Fn::ImportValue": "shared-dlq" });
    let external = topic(Some(&import), "ErrorNotify").unwrap();

    assert!(!external.is_managed());
    assert_eq!(import, serde_json::to_value(&external.value).unwrap());

    let import = json!({ "Fn::ImportValue": "shared-drain-role" });
    let external = role(Some(&import), "DrainRole", || {
        panic!("an external role must not be synthesized")
    })
    .unwrap();
    assert_eq!(import, serde_json::to_value(&external.value).unwrap());
}
