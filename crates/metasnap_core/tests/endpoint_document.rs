use chrono::{TimeZone, Utc};
use metasnap_core::{
    DescriptorKind, DescriptorRegistry, EndpointError, MapEnvironment, MetadataEndpoint,
    ProtocolConfig, ReferenceConfig, ServiceConfig, SnapshotConfig, TypeRef,
};
use serde_json::json;
use std::sync::Arc;
use url::Url;

trait GreetingService {}

fn populated_registry() -> DescriptorRegistry {
    let mut registry = DescriptorRegistry::new();

    let mut protocol = ProtocolConfig::new("dubbo");
    protocol.port = Some(20880);
    protocol.serialization = Some("hessian2".to_string());
    registry
        .register(DescriptorKind::Protocol, "dubbo", Arc::new(protocol))
        .unwrap();

    let mut service = ServiceConfig::new("com.example.GreetingService");
    service.interface_class = Some(TypeRef::of::<dyn GreetingService>());
    service.version = Some("1.0.0".to_string());
    service.timeout = Some(3000);
    service.exported_url =
        Some(Url::parse("dubbo://10.0.0.5:20880/com.example.GreetingService").unwrap());
    service.exported_at = Some(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap());
    service.protocols = vec!["dubbo".to_string()];
    registry
        .register(
            DescriptorKind::Service,
            "ServiceBean:com.example.GreetingService:1.0.0",
            Arc::new(service),
        )
        .unwrap();

    let mut reference = ReferenceConfig::new("com.example.GreetingService");
    reference.check = Some(false);
    reference.url = Some(Url::parse("dubbo://127.0.0.1:20880").unwrap());
    registry
        .register(DescriptorKind::Reference, "greetingClient", Arc::new(reference))
        .unwrap();

    registry
}

fn environment() -> MapEnvironment {
    [
        ("dubbo.application.name", "greeting-provider"),
        ("dubbo.registry.address", "zookeeper://127.0.0.1:2181"),
        ("server.port", "8080"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn service_section_contains_only_scalar_properties() {
    let registry = populated_registry();
    let endpoint = MetadataEndpoint::new(&registry, environment());

    let services = endpoint.document_for_kind(DescriptorKind::Service).unwrap();
    let service = &services["ServiceBean:com.example.GreetingService:1.0.0"];
    assert_eq!(service["interface"], json!("com.example.GreetingService"));
    assert_eq!(service["version"], json!("1.0.0"));
    assert_eq!(service["timeout"], json!(3000));
    assert_eq!(service["group"], json!(null));
    assert_eq!(service["exported"], json!(true));
    assert_eq!(
        service["exportedUrl"],
        json!("dubbo://10.0.0.5:20880/com.example.GreetingService")
    );
    assert_eq!(service["exportedAt"], json!("2024-05-06T07:08:09.000Z"));
    assert!(service["interfaceClass"]
        .as_str()
        .unwrap()
        .ends_with("GreetingService"));
    assert!(service.get("protocols").is_none());
    assert!(service.get("methods").is_none());
}

#[test]
fn full_document_lists_sections_and_prefixed_properties() {
    let registry = populated_registry();
    let endpoint = MetadataEndpoint::new(&registry, environment());
    let document = endpoint.document().unwrap();

    assert_eq!(document["protocols"]["dubbo"]["serialization"], json!("hessian2"));
    assert_eq!(document["references"]["greetingClient"]["check"], json!(false));
    assert_eq!(
        document["properties"],
        json!({
            "dubbo.application.name": "greeting-provider",
            "dubbo.registry.address": "zookeeper://127.0.0.1:2181"
        })
    );
}

#[test]
fn empty_registry_yields_empty_sections() {
    let registry = DescriptorRegistry::new();
    let endpoint = MetadataEndpoint::new(&registry, MapEnvironment::new());
    let document = endpoint.document().unwrap();

    for section in ["services", "references", "protocols", "properties"] {
        assert_eq!(document[section], json!({}), "section {section}");
    }
}

#[test]
fn config_loaded_from_environment_sets_property_prefix() {
    let registry = populated_registry();
    let mut environment = environment();
    environment.set_property("METASNAP_PROPERTY_PREFIX", "server.");
    let config = SnapshotConfig::from_environment(&environment).unwrap();

    let endpoint = MetadataEndpoint::new(&registry, environment).with_config(&config);
    assert_eq!(
        serde_json::to_value(endpoint.properties()).unwrap(),
        json!({"server.port": "8080"})
    );
}

#[test]
fn broken_descriptor_reports_instance_name() {
    let mut registry = populated_registry();
    registry
        .register(
            DescriptorKind::Protocol,
            "unnamed",
            Arc::new(ProtocolConfig::default()),
        )
        .unwrap();
    let endpoint = MetadataEndpoint::new(&registry, environment());

    let err = endpoint.document().unwrap_err();
    match &err {
        EndpointError::Introspection { kind, instance, .. } => {
            assert_eq!(*kind, DescriptorKind::Protocol);
            assert_eq!(instance, "unnamed");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("protocol `unnamed`"));
}
