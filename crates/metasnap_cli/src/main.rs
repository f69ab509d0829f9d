//! Snapshot probe CLI.
//!
//! # Responsibility
//! - Render endpoint documents for a demo descriptor registry.
//! - Verify `metasnap_core` wiring without an HTTP layer.

use clap::{Parser, ValueEnum};
use log::info;
use metasnap_core::{
    init_logging, DescriptorKind, DescriptorRegistry, MapEnvironment, MetadataEndpoint,
    ProtocolConfig, ReferenceConfig, RegistryError, ServiceConfig, SnapshotConfig, TypeRef,
};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    All,
    Service,
    Reference,
    Protocol,
}

impl KindArg {
    fn descriptor_kind(self) -> Option<DescriptorKind> {
        match self {
            Self::All => None,
            Self::Service => Some(DescriptorKind::Service),
            Self::Reference => Some(DescriptorKind::Reference),
            Self::Protocol => Some(DescriptorKind::Protocol),
        }
    }
}

/// Print metadata snapshots of the demo descriptors as JSON.
#[derive(Debug, Parser)]
#[command(name = "metasnap", version)]
struct Cli {
    /// Descriptor family to render.
    #[arg(long, value_enum, default_value_t = KindArg::All)]
    kind: KindArg,

    /// Log level; overrides METASNAP_LOG_LEVEL.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute log directory; overrides METASNAP_LOG_DIR.
    #[arg(long)]
    log_dir: Option<String>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("metasnap: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, String> {
    let mut environment = MapEnvironment::from_process_env();
    if let Some(level) = &cli.log_level {
        environment.set_property(metasnap_core::config::LOG_LEVEL_KEY, level.as_str());
    }
    if let Some(dir) = &cli.log_dir {
        environment.set_property(metasnap_core::config::LOG_DIR_KEY, dir.as_str());
    }
    let config = SnapshotConfig::from_environment(&environment).map_err(|err| err.to_string())?;

    // Why: without a configured directory the probe stays silent instead of
    // guessing a writable location.
    if let Some(dir) = &config.log_dir {
        let dir = dir.to_string_lossy();
        init_logging(config.log_level, &dir).map_err(|err| err.to_string())?;
    }

    environment.merge(&demo_properties());
    let registry = demo_registry().map_err(|err| err.to_string())?;
    info!(
        "event=cli_render module=cli status=start kind={:?} instances={}",
        cli.kind,
        registry.len()
    );

    let endpoint = MetadataEndpoint::new(&registry, &environment).with_config(&config);
    let document = match cli.kind.descriptor_kind() {
        Some(kind) => endpoint.document_for_kind(kind),
        None => endpoint.document(),
    }
    .map_err(|err| err.to_string())?;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    rendered.map_err(|err| err.to_string())
}

trait DemoGreeter {}

fn demo_registry() -> Result<DescriptorRegistry, RegistryError> {
    let mut registry = DescriptorRegistry::new();

    let mut protocol = ProtocolConfig::new("dubbo");
    protocol.port = Some(20880);
    protocol.threads = Some(200);
    protocol.serialization = Some("hessian2".to_string());
    registry.register(DescriptorKind::Protocol, "dubbo", Arc::new(protocol))?;

    let mut service = ServiceConfig::new("com.example.DemoGreeter");
    service.interface_class = Some(TypeRef::of::<dyn DemoGreeter>());
    service.version = Some("1.0.0".to_string());
    service.timeout = Some(3000);
    service.protocols = vec!["dubbo".to_string()];
    service.methods = vec!["greet".to_string()];
    registry.register(
        DescriptorKind::Service,
        "ServiceBean:com.example.DemoGreeter:1.0.0",
        Arc::new(service),
    )?;

    let mut reference = ReferenceConfig::new("com.example.DemoGreeter");
    reference.version = Some("1.0.0".to_string());
    reference.check = Some(false);
    registry.register(
        DescriptorKind::Reference,
        "demoGreeterReference",
        Arc::new(reference),
    )?;

    Ok(registry)
}

fn demo_properties() -> MapEnvironment {
    [
        ("dubbo.application.name", "metasnap-demo"),
        ("dubbo.protocol.name", "dubbo"),
        ("dubbo.protocol.port", "20880"),
    ]
    .into_iter()
    .collect()
}
