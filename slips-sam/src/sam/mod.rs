//! Assembles the SAM template of the log-collection pipeline.
//!
//! Optional backend resources (streams, error table, dead letter topic and
//! roles) are resolved first: each one is either taken from the metadata or
//! created here under a fixed logical name. Functions and the dashboard are
//! built afterwards from those references.

pub mod arn;
pub mod dashboard;
pub mod functions;
pub mod reference;
pub mod resolve;
pub mod roles;
pub mod storage;
pub mod template;

use log::{debug, info};

use crate::config::{Lane, Metadata, RolePurpose};
use crate::errors::Result;
pub use reference::Reference;
pub use template::Template;

// Logical names
pub const EVENT_FAST_STREAM: &str = "EventFastStream";
pub const EVENT_SLOW_STREAM: &str = "EventSlowStream";
pub const ERROR_TABLE: &str = "ErrorTable";
pub const ERROR_NOTIFY: &str = "ErrorNotify";
pub const MAIN_FUNC_ROLE: &str = "MainFuncRole";
pub const REPORTER_ROLE: &str = "ReporterRole";
pub const DISPATCHER_ROLE: &str = "DispatcherRole";
pub const EVENT_PUSHER_ROLE: &str = "EventPusherRole";
pub const DRAIN_ROLE: &str = "DrainRole";
pub const EVENT_PUSHER: &str = "EventPusher";
pub const FAST_DISPATCHER: &str = "FastDispatcher";
pub const SLOW_DISPATCHER: &str = "SlowDispatcher";
pub const REPORTER: &str = "Reporter";
pub const DRAIN: &str = "Drain";
pub const MAIN_FUNC: &str = "MainFunc";
pub const SLIPS_DASHBOARD: &str = "SlipsDashboard";

/// Every logical name a template can hold, in the order resources are added.
pub const LOGICAL_NAMES: [&str; 16] = [
    EVENT_FAST_STREAM,
    EVENT_SLOW_STREAM,
    ERROR_TABLE,
    ERROR_NOTIFY,
    MAIN_FUNC_ROLE,
    REPORTER_ROLE,
    DISPATCHER_ROLE,
    EVENT_PUSHER_ROLE,
    DRAIN_ROLE,
    EVENT_PUSHER,
    FAST_DISPATCHER,
    SLOW_DISPATCHER,
    REPORTER,
    DRAIN,
    MAIN_FUNC,
    SLIPS_DASHBOARD,
];

pub fn stream_logical_name(lane: Lane) -> &'static str {
    match lane {
        Lane::Fast => EVENT_FAST_STREAM,
        Lane::Slow => EVENT_SLOW_STREAM,
    }
}

pub fn role_logical_name(purpose: RolePurpose) -> &'static str {
    match purpose {
        RolePurpose::Reporter => REPORTER_ROLE,
        RolePurpose::Dispatcher => DISPATCHER_ROLE,
        RolePurpose::EventPusher => EVENT_PUSHER_ROLE,
        RolePurpose::Drain => DRAIN_ROLE,
    }
}

/// Builds the template for `metadata` with every function pointing at the
/// packaged code in `code_uri`.
pub fn build(metadata: &Metadata, code_uri: &str) -> Result<Template> {
    info!("Building template for stack {}", metadata.stack_name);

    let backend = &metadata.backend;
    let mut template = Template::default();
    if let Some(description) = &metadata.description {
        template.description = description.clone();
    }
    let resources = &mut template.resources;

    let fast = resolve::stream(backend.stream_arn(Lane::Fast), stream_logical_name(Lane::Fast))?
        .place(resources);
    let slow = resolve::stream(backend.stream_arn(Lane::Slow), stream_logical_name(Lane::Slow))?
        .place(resources);
    let streams = [&fast.arn, &slow.arn];

    let table = resolve::table(backend.dynamodb_arn.as_deref(), ERROR_TABLE)?.place(resources);
    let topic = resolve::topic(backend.dlq_sns_arn.as_ref(), ERROR_NOTIFY)?.place(resources);

    let main_role = resolve::role(metadata.handler.role_arn.as_ref(), MAIN_FUNC_ROLE, || {
        roles::main_func_role(&metadata.bucket_mapping, &topic)
    })?
    .place(resources);

    let role_for = |purpose: RolePurpose| backend.role_arn.get(purpose);
    let reporter_role = resolve::role(
        role_for(RolePurpose::Reporter),
        role_logical_name(RolePurpose::Reporter),
        || roles::reporter_role(&table.arn),
    )?
    .place(resources);
    let dispatcher_role = resolve::role(
        role_for(RolePurpose::Dispatcher),
        role_logical_name(RolePurpose::Dispatcher),
        || roles::dispatcher_role(&streams),
    )?
    .place(resources);
    let event_pusher_role = resolve::role(
        role_for(RolePurpose::EventPusher),
        role_logical_name(RolePurpose::EventPusher),
        || roles::event_pusher_role(&streams),
    )?
    .place(resources);
    let drain_role = resolve::role(
        role_for(RolePurpose::Drain),
        role_logical_name(RolePurpose::Drain),
        || roles::drain_role(&table.arn, &streams),
    )?
    .place(resources);

    debug!("Building functions from {code_uri}");
    resources.insert(
        String::from(EVENT_PUSHER),
        functions::event_pusher(
            code_uri,
            &metadata.routing,
            &backend.sns_topics,
            &fast.name,
            &slow.name,
            &event_pusher_role,
        )?,
    );
    resources.insert(
        String::from(FAST_DISPATCHER),
        functions::dispatcher(code_uri, backend.lane.get(Lane::Fast), &fast.arn, &dispatcher_role),
    );
    resources.insert(
        String::from(SLOW_DISPATCHER),
        functions::dispatcher(code_uri, backend.lane.get(Lane::Slow), &slow.arn, &dispatcher_role),
    );
    resources.insert(
        String::from(REPORTER),
        functions::reporter(code_uri, &topic, &table.name, &reporter_role),
    );
    resources.insert(
        String::from(DRAIN),
        functions::drain(code_uri, &table.name, &drain_role),
    );
    resources.insert(
        String::from(MAIN_FUNC),
        functions::main_func(
            code_uri,
            &metadata.bucket_mapping,
            &metadata.handler,
            &topic,
            &main_role,
        )?,
    );
    resources.insert(
        String::from(SLIPS_DASHBOARD),
        dashboard::dashboard(&metadata.stack_name)?,
    );

    info!("Template holds {} resources", template.resources.len());
    Ok(template)
}

/// [`build`] followed by YAML serialization.
pub fn render(metadata: &Metadata, code_uri: &str) -> Result<String> {
    build(metadata, code_uri)?.to_yaml()
}
