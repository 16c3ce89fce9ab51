#![allow(dead_code)]

use rivet::{
    ClassDescriptor, Container, Instance, MethodDescriptor, Param, Signature, Value,
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Tracing
// ============================================================================

/// Install a test subscriber once. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Test Classes
// ============================================================================

pub const TRANSPORT: &str = "App\\Contracts\\Transport";
pub const SMTP: &str = "App\\Mail\\SmtpTransport";
pub const LOGGER: &str = "App\\Log\\Logger";
pub const MAILER: &str = "App\\Mail\\Mailer";

#[derive(Debug)]
pub struct SmtpTransport {
    pub host: String,
    pub port: i64,
}

#[derive(Debug, Default)]
pub struct Logger {
    pub lines: Mutex<Vec<String>>,
}

impl Logger {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

pub struct Mailer {
    pub transport: Instance,
    pub logger: Instance,
    pub from: String,
}

impl Mailer {
    pub fn transport(&self) -> &SmtpTransport {
        self.transport
            .downcast_ref::<SmtpTransport>()
            .expect("smtp transport")
    }
}

pub fn transport_interface() -> ClassDescriptor {
    ClassDescriptor::interface(TRANSPORT)
}

pub fn smtp_transport() -> ClassDescriptor {
    ClassDescriptor::concrete(SMTP).implements(TRANSPORT).constructor(
        Signature::new()
            .param(Param::new("host").builtin("string").default("localhost"))
            .param(Param::new("port").builtin("int").default(25i64)),
        |mut args| {
            Ok(SmtpTransport {
                host: args.take("host")?,
                port: args.take("port")?,
            })
        },
    )
}

pub fn logger() -> ClassDescriptor {
    ClassDescriptor::concrete(LOGGER)
        .constructor(Signature::new(), |_| Ok(Logger::default()))
        .method(MethodDescriptor::new(
            "log",
            Signature::new().param(Param::new("line").builtin("string")),
            |this, mut args| {
                let logger = this
                    .and_then(Instance::downcast_ref::<Logger>)
                    .ok_or("log called without a logger")?;
                let line: String = args.take("line")?;
                logger.lines.lock().map_err(|_| "poisoned")?.push(line);
                Ok(Value::Null)
            },
        ))
}

pub fn mailer() -> ClassDescriptor {
    ClassDescriptor::concrete(MAILER)
        .constructor(
            Signature::new()
                .param(Param::new("transport").class(TRANSPORT))
                .param(Param::new("logger").class(LOGGER))
                .param(Param::new("fromAddress").builtin("string")),
            |mut args| {
                Ok(Mailer {
                    transport: args.take("transport")?,
                    logger: args.take("logger")?,
                    from: args.take("fromAddress")?,
                })
            },
        )
        .method(MethodDescriptor::new(
            "send",
            Signature::new()
                .param(Param::new("to").builtin("string"))
                .param(Param::new("subject").builtin("string").default("(none)")),
            |this, mut args| {
                let mailer = this
                    .and_then(Instance::downcast_ref::<Mailer>)
                    .ok_or("send called without a mailer")?;
                let to: String = args.take("to")?;
                let subject: String = args.take("subject")?;
                Ok(Value::Str(format!("{} -> {to}: {subject}", mailer.from)))
            },
        ))
}

/// A container with the mail classes registered and the transport bound.
pub fn mail_container() -> Container {
    init_tracing();
    let container = Container::new();
    container.register_class(transport_interface());
    container.register_class(smtp_transport());
    container.register_class(logger());
    container.register_class(mailer());
    container.bind(TRANSPORT, SMTP);
    container
}

/// A factory that counts its invocations and builds a fresh transport each time.
pub fn counting_transport_factory(
    calls: Arc<AtomicUsize>,
) -> impl Fn(&Container, &rivet::Arguments) -> Result<Value, rivet::ResolveError> + Send + Sync + 'static
{
    move |_, _| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Object(Instance::from_arc(
            SMTP,
            vec![TRANSPORT.into()],
            Arc::new(SmtpTransport {
                host: "factory".to_owned(),
                port: 2525,
            }),
        )))
    }
}
