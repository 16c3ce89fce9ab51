//! Integration tests for building object graphs.

mod common;

use common::{LOGGER, MAILER, Mailer, SMTP, SmtpTransport, TRANSPORT, mail_container};
use rivet::{Arguments, Concrete, Container, Instance, ResolveError, Value, args};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

#[test]
fn test_builds_nested_graph() {
    let container = mail_container();
    container
        .when(MAILER)
        .needs("$fromAddress")
        .give("noreply@example.com");

    let mailer = container.make_as::<Mailer>(MAILER).unwrap();
    assert_eq!(mailer.from, "noreply@example.com");
    assert_eq!(mailer.transport().host, "localhost");
    assert_eq!(mailer.transport.class(), SMTP);
    assert!(mailer.transport.is_a(TRANSPORT));
    assert_eq!(mailer.logger.class(), LOGGER);
    assert_eq!(container.build_stack_len(), 0);
}

#[test]
fn test_singleton_identity() {
    let container = mail_container();
    let calls = Arc::new(AtomicUsize::new(0));
    container.singleton(
        TRANSPORT,
        Concrete::factory(common::counting_transport_factory(calls.clone())),
    );

    let a = container.make(TRANSPORT).unwrap();
    let b = container.make(TRANSPORT).unwrap();
    assert_eq!(a, b);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_transient_builds_fresh_objects() {
    let container = mail_container();
    let a = container.make(SMTP).unwrap();
    let b = container.make(SMTP).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_override_arguments_reach_the_constructor() {
    let container = mail_container();

    let named = container
        .resolve(SMTP, args! { "host" => "mail.example.com" })
        .unwrap();
    let smtp = named.as_instance().unwrap().downcast_ref::<SmtpTransport>().unwrap();
    assert_eq!((smtp.host.as_str(), smtp.port), ("mail.example.com", 25));

    let positional = container.resolve(SMTP, args!["relay", 587]).unwrap();
    let smtp = positional
        .as_instance()
        .unwrap()
        .downcast_ref::<SmtpTransport>()
        .unwrap();
    assert_eq!((smtp.host.as_str(), smtp.port), ("relay", 587));
}

#[test]
fn test_arguments_forward_through_binding_chain() {
    let container = mail_container();
    let value = container
        .resolve(TRANSPORT, args! { "port" => 465 })
        .unwrap();
    let smtp = value.as_instance().unwrap().downcast_ref::<SmtpTransport>().unwrap();
    assert_eq!(smtp.port, 465);
}

#[test]
fn test_supplied_object_is_used_for_class_param() {
    let container = mail_container();
    container.when(MAILER).needs("$fromAddress").give("a@b.c");

    let custom = Instance::from_arc(
        "Test\\FakeTransport",
        vec![TRANSPORT.into()],
        Arc::new(SmtpTransport {
            host: "fake".to_owned(),
            port: 0,
        }),
    );
    let mailer = container
        .resolve(MAILER, Arguments::positional([custom.clone()]))
        .unwrap();
    let mailer = mailer.as_instance().unwrap().downcast_ref::<Mailer>().unwrap();
    assert!(mailer.transport.ptr_eq(&custom));
}

#[test]
fn test_missing_scalar_parameter() {
    let container = mail_container();
    let err = container.make(MAILER).unwrap_err();
    match err {
        ResolveError::MissingParameter { parameter, target } => {
            assert_eq!(parameter, "fromAddress");
            assert_eq!(target, format!("{MAILER}::new()"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(container.build_stack_len(), 0);
}

#[test]
fn test_nested_missing_parameter_unwinds_build_stack() {
    let container = mail_container();
    container.register_class(
        rivet::ClassDescriptor::concrete("App\\Mail\\Newsletter").constructor(
            rivet::Signature::new().param(rivet::Param::new("mailer").class(MAILER)),
            |_| Ok(()),
        ),
    );
    assert_eq!(container.build_stack_len(), 0);

    let err = container.make("App\\Mail\\Newsletter").unwrap_err();
    assert!(matches!(
        err,
        ResolveError::MissingParameter { ref parameter, .. } if parameter == "fromAddress"
    ));
    assert_eq!(container.build_stack_len(), 0);

    // A later unrelated failure reports only its own build path.
    match container.make("App\\Missing").unwrap_err() {
        ResolveError::NotInstantiable { building, .. } => assert!(building.is_empty()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unbound_interface_fails() {
    let container = mail_container();
    container.flush();

    container.when(MAILER).needs("$fromAddress").give("x");
    let err = container.make(MAILER).unwrap_err();
    match err {
        ResolveError::NotInstantiable { target, building } => {
            assert_eq!(target, TRANSPORT);
            assert_eq!(building, [MAILER]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_type_contextual_override_is_scoped() {
    let container = mail_container();
    container.register_class(
        rivet::ClassDescriptor::concrete("App\\Mail\\LogTransport")
            .implements(TRANSPORT)
            .constructor(rivet::Signature::new(), |_| Ok(())),
    );
    container
        .when(MAILER)
        .needs(TRANSPORT)
        .give_class("App\\Mail\\LogTransport");
    container.when(MAILER).needs("$fromAddress").give("x");

    let mailer = container.make_as::<Mailer>(MAILER).unwrap();
    assert_eq!(mailer.transport.class(), "App\\Mail\\LogTransport");

    // Outside the mailer, the ordinary binding applies.
    let direct = container.make(TRANSPORT).unwrap();
    assert_eq!(direct.as_instance().unwrap().class(), SMTP);
}

#[test]
fn test_make_as_type_mismatch() {
    let container = mail_container();
    container.instance("answer", 42i64);
    assert_eq!(container.make("answer").unwrap(), Value::Int(42));
    assert!(matches!(
        container.make_as::<SmtpTransport>("answer"),
        Err(ResolveError::TypeMismatch { .. })
    ));
}

#[test]
fn test_installed_container_is_current() {
    let container = Container::install();
    container.instance("greeting", "hello");

    assert_eq!(
        Container::pull("greeting", Arguments::new()).unwrap(),
        Value::from("hello")
    );
    let resolved = container.make_as::<Container>("app").unwrap();
    assert!(resolved.ptr_eq(&container));
    assert!(container.make_as::<Container>(rivet::CONTAINER_INTERFACE).is_ok());
}
