//! Integration tests for the named event table.

mod common;

use common::{LOGGER, Logger, mail_container};
use rivet::{
    Arguments, Callable, EventError, Param, ResolveError, Signature, Value, args,
    testing::RecordingCallable,
};

#[test]
fn test_handler_dependencies_are_resolved() {
    let container = mail_container();
    container.singleton_self(LOGGER);
    container.add_event_listener(
        "response.sent",
        Callable::new(
            "log_response",
            Signature::new()
                .param(Param::new("logger").class(LOGGER))
                .param(Param::new("status").builtin("int")),
            |mut args| {
                let logger: rivet::Instance = args.take("logger")?;
                let status: i64 = args.take("status")?;
                logger
                    .downcast_ref::<Logger>()
                    .ok_or("not a logger")?
                    .lines
                    .lock()
                    .map_err(|_| "poisoned")?
                    .push(format!("sent {status}"));
                Ok(Value::Int(status))
            },
        ),
    );

    let result = container
        .dispatch_event(Some("response.sent"), args! { "status" => 200 })
        .unwrap();
    assert_eq!(result, Some(Value::Int(200)));

    let logger = container.make_as::<Logger>(LOGGER).unwrap();
    assert_eq!(logger.lines(), ["sent 200"]);
}

#[test]
fn test_broadcast_in_registration_order() {
    let container = mail_container();
    let booted = RecordingCallable::new("booted", Signature::new().param(Param::new("env")));
    let ready = RecordingCallable::new("ready", Signature::new().param(Param::new("env")));
    container.add_event_listener("booted", booted.callable());
    container.add_event_listener("ready", ready.callable());

    assert_eq!(
        container.dispatch_event(None, args!["test"]).unwrap(),
        None
    );
    assert_eq!(booted.calls(), [vec![Value::from("test")]]);
    assert_eq!(ready.calls(), [vec![Value::from("test")]]);
    assert_eq!(container.event_names(), ["booted", "ready"]);
}

#[test]
fn test_replacing_handler_keeps_single_slot() {
    let container = mail_container();
    let old = RecordingCallable::new("old", Signature::new());
    let new = RecordingCallable::new("new", Signature::new());
    container.add_event_listener("shutdown", old.callable());
    container.add_event_listener("shutdown", new.callable());

    container.dispatch_event(None, Arguments::new()).unwrap();
    assert_eq!(old.call_count(), 0);
    assert_eq!(new.call_count(), 1);
    assert_eq!(container.event_names().len(), 1);
}

#[test]
fn test_missing_event_is_not_found() {
    let container = mail_container();
    let err = container
        .dispatch_event(Some("never"), Arguments::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "event not exists: never");
}

#[test]
fn test_broadcast_stops_at_first_failure() {
    let container = mail_container();
    let after = RecordingCallable::new("after", Signature::new());
    container.add_event_listener(
        "failing",
        Callable::new("failing", Signature::new(), |_| Err("handler broke".into())),
    );
    container.add_event_listener("after", after.callable());

    let err = container.dispatch_event(None, Arguments::new()).unwrap_err();
    match err {
        EventError::Failed { event, source } => {
            assert_eq!(event, "failing");
            assert!(matches!(source, ResolveError::Invocation { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(after.call_count(), 0);
}

#[test]
fn test_removed_listener_is_gone() {
    let container = mail_container();
    let handler = RecordingCallable::returning("h", Signature::new(), Value::Bool(true));
    container.add_event_listener("tick", handler.callable());
    assert_eq!(
        container.dispatch_event(Some("tick"), Arguments::new()).unwrap(),
        Some(Value::Bool(true))
    );

    container.remove_event_listener("tick");
    assert!(!container.has_event_listener("tick"));
    assert!(matches!(
        container.dispatch_event(Some("tick"), Arguments::new()),
        Err(EventError::NotFound(_))
    ));
}
