//! Testing utilities for Rivet.
//!
//! This module provides helpers for testing code that registers classes and
//! handlers with a [`Container`](crate::Container).
//!
//! # Example
//!
//! ```rust
//! use rivet_std::testing::{ClassFixture, RecordingCallable};
//! use rivet_std::Container;
//! use rivet_core::{Arguments, Signature};
//!
//! let container = Container::new();
//! container.register_class(ClassFixture::unit("Clock"));
//!
//! let handler = RecordingCallable::new("on_tick", Signature::new());
//! container.add_event_listener("tick", handler.callable());
//! container.dispatch_event(Some("tick"), Arguments::new()).unwrap();
//! assert_eq!(handler.call_count(), 1);
//! ```

use parking_lot::Mutex;
use rivet_core::{Callable, ClassDescriptor, Signature, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A callable that records every bound argument list it receives.
#[derive(Clone)]
pub struct RecordingCallable {
    callable: Callable,
    calls: Arc<Mutex<Vec<Vec<Value>>>>,
}

impl RecordingCallable {
    /// A recorder with the given name and parameters. Returns `Null` when called.
    pub fn new(name: &str, signature: Signature) -> Self {
        Self::returning(name, signature, Value::Null)
    }

    /// A recorder that returns `result` when called.
    pub fn returning(name: &str, signature: Signature, result: Value) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();
        let callable = Callable::new(name, signature, move |mut args| {
            let mut values = Vec::with_capacity(args.remaining());
            while let Some(value) = args.next_value() {
                values.push(value);
            }
            recorded.lock().push(values);
            Ok(result.clone())
        });
        Self { callable, calls }
    }

    /// The callable to register.
    pub fn callable(&self) -> Callable {
        self.callable.clone()
    }

    /// Every argument list received so far, oldest first.
    pub fn calls(&self) -> Vec<Vec<Value>> {
        self.calls.lock().clone()
    }

    /// How many times the callable ran.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Forget recorded calls.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

/// Ready-made class descriptors.
pub struct ClassFixture;

impl ClassFixture {
    /// A concrete class whose constructor takes nothing and builds `()`.
    pub fn unit(name: &str) -> ClassDescriptor {
        Self::with_params(name, Signature::new())
    }

    /// A concrete class whose constructor takes `signature` and ignores the values.
    pub fn with_params(name: &str, signature: Signature) -> ClassDescriptor {
        ClassDescriptor::concrete(name).constructor(signature, |_| Ok(()))
    }

    /// A unit class that counts how often it is constructed.
    pub fn counting(name: &str) -> (ClassDescriptor, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let descriptor = ClassDescriptor::concrete(name).constructor(Signature::new(), move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        (descriptor, count)
    }
}
