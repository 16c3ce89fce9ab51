//! Parameter binding.
//!
//! Maps a [`Signature`] and caller-supplied [`Arguments`] to the concrete
//! argument list a body is called with. Each parameter is bound by the first
//! rule that applies:
//!
//! 1. an object-typed parameter takes the front argument if it is an instance
//!    of the declared class or of any class below it, and is resolved from the
//!    container otherwise;
//! 2. a positional call takes the next argument;
//! 3. a named call takes the argument under the parameter name, then under
//!    its `snake_case` form;
//! 4. a contextual value registered under `$name` is used (called first, if
//!    it is a closure);
//! 5. the declared default is used;
//! 6. binding fails with [`ResolveError::MissingParameter`].

use crate::container::Container;
use heck::ToSnakeCase;
use rivet_core::{Arguments, Param, ResolveError, Signature, Value};
use tracing::trace;

impl Container {
    /// Bind `signature` against `args`.
    ///
    /// `target` names the constructor, method or function being bound and
    /// only labels errors.
    pub fn bind_params(
        &self,
        signature: &Signature,
        mut args: Arguments,
        target: &str,
    ) -> Result<Vec<Value>, ResolveError> {
        let positional = args.is_positional();
        signature
            .params()
            .iter()
            .map(|param| self.bind_param(param, &mut args, positional, target))
            .collect()
    }

    fn bind_param(
        &self,
        param: &Param,
        args: &mut Arguments,
        positional: bool,
        target: &str,
    ) -> Result<Value, ResolveError> {
        let name = param.name();

        if let Some(class) = param.class_hint() {
            let supplied = args
                .front()
                .and_then(Value::as_instance)
                .is_some_and(|instance| self.is_instance_of(instance, class));
            if supplied {
                trace!(param = name, class, "Bound supplied instance");
                return Ok(args.shift().unwrap_or_default());
            }
            trace!(param = name, class, "Resolving parameter from container");
            return self.make(class);
        }

        if positional {
            if let Some(value) = args.shift() {
                trace!(param = name, "Bound positional argument");
                return Ok(value);
            }
        } else if let Some(value) = args
            .get(name)
            .or_else(|| args.get(&name.to_snake_case()))
        {
            trace!(param = name, "Bound named argument");
            return Ok(value.clone());
        }

        if let Some(contextual) = self.contextual_parameter(name) {
            trace!(param = name, "Bound contextual value");
            return self.resolve_contextual(contextual);
        }

        if let Some(default) = param.default_value() {
            trace!(param = name, "Bound default value");
            return Ok(default.clone());
        }

        Err(ResolveError::missing_parameter(name, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ClassFixture;
    use rivet_core::{ClassDescriptor, Instance};

    fn signature() -> Signature {
        Signature::new()
            .param(Param::new("userId").builtin("int"))
            .param(Param::new("label").builtin("string").default("none"))
    }

    #[test]
    fn positional_arguments_fill_in_order() {
        let container = Container::new();
        let bound = container
            .bind_params(&signature(), Arguments::positional([7i64]), "f()")
            .unwrap();
        assert_eq!(bound, [Value::Int(7), Value::from("none")]);
    }

    #[test]
    fn named_arguments_fall_back_to_snake_case() {
        let container = Container::new();
        let bound = container
            .bind_params(&signature(), Arguments::named([("user_id", 3i64)]), "f()")
            .unwrap();
        assert_eq!(bound[0], Value::Int(3));

        let bound = container
            .bind_params(
                &signature(),
                Arguments::named([("userId", 4i64), ("user_id", 5i64)]),
                "f()",
            )
            .unwrap();
        assert_eq!(bound[0], Value::Int(4));
    }

    #[test]
    fn missing_parameter_names_target() {
        let container = Container::new();
        let err = container
            .bind_params(&signature(), Arguments::new(), "Report::new()")
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::MissingParameter { ref parameter, ref target }
                if parameter == "userId" && target == "Report::new()"
        ));
    }

    #[test]
    fn contextual_value_beats_default() {
        let container = Container::new();
        container.when_unscoped().needs("$label").give("ctx");
        container.when_unscoped().needs("$userId").give_with(|_| Ok(Value::Int(9)));

        let bound = container
            .bind_params(&signature(), Arguments::new(), "f()")
            .unwrap();
        assert_eq!(bound, [Value::Int(9), Value::from("ctx")]);
    }

    #[test]
    fn supplied_instance_is_consumed_by_object_param() {
        let container = Container::new();
        container.register_class(ClassFixture::unit("Logger"));
        let signature = Signature::new()
            .param(Param::new("logger").class("Logger"))
            .param(Param::new("level").builtin("int").default(1i64));

        let logger = Instance::new("Logger", ());
        let bound = container
            .bind_params(
                &signature,
                Arguments::positional([Value::Object(logger.clone()), Value::Int(3)]),
                "f()",
            )
            .unwrap();
        assert!(bound[0].as_instance().unwrap().ptr_eq(&logger));
        assert_eq!(bound[1], Value::Int(3));
    }

    #[test]
    fn grandchild_instance_is_consumed_by_object_param() {
        let container = Container::new();
        container.register_class(ClassDescriptor::interface("Store"));
        container.register_class(ClassFixture::unit("BaseStore").implements("Store"));
        container.register_class(ClassFixture::unit("RedisStore").implements("BaseStore"));
        container.bind("Store", "BaseStore");
        let signature = Signature::new().param(Param::new("store").class("Store"));

        let built = container.make("RedisStore").unwrap();
        let redis = built.as_instance().unwrap().clone();
        assert!(redis.is_a("Store"));

        let bound = container
            .bind_params(&signature, Arguments::positional([built]), "f()")
            .unwrap();
        assert!(bound[0].as_instance().unwrap().ptr_eq(&redis));

        // A handle wrapped outside the container is checked against the type table.
        let bare = Instance::new("RedisStore", ());
        let bound = container
            .bind_params(
                &signature,
                Arguments::positional([Value::Object(bare.clone())]),
                "f()",
            )
            .unwrap();
        assert!(bound[0].as_instance().unwrap().ptr_eq(&bare));
    }

    #[test]
    fn object_param_ignores_same_named_scalar() {
        let container = Container::new();
        container.register_class(ClassFixture::unit("Logger"));
        let signature = Signature::new().param(Param::new("logger").class("Logger"));

        let bound = container
            .bind_params(&signature, Arguments::named([("logger", "stdout")]), "f()")
            .unwrap();
        assert_eq!(bound[0].as_instance().unwrap().class(), "Logger");
    }

    #[test]
    fn index_zero_makes_mixed_arguments_positional() {
        let container = Container::new();
        let signature = Signature::new().param(Param::new("x"));

        let args = Arguments::new().with_value("a").with("x", "b");
        assert!(args.is_positional());
        let bound = container.bind_params(&signature, args, "f()").unwrap();
        assert_eq!(bound, [Value::from("a")]);
    }

    #[test]
    fn non_matching_front_value_is_left_in_place() {
        let container = Container::new();
        container.register_class(ClassFixture::unit("Logger"));
        let signature = Signature::new()
            .param(Param::new("logger").class("Logger"))
            .param(Param::new("level").builtin("int"));

        let bound = container
            .bind_params(&signature, Arguments::positional([5i64]), "f()")
            .unwrap();
        assert_eq!(bound[0].as_instance().unwrap().class(), "Logger");
        assert_eq!(bound[1], Value::Int(5));
    }
}
