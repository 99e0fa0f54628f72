//! Handler descriptors and the specs hosts build them from
//!
//! A handler is any `FnMut(&[String]) -> HandlerResult`. Commands also carry
//! the parameter names and defaults the host declares for them; the shell
//! never coerces arguments, it only keeps this map for introspection.

use std::fmt;

use crate::error::{HandlerResult, ShellError};

pub const NO_DESCRIPTION: &str = "No description";

/// Boxed handler stored in the registry
pub type Handler = Box<dyn FnMut(&[String]) -> HandlerResult>;

/// A declared parameter and its default, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub default: Option<String>,
}

impl Param {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }
}

pub struct HandlerDescriptor {
    name: String,
    description: String,
    handler: Handler,
    parameters: Vec<Param>,
}

impl HandlerDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Handler,
        parameters: Vec<Param>,
    ) -> Self {
        let mut description = description.into();
        if description.is_empty() {
            description = NO_DESCRIPTION.to_string();
        }
        Self {
            name: name.into(),
            description,
            handler,
            parameters,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Declared parameters, in declaration order
    pub fn parameters(&self) -> &[Param] {
        &self.parameters
    }

    /// `None` when the parameter is unknown, `Some(None)` when it has no default
    pub fn default_of(&self, param: &str) -> Option<Option<&str>> {
        self.parameters
            .iter()
            .find(|p| p.name == param)
            .map(|p| p.default.as_deref())
    }

    pub fn invoke(&mut self, args: &[String]) -> HandlerResult {
        (self.handler)(args)
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

/// Last path segment of a handler's type name.
///
/// `fn` items carry their path (`my_app::greet` gives `greet`); closures do
/// not have a usable identifier and yield `None`.
fn identifier_of<F>() -> Option<String> {
    let full = std::any::type_name::<F>();
    let last = full.rsplit("::").next()?;
    if last.is_empty() || last.contains(['{', '}', '<', '>', ' ']) {
        return None;
    }
    Some(last.to_string())
}

fn resolve_name(
    explicit: String,
    identifier: Option<&str>,
    type_name: &str,
) -> Result<String, ShellError> {
    if !explicit.is_empty() {
        return Ok(explicit);
    }
    identifier
        .map(str::to_string)
        .ok_or_else(|| ShellError::MissingName(type_name.to_string()))
}

/// Everything needed to register a command
pub struct CommandSpec {
    name: String,
    description: String,
    disabled: bool,
    parameters: Vec<Param>,
    handler: Handler,
    identifier: Option<String>,
    type_name: &'static str,
}

impl CommandSpec {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&[String]) -> HandlerResult + 'static,
    {
        Self {
            name: String::new(),
            description: String::new(),
            disabled: false,
            parameters: Vec::new(),
            handler: Box::new(handler),
            identifier: identifier_of::<F>(),
            type_name: std::any::type_name::<F>(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Declare a parameter without a default
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Param::required(name));
        self
    }

    pub fn param_default(mut self, name: impl Into<String>, default: impl Into<String>) -> Self {
        self.parameters.push(Param::with_default(name, default));
        self
    }

    pub(crate) fn into_descriptor(self) -> Result<(HandlerDescriptor, bool), ShellError> {
        let name = resolve_name(self.name, self.identifier.as_deref(), self.type_name)?;
        let descriptor =
            HandlerDescriptor::new(name, self.description, self.handler, self.parameters);
        Ok((descriptor, self.disabled))
    }
}

/// Everything needed to register an event handler
pub struct EventSpec {
    name: String,
    disabled: bool,
    handler: Handler,
    identifier: Option<String>,
    type_name: &'static str,
}

impl EventSpec {
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&[String]) -> HandlerResult + 'static,
    {
        Self {
            name: String::new(),
            disabled: false,
            handler: Box::new(handler),
            identifier: identifier_of::<F>(),
            type_name: std::any::type_name::<F>(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub(crate) fn into_descriptor(self) -> Result<(HandlerDescriptor, bool), ShellError> {
        let name = resolve_name(self.name, self.identifier.as_deref(), self.type_name)?;
        let descriptor = HandlerDescriptor::new(name, "", self.handler, Vec::new());
        Ok((descriptor, self.disabled))
    }
}
