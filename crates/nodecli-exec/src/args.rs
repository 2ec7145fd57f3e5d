use std::fmt;

use crate::shell::{ExecOptions, ExecOutput};

pub type ExecCallback = Box<dyn FnOnce(ExecOutput) + Send + 'static>;

/// A value forwarded verbatim to the execution delegate.
pub enum PassthroughValue {
    Options(ExecOptions),
    Callback(ExecCallback),
    /// A string that followed the first non-string argument.
    Text(String),
}

impl PassthroughValue {
    pub fn callback<F>(callback: F) -> Self
    where
        F: FnOnce(ExecOutput) + Send + 'static,
    {
        Self::Callback(Box::new(callback))
    }
}

impl fmt::Debug for PassthroughValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(options) => f.debug_tuple("Options").field(options).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

#[derive(Debug)]
pub enum InvocationArg {
    Token(String),
    Passthrough(PassthroughValue),
}

impl InvocationArg {
    pub fn token(value: impl Into<String>) -> Self {
        Self::Token(value.into())
    }

    pub fn callback<F>(callback: F) -> Self
    where
        F: FnOnce(ExecOutput) + Send + 'static,
    {
        Self::Passthrough(PassthroughValue::callback(callback))
    }
}

impl From<&str> for InvocationArg {
    fn from(value: &str) -> Self {
        Self::Token(value.to_string())
    }
}

impl From<String> for InvocationArg {
    fn from(value: String) -> Self {
        Self::Token(value)
    }
}

impl From<ExecOptions> for InvocationArg {
    fn from(value: ExecOptions) -> Self {
        Self::Passthrough(PassthroughValue::Options(value))
    }
}

impl From<PassthroughValue> for InvocationArg {
    fn from(value: PassthroughValue) -> Self {
        Self::Passthrough(value)
    }
}

#[derive(Debug, Default)]
pub struct PartitionedArgs {
    pub tokens: Vec<String>,
    pub passthrough: Vec<PassthroughValue>,
}

/// Splits arguments at the first pass-through value.
///
/// Tokens seen after that point stay in the pass-through list as
/// [`PassthroughValue::Text`], in their original position.
pub fn partition_args<I>(args: I) -> PartitionedArgs
where
    I: IntoIterator<Item = InvocationArg>,
{
    let mut partitioned = PartitionedArgs::default();
    let mut args = args.into_iter();

    for arg in args.by_ref() {
        match arg {
            InvocationArg::Token(token) => partitioned.tokens.push(token),
            InvocationArg::Passthrough(value) => {
                partitioned.passthrough.push(value);
                break;
            }
        }
    }

    partitioned.passthrough.extend(args.map(|arg| match arg {
        InvocationArg::Token(text) => PassthroughValue::Text(text),
        InvocationArg::Passthrough(value) => value,
    }));
    partitioned
}

pub fn join_command(prefix: &str, tokens: &[String]) -> String {
    let mut command = prefix.to_string();
    for token in tokens {
        command.push(' ');
        command.push_str(token);
    }
    command
}
