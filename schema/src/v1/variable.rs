//! Primitive descriptors: typed input/output slots and parametrized formulas.

use crate::error::{ErrorKind, SchemaError};

/// Scalar type of a [`Variable`].
///
/// Integers are 64-bit and reals are double precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableType {
    /// A string input (e.g. a systematic variation name).
    String,
    /// An integer input (e.g. a decay mode).
    Int,
    /// A real input or output.
    Real,
}

impl VariableType {
    /// Wire literals accepted for the `type` field.
    pub const LITERALS: &'static [&'static str] = &["string", "int", "real"];

    /// Returns the wire literal of this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::String => "string",
            VariableType::Int => "int",
            VariableType::Real => "real",
        }
    }

    /// Parses a wire literal.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidLiteral`] for anything but `string`, `int`, `real`.
    pub fn from_literal(literal: &str) -> Result<Self, SchemaError> {
        match literal {
            "string" => Ok(VariableType::String),
            "int" => Ok(VariableType::Int),
            "real" => Ok(VariableType::Real),
            other => Err(SchemaError::new(ErrorKind::InvalidLiteral {
                found: other.to_owned(),
                allowed: Self::LITERALS,
            })),
        }
    }

    /// Whether values of this type can be compared against bin edges.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, VariableType::Int | VariableType::Real)
    }
}

/// A named, typed input or output slot of a correction.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Name, unique within the owning input list.
    pub name: String,
    /// Scalar type.
    pub type_: VariableType,
    /// Optional human-readable description.
    pub description: Option<String>,
}

impl Variable {
    /// Creates a variable without description.
    pub fn new(name: impl Into<String>, type_: VariableType) -> Self {
        Self {
            name: name.into(),
            type_,
            description: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The expression grammar a [`Formula`] is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaParser {
    /// C-like ternary/arithmetic grammar with positional placeholders
    /// (`x`, `y`, ... and `[0]`, `[1]`, ...).
    TFormula,
    /// Vectorized numeric-expression grammar.
    Numexpr,
}

impl FormulaParser {
    /// Wire literals accepted for the `parser` field.
    pub const LITERALS: &'static [&'static str] = &["TFormula", "numexpr"];

    /// Returns the wire literal of this grammar.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FormulaParser::TFormula => "TFormula",
            FormulaParser::Numexpr => "numexpr",
        }
    }

    /// Parses a wire literal.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidLiteral`] for anything but `TFormula`, `numexpr`.
    pub fn from_literal(literal: &str) -> Result<Self, SchemaError> {
        match literal {
            "TFormula" => Ok(FormulaParser::TFormula),
            "numexpr" => Ok(FormulaParser::Numexpr),
            other => Err(SchemaError::new(ErrorKind::InvalidLiteral {
                found: other.to_owned(),
                allowed: Self::LITERALS,
            })),
        }
    }
}

/// A parametrized sub-expression.
///
/// `parameters[k]` is an index into the enclosing `Correction::inputs()`: at
/// evaluation time the `k`-th placeholder of `expression` receives the value
/// of that input. The formula never names the enclosing scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    /// Expression text in the grammar selected by `parser`.
    pub expression: String,
    /// Grammar used to interpret `expression`.
    pub parser: FormulaParser,
    /// Positional bindings into the correction's inputs.
    pub parameters: Vec<usize>,
}

impl Formula {
    /// Creates a formula.
    pub fn new(expression: impl Into<String>, parser: FormulaParser, parameters: Vec<usize>) -> Self {
        Self {
            expression: expression.into(),
            parser,
            parameters,
        }
    }

    /// Resolves the positional parameters against evaluation arguments.
    ///
    /// `arguments` is ordered like the correction's inputs; the result holds
    /// one entry per parameter, in parameter order.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ParameterOutOfRange`] (located at
    /// `parameters[k]`) if an index points past the end of `arguments`.
    pub fn bind<'a, T>(&self, arguments: &'a [T]) -> Result<Vec<&'a T>, SchemaError> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(k, &index)| {
                arguments.get(index).ok_or_else(|| {
                    SchemaError::new(ErrorKind::ParameterOutOfRange {
                        index,
                        available: arguments.len(),
                    })
                    .in_index(k)
                    .in_field("parameters")
                })
            })
            .collect()
    }
}

/// The seam an external expression evaluator plugs into.
///
/// An engine receives a formula's expression text and the already-bound
/// parameter values (see [`Formula::bind`]), in parameter order.
pub trait ExpressionEngine {
    /// Error produced by the engine.
    type Error: std::error::Error;

    /// The grammar this engine interprets.
    fn parser(&self) -> FormulaParser;

    /// Evaluates `expression` with `parameters[k]` bound to placeholder `k`.
    ///
    /// # Errors
    ///
    /// Engine-specific: malformed expression, arity mismatch, and so on.
    fn evaluate(&self, expression: &str, parameters: &[f64]) -> Result<f64, Self::Error>;
}
