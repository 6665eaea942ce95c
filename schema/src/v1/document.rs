//! Document model: a single `Correction` and the versioned `CorrectionSet`.

use crate::error::{ErrorKind, SchemaError};
use crate::v1::content::{check_leaf, Content};
use crate::v1::variable::Variable;
use crate::v1::VERSION;

/// One named, versioned piecewise function.
///
/// `inputs` fixes the positional argument order used at evaluation time and
/// by `Formula::parameters`. Nothing checks that the names dispatched on in
/// `data` appear in `inputs`, or that formula parameters are in range.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction {
    name: String,
    description: Option<String>,
    version: i64,
    inputs: Vec<Variable>,
    output: Variable,
    data: Content,
}

impl Correction {
    /// Builds a correction.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NonFiniteNumber`] at `data` if the root is a
    /// non-finite constant. Deeper nodes were validated by their constructors.
    pub fn new(
        name: impl Into<String>,
        version: i64,
        inputs: Vec<Variable>,
        output: Variable,
        data: Content,
    ) -> Result<Self, SchemaError> {
        check_leaf(&data).map_err(|e| e.in_field("data"))?;
        Ok(Self {
            name: name.into(),
            description: None,
            version,
            inputs,
            output,
            data,
        })
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Name of the correction.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Detailed description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Version of this correction (independent of the schema version).
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Declared inputs, in evaluation argument order.
    #[must_use]
    pub fn inputs(&self) -> &[Variable] {
        &self.inputs
    }

    /// Declared output.
    #[must_use]
    pub fn output(&self) -> &Variable {
        &self.output
    }

    /// Root of the piecewise tree.
    #[must_use]
    pub fn data(&self) -> &Content {
        &self.data
    }

    /// Position of the input called `name` in the argument order.
    #[must_use]
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|v| v.name == name)
    }

    /// Shape overview of this correction.
    #[must_use]
    pub fn summary(&self) -> CorrectionSummary<'_> {
        CorrectionSummary {
            name: &self.name,
            version: self.version,
            inputs: &self.inputs,
            output: &self.output,
            node_count: self.data.node_count(),
            depth: self.data.depth(),
            inputs_used: self.data.inputs_used(),
        }
    }
}

/// Counts and names describing a correction's shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionSummary<'a> {
    /// Correction name.
    pub name: &'a str,
    /// Correction version.
    pub version: i64,
    /// Declared inputs.
    pub inputs: &'a [Variable],
    /// Declared output.
    pub output: &'a Variable,
    /// Nodes in the content tree.
    pub node_count: usize,
    /// Longest root-to-leaf path in nodes.
    pub depth: usize,
    /// Inputs dispatched on by the tree, in first-use order.
    pub inputs_used: Vec<&'a str>,
}

/// A versioned collection of corrections sharing schema version [`VERSION`].
///
/// Correction names are not required to be unique; [`CorrectionSet::get`]
/// returns the first match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrectionSet {
    corrections: Vec<Correction>,
}

impl CorrectionSet {
    /// Builds a set at this shape's schema version.
    #[must_use]
    pub fn new(corrections: Vec<Correction>) -> Self {
        Self { corrections }
    }

    /// Builds a set from a declared schema version.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::SchemaVersion`] at `schema_version` unless
    /// `schema_version == VERSION`, however well-formed `corrections` is.
    pub fn with_schema_version(
        schema_version: i64,
        corrections: Vec<Correction>,
    ) -> Result<Self, SchemaError> {
        check_schema_version(schema_version)?;
        Ok(Self::new(corrections))
    }

    /// Schema version of this document shape; always [`VERSION`].
    #[must_use]
    pub fn schema_version(&self) -> i64 {
        VERSION
    }

    /// All corrections, in document order.
    #[must_use]
    pub fn corrections(&self) -> &[Correction] {
        &self.corrections
    }

    /// First correction called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Correction> {
        self.corrections.iter().find(|c| c.name == name)
    }

    /// Consumes the set, returning its corrections.
    #[must_use]
    pub fn into_corrections(self) -> Vec<Correction> {
        self.corrections
    }
}

pub(crate) fn check_schema_version(found: i64) -> Result<(), SchemaError> {
    if found != VERSION {
        return Err(SchemaError::new(ErrorKind::SchemaVersion {
            expected: VERSION,
            found,
        })
        .in_field("schema_version"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v1::{Binning, VariableType};

    fn test_1d() -> Correction {
        Correction::new(
            "test_1D",
            0,
            vec![Variable::new("eta", VariableType::Real).with_description("tau eta")],
            Variable::new("weight", VariableType::Real),
            Binning::new("eta", vec![0.0, 1.1, 2.5], vec![0.0.into(), 1.0.into()])
                .unwrap()
                .into(),
        )
        .unwrap()
    }

    #[test]
    fn schema_version_is_constant() {
        let set = CorrectionSet::new(vec![test_1d()]);
        assert_eq!(set.schema_version(), 1);
        assert!(CorrectionSet::with_schema_version(1, vec![test_1d()]).is_ok());
    }

    #[test]
    fn schema_version_mismatch_fails_regardless_of_content() {
        let err = CorrectionSet::with_schema_version(2, vec![test_1d()]).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::SchemaVersion {
                expected: 1,
                found: 2
            }
        );
        assert_eq!(err.path_string(), "schema_version");
        assert!(CorrectionSet::with_schema_version(0, Vec::new()).is_err());
    }

    #[test]
    fn duplicate_names_are_accepted() {
        let set = CorrectionSet::new(vec![test_1d(), test_1d().with_description("second")]);
        assert_eq!(set.corrections().len(), 2);
        assert_eq!(set.get("test_1D").and_then(Correction::description), None);
    }

    #[test]
    fn root_constant_must_be_finite() {
        let err = Correction::new(
            "c",
            1,
            Vec::new(),
            Variable::new("w", VariableType::Real),
            f64::NAN.into(),
        )
        .unwrap_err();
        assert_eq!(err.path_string(), "data");
    }

    #[test]
    fn undeclared_dispatch_input_is_accepted() {
        let c = Correction::new(
            "etf",
            0,
            vec![Variable::new("eta", VariableType::Real)],
            Variable::new("weight", VariableType::Real),
            Binning::new("abseta", vec![0.0, 2.3], vec![1.0.into()])
                .unwrap()
                .into(),
        )
        .unwrap();
        assert_eq!(c.input_index("abseta"), None);
        assert_eq!(c.input_index("eta"), Some(0));
    }

    #[test]
    fn summary_reports_shape() {
        let c = test_1d();
        let summary = c.summary();
        assert_eq!(summary.name, "test_1D");
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.depth, 2);
        assert_eq!(summary.inputs_used, vec!["eta"]);
    }
}
